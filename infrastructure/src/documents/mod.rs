//! Document generation adapters

mod local;

pub use local::LocalDocumentGenerator;
