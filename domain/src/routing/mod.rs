//! Query routing: capabilities, intent classification, jurisdiction detection.

pub mod capability;
pub mod classifier;
pub mod jurisdiction;

pub use capability::Capability;
pub use classifier::{Classification, IntentClassifier};
pub use jurisdiction::{Jurisdiction, detect_jurisdiction};
