//! Knowledge base adapters

mod static_kb;

pub use static_kb::StaticKnowledgeBase;
