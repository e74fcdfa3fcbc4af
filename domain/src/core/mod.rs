//! Core domain primitives: errors and monetary rounding.

pub mod error;
pub mod money;
