//! Core types for shrike rerank operations.

mod credentials;
mod rerank;

pub use credentials::*;
pub use rerank::*;
