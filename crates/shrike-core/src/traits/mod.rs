//! Core traits for shrike providers.

mod rerank_model;

pub use rerank_model::*;
