//! shrike-rerankers - Rerank provider implementations for shrike.
//!
//! This crate provides rerank model adapters over hosted rerank services.
//!
//! # Supported Backends
//!
//! - **DashScope** (feature: `dashscope`) - Tongyi text-rerank API

mod factory;

#[cfg(feature = "dashscope")]
pub mod dashscope;

pub use factory::RerankModelFactory;

#[cfg(feature = "dashscope")]
pub use dashscope::DashScopeRerankModel;

// Re-export core types
pub use shrike_core::error::{CredentialsValidateError, InvokeError, InvokeResult};
pub use shrike_core::traits::{RerankModel, RerankProvider};
pub use shrike_core::types::{Credentials, RerankDocument, RerankRequest, RerankResult};
