//! shrike-core - Core library for shrike.
//!
//! This crate provides the core types, traits, and unified error taxonomy
//! for the shrike rerank model runtime.
//!
//! # Example
//!
//! ```ignore
//! use shrike_core::{Credentials, RerankModel, RerankRequest};
//!
//! let request = RerankRequest {
//!     model: "gte-rerank".to_string(),
//!     credentials: Credentials::from_iter([("dashscope_api_key", "sk-...")]),
//!     query: "What is the capital of the United States?".to_string(),
//!     documents: vec!["Carson City is the capital city of Nevada.".to_string()],
//!     ..Default::default()
//! };
//!
//! // Rerank documents against the query
//! let result = model.invoke(request).await?;
//! ```

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{
    CredentialsValidateError, ErrorMapping, InvokeError, InvokeErrorCategory, InvokeResult,
    ProviderError, UnsupportedProviderError,
};
pub use traits::{RerankModel, RerankProvider};
pub use types::{Credentials, RerankDocument, RerankRequest, RerankResult};
