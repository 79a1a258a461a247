//! Rerank request and result entities.

use serde::{Deserialize, Serialize};

use crate::types::Credentials;

/// Normalized rerank request handed to a rerank model provider.
///
/// All entities are transient: constructed per call, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RerankRequest {
    /// Model identifier, passed through to the provider.
    pub model: String,
    /// Provider credentials, read lazily by the adapter.
    pub credentials: Credentials,
    /// Query the candidate documents are ranked against.
    pub query: String,
    /// Candidate documents in caller order. May be empty.
    pub documents: Vec<String>,
    /// Minimum relevance score in [0, 1]; documents scoring below it are
    /// dropped from the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
    /// Upper bound on returned documents, enforced by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    /// Optional end-user identifier. Carried for interface parity; current
    /// providers do not consume it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One reranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankDocument {
    /// Index of the document in the request's input order.
    pub index: usize,
    /// Document text as returned by the provider.
    pub text: String,
    /// Relevance score reported by the provider.
    pub score: f32,
}

/// Result of a rerank invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResult {
    /// Model that produced the ranking, echoed from the request.
    pub model: String,
    /// Documents passing the score threshold, in provider response order.
    pub docs: Vec<RerankDocument>,
}

impl RerankResult {
    /// Empty result for a model, used for the empty-input short circuit.
    pub fn empty(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            docs: Vec::new(),
        }
    }
}
