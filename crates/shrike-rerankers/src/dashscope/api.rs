//! DashScope text-rerank HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::dashscope::error::DashScopeError;

/// Endpoint of the DashScope text-rerank service.
pub const DASHSCOPE_RERANK_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/rerank/text-rerank/text-rerank";

/// Configuration for the DashScope HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashScopeConfig {
    /// Rerank endpoint URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for DashScopeConfig {
    fn default() -> Self {
        Self {
            base_url: DASHSCOPE_RERANK_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Inputs for one text-rerank call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRerankRequest {
    pub model: String,
    pub query: String,
    pub documents: Vec<String>,
    pub top_n: Option<usize>,
    pub return_documents: bool,
    pub api_key: String,
}

/// One text-rerank call against the DashScope service.
///
/// The adapter depends on this seam rather than on the HTTP client
/// directly, so tests can script responses without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextRerankApi: Send + Sync {
    /// Execute a single rerank call.
    async fn call(
        &self,
        request: TextRerankRequest,
    ) -> Result<TextRerankResponse, DashScopeError>;
}

#[derive(Debug, Serialize)]
struct RerankBody<'a> {
    model: &'a str,
    input: RerankInput<'a>,
    parameters: RerankParameters,
}

#[derive(Debug, Serialize)]
struct RerankInput<'a> {
    query: &'a str,
    documents: &'a [String],
}

#[derive(Debug, Serialize)]
struct RerankParameters {
    return_documents: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_n: Option<usize>,
}

/// Response payload of a text-rerank call.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRerankResponse {
    pub output: TextRerankOutput,
    #[serde(default)]
    pub usage: Option<TextRerankUsage>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Ranked results in service order.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRerankOutput {
    pub results: Vec<TextRerankEntry>,
}

/// One ranked document.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRerankEntry {
    pub index: usize,
    pub relevance_score: f32,
    #[serde(default)]
    pub document: Option<TextRerankDocument>,
}

/// Document text echoed back when `return_documents` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRerankDocument {
    pub text: String,
}

/// Token accounting reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRerankUsage {
    pub total_tokens: u64,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// HTTP client for the DashScope text-rerank endpoint.
pub struct DashScopeClient {
    client: Client,
    config: DashScopeConfig,
}

impl DashScopeClient {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(DashScopeConfig::default())
    }

    /// Create a client with explicit configuration.
    pub fn with_config(config: DashScopeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

impl Default for DashScopeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRerankApi for DashScopeClient {
    async fn call(
        &self,
        request: TextRerankRequest,
    ) -> Result<TextRerankResponse, DashScopeError> {
        let body = RerankBody {
            model: &request.model,
            input: RerankInput {
                query: &request.query,
                documents: &request.documents,
            },
            parameters: RerankParameters {
                return_documents: request.return_documents,
                top_n: request.top_n,
            },
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .timeout(self.config.timeout)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = if error.message.is_empty() {
                format!("status {status}: {text}")
            } else {
                error.message
            };
            return Err(DashScopeError::from_response(
                status.as_u16(),
                &error.code,
                message,
            ));
        }

        Ok(response.json().await?)
    }
}
