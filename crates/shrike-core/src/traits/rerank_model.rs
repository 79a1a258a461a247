//! RerankModel trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CredentialsValidateError, InvokeResult};
use crate::types::{Credentials, RerankRequest, RerankResult};

/// Core RerankModel trait - all rerank providers implement this.
#[async_trait]
pub trait RerankModel: Send + Sync {
    /// Rerank the request's documents against its query.
    async fn invoke(&self, request: RerankRequest) -> InvokeResult<RerankResult>;

    /// Check credentials against the live provider with a small fixed probe.
    ///
    /// Any failure collapses into [`CredentialsValidateError`] carrying the
    /// underlying message.
    async fn validate_credentials(
        &self,
        model: &str,
        credentials: &Credentials,
    ) -> Result<(), CredentialsValidateError>;

    /// Get the provider name.
    fn name(&self) -> &'static str;
}

/// Rerank provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RerankProvider {
    #[default]
    #[serde(rename = "dashscope")]
    DashScope,
}
