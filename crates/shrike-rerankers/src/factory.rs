//! Factory for creating rerank providers.

use std::sync::Arc;

use shrike_core::error::UnsupportedProviderError;
use shrike_core::traits::{RerankModel, RerankProvider};

/// Factory for creating rerank providers.
pub struct RerankModelFactory;

impl RerankModelFactory {
    /// Create a rerank model for the given provider.
    pub async fn create(
        provider: RerankProvider,
    ) -> Result<Arc<dyn RerankModel>, UnsupportedProviderError> {
        match provider {
            #[cfg(feature = "dashscope")]
            RerankProvider::DashScope => {
                let model = crate::dashscope::DashScopeRerankModel::new();
                Ok(Arc::new(model))
            }

            #[allow(unreachable_patterns)]
            _ => Err(UnsupportedProviderError {
                provider: format!("{:?}", provider),
            }),
        }
    }

    /// Create a DashScope rerank model.
    #[cfg(feature = "dashscope")]
    pub fn dashscope() -> Arc<dyn RerankModel> {
        Arc::new(crate::dashscope::DashScopeRerankModel::new())
    }
}
