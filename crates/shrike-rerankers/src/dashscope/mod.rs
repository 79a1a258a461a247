//! DashScope rerank model implementation.
//!
//! Adapter over the Tongyi text-rerank service (`gte-rerank` family).
//! Results keep the service's relevance order; an optional score threshold
//! filters entries without truncating the list.

mod api;
mod error;

pub use api::{
    DashScopeClient, DashScopeConfig, TextRerankApi, TextRerankDocument, TextRerankEntry,
    TextRerankOutput, TextRerankRequest, TextRerankResponse, TextRerankUsage,
    DASHSCOPE_RERANK_URL,
};
pub use error::{DashScopeError, DashScopeErrorKind};

use std::sync::Arc;

use async_trait::async_trait;

use shrike_core::error::{
    CredentialsValidateError, ErrorMapping, InvokeError, InvokeErrorCategory, InvokeResult,
};
use shrike_core::traits::RerankModel;
use shrike_core::types::{Credentials, RerankDocument, RerankRequest, RerankResult};

/// Credential field holding the DashScope API key.
pub const DASHSCOPE_API_KEY: &str = "dashscope_api_key";

/// Mapping from unified invoke-error categories to DashScope error kinds.
///
/// Kinds outside the table ([`DashScopeErrorKind::Api`],
/// [`DashScopeErrorKind::Decode`]) surface as [`InvokeError::Other`].
pub static INVOKE_ERROR_MAPPING: ErrorMapping<DashScopeErrorKind> = ErrorMapping::new(&[
    (
        InvokeErrorCategory::Connection,
        &[DashScopeErrorKind::RequestFailure],
    ),
    (
        InvokeErrorCategory::ServerUnavailable,
        &[DashScopeErrorKind::ServiceUnavailable],
    ),
    // Reserved: DashScope does not surface a dedicated rate-limit kind.
    (InvokeErrorCategory::RateLimit, &[]),
    (
        InvokeErrorCategory::Authorization,
        &[DashScopeErrorKind::Authentication],
    ),
    (
        InvokeErrorCategory::BadRequest,
        &[
            DashScopeErrorKind::InvalidParameter,
            DashScopeErrorKind::UnsupportedModel,
            DashScopeErrorKind::UnsupportedHttpMethod,
        ],
    ),
]);

/// DashScope rerank model implementation.
///
/// Stateless apart from the HTTP client: credentials travel inside each
/// request, so one instance can serve any number of tenants.
pub struct DashScopeRerankModel {
    api: Arc<dyn TextRerankApi>,
}

impl DashScopeRerankModel {
    /// Create a model backed by the live HTTP client.
    pub fn new() -> Self {
        Self::with_config(DashScopeConfig::default())
    }

    /// Create a model with explicit client configuration.
    pub fn with_config(config: DashScopeConfig) -> Self {
        Self {
            api: Arc::new(DashScopeClient::with_config(config)),
        }
    }

    /// Create a model over any [`TextRerankApi`] implementation.
    pub fn with_api(api: Arc<dyn TextRerankApi>) -> Self {
        Self { api }
    }

    fn api_key(credentials: &Credentials) -> Result<String, DashScopeError> {
        credentials
            .get(DASHSCOPE_API_KEY)
            .filter(|key| !key.is_empty())
            .map(|key| key.to_string())
            .ok_or_else(|| {
                DashScopeError::Authentication(format!(
                    "credential `{DASHSCOPE_API_KEY}` is required"
                ))
            })
    }
}

impl Default for DashScopeRerankModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RerankModel for DashScopeRerankModel {
    async fn invoke(&self, request: RerankRequest) -> InvokeResult<RerankResult> {
        // Nothing to rank; credentials are not consulted.
        if request.documents.is_empty() {
            return Ok(RerankResult::empty(request.model));
        }

        let api_key = Self::api_key(&request.credentials)
            .map_err(|err| INVOKE_ERROR_MAPPING.translate(&err))?;

        tracing::debug!(
            "Reranking {} documents with model '{}'",
            request.documents.len(),
            request.model
        );

        let call = TextRerankRequest {
            model: request.model.clone(),
            query: request.query,
            documents: request.documents,
            top_n: request.top_n,
            return_documents: true,
            api_key,
        };

        let response = self
            .api
            .call(call)
            .await
            .map_err(|err| INVOKE_ERROR_MAPPING.translate(&err))?;

        let mut docs = Vec::with_capacity(response.output.results.len());
        for entry in response.output.results {
            let text = entry
                .document
                .map(|document| document.text)
                .ok_or_else(|| InvokeError::other("rerank result entry is missing its document"))?;

            let keep = request
                .score_threshold
                .map_or(true, |threshold| entry.relevance_score >= threshold);
            if keep {
                docs.push(RerankDocument {
                    index: entry.index,
                    text,
                    score: entry.relevance_score,
                });
            }
        }

        Ok(RerankResult {
            model: request.model,
            docs,
        })
    }

    async fn validate_credentials(
        &self,
        model: &str,
        credentials: &Credentials,
    ) -> Result<(), CredentialsValidateError> {
        let probe = RerankRequest {
            model: model.to_string(),
            credentials: credentials.clone(),
            query: "What is the capital of the United States?".to_string(),
            documents: vec![
                "Carson City is the capital city of the American state of Nevada. At the 2010 \
                 United States Census, Carson City had a population of 55,274."
                    .to_string(),
                "The Commonwealth of the Northern Mariana Islands is a group of islands in the \
                 Pacific Ocean that are a political division controlled by the United States. Its \
                 capital is Saipan."
                    .to_string(),
            ],
            score_threshold: Some(0.8),
            ..Default::default()
        };

        match self.invoke(probe).await {
            Ok(_) => Ok(()),
            Err(err) => Err(CredentialsValidateError::new(err.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "dashscope"
    }
}

#[cfg(test)]
mod tests {
    use super::api::MockTextRerankApi;
    use super::*;

    fn credentials() -> Credentials {
        Credentials::from_iter([(DASHSCOPE_API_KEY, "sk-test")])
    }

    fn request(documents: &[&str]) -> RerankRequest {
        RerankRequest {
            model: "gte-rerank".to_string(),
            credentials: credentials(),
            query: "capital of nevada".to_string(),
            documents: documents.iter().map(|doc| doc.to_string()).collect(),
            ..Default::default()
        }
    }

    fn entry(index: usize, score: f32, text: &str) -> TextRerankEntry {
        TextRerankEntry {
            index,
            relevance_score: score,
            document: Some(TextRerankDocument {
                text: text.to_string(),
            }),
        }
    }

    fn response(results: Vec<TextRerankEntry>) -> TextRerankResponse {
        TextRerankResponse {
            output: TextRerankOutput { results },
            usage: Some(TextRerankUsage { total_tokens: 42 }),
            request_id: Some("req-1".to_string()),
        }
    }

    fn model_over(api: MockTextRerankApi) -> DashScopeRerankModel {
        DashScopeRerankModel::with_api(Arc::new(api))
    }

    #[tokio::test]
    async fn test_empty_documents_short_circuit() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().times(0);

        let result = model_over(api).invoke(request(&[])).await.unwrap();
        assert_eq!(result.model, "gte-rerank");
        assert!(result.docs.is_empty());
    }

    #[tokio::test]
    async fn test_empty_documents_skip_credential_read() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().times(0);

        let mut probe = request(&[]);
        probe.credentials = Credentials::new();

        // Still succeeds: the short circuit runs before the key is read.
        let result = model_over(api).invoke(probe).await.unwrap();
        assert!(result.docs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_authorization() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().times(0);

        let mut probe = request(&["doc"]);
        probe.credentials = Credentials::new();

        let err = model_over(api).invoke(probe).await.unwrap_err();
        assert!(matches!(err, InvokeError::Authorization(_)));
        assert!(err.to_string().contains(DASHSCOPE_API_KEY));
    }

    #[tokio::test]
    async fn test_results_keep_service_order() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().times(1).returning(|_| {
            Ok(response(vec![
                entry(2, 0.9, "doc C"),
                entry(0, 0.6, "doc A"),
                entry(1, 0.3, "doc B"),
            ]))
        });

        let result = model_over(api)
            .invoke(request(&["doc A", "doc B", "doc C"]))
            .await
            .unwrap();

        let indexes: Vec<usize> = result.docs.iter().map(|doc| doc.index).collect();
        assert_eq!(indexes, vec![2, 0, 1]);
        assert_eq!(result.docs[0].text, "doc C");
        assert_eq!(result.docs[0].score, 0.9);
        assert_eq!(result.docs[2].score, 0.3);
    }

    #[tokio::test]
    async fn test_threshold_filters_inclusive() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Ok(response(vec![
                entry(0, 0.95, "doc A"),
                entry(1, 0.9, "doc B"),
                entry(2, 0.5, "doc C"),
            ]))
        });

        let mut probe = request(&["doc A", "doc B", "doc C"]);
        probe.score_threshold = Some(0.9);

        let result = model_over(api).invoke(probe).await.unwrap();

        // A score equal to the threshold stays in.
        assert_eq!(result.docs.len(), 2);
        assert_eq!(result.docs[0].index, 0);
        assert_eq!(result.docs[1].index, 1);
    }

    #[tokio::test]
    async fn test_call_forwards_top_n_and_flags() {
        let mut api = MockTextRerankApi::new();
        api.expect_call()
            .withf(|call| {
                call.model == "gte-rerank"
                    && call.query == "capital of nevada"
                    && call.documents == vec!["doc A".to_string(), "doc B".to_string()]
                    && call.top_n == Some(2)
                    && call.return_documents
                    && call.api_key == "sk-test"
            })
            .returning(|_| Ok(response(vec![entry(0, 0.8, "doc A")])));

        let mut probe = request(&["doc A", "doc B"]);
        probe.top_n = Some(2);

        model_over(api).invoke(probe).await.unwrap();
    }

    #[tokio::test]
    async fn test_request_failure_maps_to_connection() {
        let mut api = MockTextRerankApi::new();
        api.expect_call()
            .returning(|_| Err(DashScopeError::RequestFailure("connect timeout".to_string())));

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::Connection(_)));
        assert!(err.to_string().contains("connect timeout"));
    }

    #[tokio::test]
    async fn test_service_unavailable_maps_to_server_unavailable() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Err(DashScopeError::ServiceUnavailable(
                "try again later".to_string(),
            ))
        });

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::ServerUnavailable(_)));
    }

    #[tokio::test]
    async fn test_authentication_maps_to_authorization() {
        let mut api = MockTextRerankApi::new();
        api.expect_call()
            .returning(|_| Err(DashScopeError::Authentication("invalid api key".to_string())));

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_invalid_parameter_maps_to_bad_request() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Err(DashScopeError::InvalidParameter(
                "top_n out of range".to_string(),
            ))
        });

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::BadRequest(_)));
        assert!(err.to_string().contains("top_n out of range"));
    }

    #[tokio::test]
    async fn test_unmapped_api_error_stays_other() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Err(DashScopeError::Api {
                code: "Throttling".to_string(),
                message: "requests throttled".to_string(),
            })
        });

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::Other(_)));
        assert!(err.to_string().contains("Throttling"));
    }

    #[tokio::test]
    async fn test_missing_document_text_is_invoke_error() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Ok(response(vec![TextRerankEntry {
                index: 0,
                relevance_score: 0.7,
                document: None,
            }]))
        });

        let err = model_over(api).invoke(request(&["doc"])).await.unwrap_err();
        assert!(matches!(err, InvokeError::Other(_)));
        assert!(err.to_string().contains("document"));
    }

    #[tokio::test]
    async fn test_invoke_twice_gives_same_result() {
        let mut api = MockTextRerankApi::new();
        api.expect_call()
            .times(2)
            .returning(|_| Ok(response(vec![entry(1, 0.8, "doc B"), entry(0, 0.4, "doc A")])));

        let model = model_over(api);
        let first = model.invoke(request(&["doc A", "doc B"])).await.unwrap();
        let second = model.invoke(request(&["doc A", "doc B"])).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mapping_covers_vendor_kinds() {
        let cases = [
            (
                DashScopeErrorKind::RequestFailure,
                Some(InvokeErrorCategory::Connection),
            ),
            (
                DashScopeErrorKind::ServiceUnavailable,
                Some(InvokeErrorCategory::ServerUnavailable),
            ),
            (
                DashScopeErrorKind::Authentication,
                Some(InvokeErrorCategory::Authorization),
            ),
            (
                DashScopeErrorKind::InvalidParameter,
                Some(InvokeErrorCategory::BadRequest),
            ),
            (
                DashScopeErrorKind::UnsupportedModel,
                Some(InvokeErrorCategory::BadRequest),
            ),
            (
                DashScopeErrorKind::UnsupportedHttpMethod,
                Some(InvokeErrorCategory::BadRequest),
            ),
            (DashScopeErrorKind::Api, None),
            (DashScopeErrorKind::Decode, None),
        ];
        for (kind, expected) in cases {
            assert_eq!(INVOKE_ERROR_MAPPING.category_for(&kind), expected);
        }
    }

    #[test]
    fn test_rate_limit_row_reserved_and_empty() {
        let row = INVOKE_ERROR_MAPPING
            .entries()
            .iter()
            .find(|(category, _)| *category == InvokeErrorCategory::RateLimit);
        assert!(matches!(row, Some((_, kinds)) if kinds.is_empty()));
    }

    #[tokio::test]
    async fn test_probe_uses_canned_inputs() {
        let mut api = MockTextRerankApi::new();
        api.expect_call()
            .withf(|call| {
                call.model == "gte-rerank"
                    && call.query == "What is the capital of the United States?"
                    && call.documents.len() == 2
                    && call.documents[0].starts_with("Carson City is the capital city")
                    && call.documents[1].ends_with("Its capital is Saipan.")
                    && call.top_n.is_none()
                    && call.api_key == "sk-test"
            })
            .returning(|_| {
                Ok(response(vec![
                    entry(0, 0.98, "Carson City ..."),
                    entry(1, 0.82, "The Commonwealth ..."),
                ]))
            });

        let outcome = model_over(api)
            .validate_credentials("gte-rerank", &credentials())
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_validation_collapses_errors() {
        let mut api = MockTextRerankApi::new();
        api.expect_call().returning(|_| {
            Err(DashScopeError::Authentication(
                "invalid api-key provided".to_string(),
            ))
        });

        let err = model_over(api)
            .validate_credentials("gte-rerank", &credentials())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "credentials validation failed: authorization error: authentication failed: \
             invalid api-key provided"
        );
    }
}
