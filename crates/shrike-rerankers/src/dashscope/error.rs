//! DashScope error taxonomy.

use thiserror::Error;

use shrike_core::error::ProviderError;

/// Errors raised by the DashScope text-rerank service.
///
/// HTTP responses are classified in [`DashScopeError::from_response`];
/// transport failures arrive through the `reqwest` conversion. Codes
/// without a dedicated variant stay as [`DashScopeError::Api`] so the
/// vendor code is never lost.
#[derive(Error, Debug)]
pub enum DashScopeError {
    /// Request never completed: DNS, connect, TLS, or timeout failure.
    #[error("request failed: {0}")]
    RequestFailure(String),

    /// Service reported itself unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// API key missing, malformed, or rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Request parameters rejected by the service.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested model is not served by the rerank endpoint.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// Endpoint rejected the HTTP method.
    #[error("unsupported http method: {0}")]
    UnsupportedHttpMethod(String),

    /// Any other service-reported error, kept with its vendor code.
    #[error("api error {code}: {message}")]
    Api { code: String, message: String },

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Tagged kinds for [`DashScopeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashScopeErrorKind {
    RequestFailure,
    ServiceUnavailable,
    Authentication,
    InvalidParameter,
    UnsupportedModel,
    UnsupportedHttpMethod,
    Api,
    Decode,
}

impl DashScopeError {
    /// Kind tag of this error.
    pub fn kind(&self) -> DashScopeErrorKind {
        match self {
            Self::RequestFailure(_) => DashScopeErrorKind::RequestFailure,
            Self::ServiceUnavailable(_) => DashScopeErrorKind::ServiceUnavailable,
            Self::Authentication(_) => DashScopeErrorKind::Authentication,
            Self::InvalidParameter(_) => DashScopeErrorKind::InvalidParameter,
            Self::UnsupportedModel(_) => DashScopeErrorKind::UnsupportedModel,
            Self::UnsupportedHttpMethod(_) => DashScopeErrorKind::UnsupportedHttpMethod,
            Self::Api { .. } => DashScopeErrorKind::Api,
            Self::Decode(_) => DashScopeErrorKind::Decode,
        }
    }

    /// Classify a non-success response from its HTTP status and error body.
    pub fn from_response(status: u16, code: &str, message: String) -> Self {
        match (status, code) {
            (401 | 403, _) | (_, "InvalidApiKey") => Self::Authentication(message),
            (405, _) | (_, "UnsupportedHTTPMethod") => Self::UnsupportedHttpMethod(message),
            (503, _) | (_, "ServiceUnavailable") => Self::ServiceUnavailable(message),
            (_, "InvalidParameter") => Self::InvalidParameter(message),
            (_, "UnsupportedModel") => Self::UnsupportedModel(message),
            _ => Self::Api {
                code: code.to_string(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for DashScopeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::RequestFailure(err.to_string())
        }
    }
}

impl ProviderError for DashScopeError {
    type Kind = DashScopeErrorKind;

    fn kind(&self) -> DashScopeErrorKind {
        DashScopeError::kind(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_classified_by_status_or_code() {
        for status in [401, 403] {
            let err = DashScopeError::from_response(status, "", "denied".to_string());
            assert_eq!(err.kind(), DashScopeErrorKind::Authentication);
        }
        let err = DashScopeError::from_response(400, "InvalidApiKey", "bad key".to_string());
        assert_eq!(err.kind(), DashScopeErrorKind::Authentication);
        assert_eq!(err.to_string(), "authentication failed: bad key");
    }

    #[test]
    fn test_vendor_codes_pick_dedicated_variants() {
        let cases = [
            ("InvalidParameter", DashScopeErrorKind::InvalidParameter),
            ("UnsupportedModel", DashScopeErrorKind::UnsupportedModel),
            (
                "UnsupportedHTTPMethod",
                DashScopeErrorKind::UnsupportedHttpMethod,
            ),
            ("ServiceUnavailable", DashScopeErrorKind::ServiceUnavailable),
        ];
        for (code, expected) in cases {
            let err = DashScopeError::from_response(400, code, "nope".to_string());
            assert_eq!(err.kind(), expected);
        }
    }

    #[test]
    fn test_unknown_code_kept_as_api_error() {
        let err = DashScopeError::from_response(429, "Throttling", "too many requests".to_string());
        assert_eq!(err.kind(), DashScopeErrorKind::Api);
        assert_eq!(err.to_string(), "api error Throttling: too many requests");
    }
}
