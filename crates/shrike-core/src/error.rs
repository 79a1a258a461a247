//! Error types for shrike rerank operations.
//!
//! Provider adapters surface failures through a small unified taxonomy,
//! [`InvokeError`]. Each provider declares a static [`ErrorMapping`] table
//! from its own tagged error kinds to the unified categories; the generic
//! translation in [`ErrorMapping::translate`] is shared by all providers,
//! so an adapter contributes data, not classification logic.

use thiserror::Error;

/// Result type alias for model invocations.
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Unified error surfaced by model invocations.
///
/// Provider failures are reclassified into one of the named categories
/// through the provider's [`ErrorMapping`]; anything the mapping does not
/// cover propagates as [`InvokeError::Other`] with its message intact.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// Could not reach the provider.
    #[error("connection error: {0}")]
    Connection(String),

    /// Provider is up but unable to serve the request.
    #[error("server unavailable: {0}")]
    ServerUnavailable(String),

    /// Provider rejected the request due to rate limiting.
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    /// Credentials were rejected by the provider.
    #[error("authorization error: {0}")]
    Authorization(String),

    /// Provider rejected the request contents.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unclassified provider failure.
    #[error("invoke error: {0}")]
    Other(String),
}

impl InvokeError {
    /// Create an unclassified invoke error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Build the error variant for a unified category.
    pub fn from_category(category: InvokeErrorCategory, message: impl Into<String>) -> Self {
        let message = message.into();
        match category {
            InvokeErrorCategory::Connection => Self::Connection(message),
            InvokeErrorCategory::ServerUnavailable => Self::ServerUnavailable(message),
            InvokeErrorCategory::RateLimit => Self::RateLimit(message),
            InvokeErrorCategory::Authorization => Self::Authorization(message),
            InvokeErrorCategory::BadRequest => Self::BadRequest(message),
        }
    }

    /// Unified category of this error, `None` for [`InvokeError::Other`].
    pub fn category(&self) -> Option<InvokeErrorCategory> {
        match self {
            Self::Connection(_) => Some(InvokeErrorCategory::Connection),
            Self::ServerUnavailable(_) => Some(InvokeErrorCategory::ServerUnavailable),
            Self::RateLimit(_) => Some(InvokeErrorCategory::RateLimit),
            Self::Authorization(_) => Some(InvokeErrorCategory::Authorization),
            Self::BadRequest(_) => Some(InvokeErrorCategory::BadRequest),
            Self::Other(_) => None,
        }
    }
}

/// Tag for the unified [`InvokeError`] categories.
///
/// [`ErrorMapping`] tables are keyed by these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokeErrorCategory {
    Connection,
    ServerUnavailable,
    RateLimit,
    Authorization,
    BadRequest,
}

/// Provider error types that can be classified through an [`ErrorMapping`].
///
/// Providers model their SDK's exception taxonomy as a tagged enum; the
/// `Kind` discriminant is what the mapping table matches on.
pub trait ProviderError: std::error::Error {
    /// Tagged kind discriminant for this error.
    type Kind: PartialEq + 'static;

    /// Kind of this error instance.
    fn kind(&self) -> Self::Kind;
}

/// Static table mapping unified categories to provider error kinds.
///
/// A row may be empty: the category is reserved but nothing currently maps
/// to it. Kinds appearing in no row translate to [`InvokeError::Other`].
pub struct ErrorMapping<K: 'static> {
    entries: &'static [(InvokeErrorCategory, &'static [K])],
}

impl<K: PartialEq + 'static> ErrorMapping<K> {
    /// Create a mapping table from static rows.
    pub const fn new(entries: &'static [(InvokeErrorCategory, &'static [K])]) -> Self {
        Self { entries }
    }

    /// Table rows in declaration order.
    pub fn entries(&self) -> &'static [(InvokeErrorCategory, &'static [K])] {
        self.entries
    }

    /// Unified category a provider kind maps to, if any.
    pub fn category_for(&self, kind: &K) -> Option<InvokeErrorCategory> {
        self.entries
            .iter()
            .find(|(_, kinds)| kinds.contains(kind))
            .map(|(category, _)| *category)
    }

    /// Reclassify a provider error into the unified taxonomy.
    ///
    /// The provider error's message is preserved; only its classification
    /// changes. Kinds outside the table surface as [`InvokeError::Other`].
    pub fn translate<E>(&self, error: &E) -> InvokeError
    where
        E: ProviderError<Kind = K>,
    {
        match self.category_for(&error.kind()) {
            Some(category) => InvokeError::from_category(category, error.to_string()),
            None => InvokeError::Other(error.to_string()),
        }
    }
}

/// Raised by credential validation.
///
/// Validation collapses every underlying failure into this single error,
/// keeping only the original message: callers need pass/fail plus a
/// human-readable reason, not the full invoke taxonomy.
#[derive(Error, Debug)]
#[error("credentials validation failed: {0}")]
pub struct CredentialsValidateError(pub String);

impl CredentialsValidateError {
    /// Create a validation error from the underlying message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Requested provider is unknown or compiled out.
#[derive(Error, Debug)]
#[error("rerank provider not supported: {provider}")]
pub struct UnsupportedProviderError {
    pub provider: String,
}
