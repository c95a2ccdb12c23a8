//! Error taxonomy shared by every fitment crate.

use thiserror::Error;

/// Errors raised while parsing, expanding, or mapping part applications.
///
/// Catalog mismatches are never errors: the validator reports them through
/// [`crate::ValidationStatus`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FitmentError {
    /// Malformed application text, unmappable vehicle text, or invalid year range.
    #[error("parsing error: {0}")]
    Parsing(String),

    /// Reserved for validation failures that cannot be expressed as a result.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure inside the mapping engine (catalog unavailable, persistence failure).
    #[error("mapping error: {0}")]
    Mapping(String),

    /// Collaborator storage failure.
    #[error("database error: {0}")]
    Database(String),

    /// Missing or invalid configuration (catalog paths, unconfigured engine).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FitmentError {
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true for failures that affect the whole engine rather than a
    /// single application string.
    #[must_use]
    pub fn is_engine_level(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, FitmentError>;
