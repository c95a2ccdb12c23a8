use std::path::PathBuf;

use fitment_model::FitmentError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("missing required role in manifest: {role}")]
    MissingRole { role: String },

    #[error("duplicate role in manifest: {role}")]
    DuplicateRole { role: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: String, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("missing file listed in manifest: {path}")]
    MissingFile { path: PathBuf },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("model mapping rule {id} not found")]
    RuleNotFound { id: u64 },

    #[error("catalog backend failure: {message}")]
    Backend { message: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns true when the error comes from reading or writing data rather
    /// than from a missing or malformed catalog definition.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::RuleNotFound { .. } | Self::Backend { .. }
        )
    }
}

impl From<CatalogError> for FitmentError {
    fn from(error: CatalogError) -> Self {
        if error.is_backend() {
            FitmentError::Database(error.to_string())
        } else {
            FitmentError::Configuration(error.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_errors_are_configuration() {
        let error: FitmentError = CatalogError::MissingRole {
            role: "vcdb_vehicles".to_string(),
        }
        .into();
        assert!(matches!(error, FitmentError::Configuration(_)));
        assert!(error.to_string().contains("vcdb_vehicles"));
    }

    #[test]
    fn read_failures_are_database() {
        let error: FitmentError = CatalogError::backend("connection reset").into();
        assert!(matches!(error, FitmentError::Database(_)));
    }
}
