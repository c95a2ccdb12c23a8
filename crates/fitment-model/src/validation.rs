use std::fmt;

use serde::{Deserialize, Serialize};

use crate::application::PartFitment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Valid,
    Warning,
    Error,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::Warning => "WARNING",
            ValidationStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one fitment against the catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub message: String,
    /// The validated fitment, enriched with any catalog ids that matched.
    /// `None` when no fitment could be constructed from the input.
    pub fitment: Option<PartFitment>,
    pub original_text: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn new(
        status: ValidationStatus,
        message: impl Into<String>,
        fitment: Option<PartFitment>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            fitment,
            original_text: original_text.into(),
            suggestions: Vec::new(),
        }
    }

    /// An ERROR result for input that never produced a fitment.
    pub fn failed(message: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self::new(ValidationStatus::Error, message, None, original_text)
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == ValidationStatus::Error
    }
}

/// Status counts over a set of validation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub valid: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ValidationSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ValidationResult>) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result.status);
        }
        summary
    }

    pub fn record(&mut self, status: ValidationStatus) {
        match status {
            ValidationStatus::Valid => self.valid += 1,
            ValidationStatus::Warning => self.warnings += 1,
            ValidationStatus::Error => self.errors += 1,
        }
    }

    pub fn merge(&mut self, other: ValidationSummary) {
        self.valid += other.valid;
        self.warnings += other.warnings;
        self.errors += other.errors;
    }

    pub fn total(&self) -> usize {
        self.valid + self.warnings + self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
