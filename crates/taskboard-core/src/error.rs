//! Error types for the entity model
//!
//! Every variant is a validation failure raised synchronously at the point
//! of construction or mutation. Not-found conditions are never errors; they
//! surface as `Option::None` or `false` from the accessors.

/// Entity model error type
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Required text field is empty or whitespace
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field
        field: &'static str,
    },

    /// Email does not contain "@" followed by a domain with a "."
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// Search was requested with an empty term
    #[error("search term must not be empty")]
    EmptySearchTerm,

    /// Priority label not recognised
    #[error("unknown priority: '{0}' (expected low, medium, high or urgent)")]
    UnknownPriority(String),

    /// Task state label not recognised
    #[error("unknown task state: '{0}' (expected pending, in progress, completed or blocked)")]
    UnknownState(String),

    /// Date not in ISO-8601 form
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Structured record could not be converted
    #[error("invalid {kind} record: {source}")]
    InvalidRecord {
        /// Entity kind of the record
        kind: &'static str,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    /// Create empty-field error
    #[inline]
    #[must_use]
    pub fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    /// Check if error came from user input rather than a stored record
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::InvalidRecord { .. })
    }
}

/// Reject blank text, returning the trimmed value otherwise
pub(crate) fn require_text(value: impl Into<String>, field: &'static str) -> Result<String, ModelError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::empty(field));
    }
    Ok(trimmed.to_string())
}
