//! Error types for report generation

/// Report error type
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Requested format is not supported
    #[error("unknown report format: '{0}' (expected text, csv, markdown or json)")]
    UnknownFormat(String),

    /// Project could not be encoded as JSON
    #[error("failed to encode project: {0}")]
    Json(#[from] serde_json::Error),

    /// Project could not be converted to a record
    #[error(transparent)]
    Model(#[from] taskboard_core::ModelError),
}
