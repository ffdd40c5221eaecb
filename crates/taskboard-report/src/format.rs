//! Report format selection

use std::str::FromStr;

use chrono::NaiveDate;
use taskboard_core::Project;

use crate::error::ReportError;
use crate::export::{csv_export, json_export, markdown_export};
use crate::text::text_report;

/// Output format of a project report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain-text summary
    #[default]
    Text,
    /// One CSV row per task
    Csv,
    /// Markdown grouped by column
    Markdown,
    /// Project record as JSON
    Json,
}

impl ReportFormat {
    /// All formats
    pub const ALL: [ReportFormat; 4] = [Self::Text, Self::Csv, Self::Markdown, Self::Json];

    /// Conventional file extension
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }

    /// Default file name for a report on `project_name`
    ///
    /// Characters other than ASCII letters, digits, `-` and `_` become `_`.
    #[must_use]
    pub fn file_name(&self, project_name: &str) -> String {
        let stem: String = project_name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { "report" } else { stem.as_str() };
        format!("{stem}.{}", self.extension())
    }

    /// Render `project` in this format as of `today`
    ///
    /// # Errors
    /// Returns `ReportError` if JSON encoding fails
    pub fn render(&self, project: &Project, today: NaiveDate) -> Result<String, ReportError> {
        tracing::debug!(project = %project.id(), format = %self, "rendering report");
        match self {
            ReportFormat::Text => Ok(text_report(project, today)),
            ReportFormat::Csv => Ok(csv_export(project)),
            ReportFormat::Markdown => Ok(markdown_export(project)),
            ReportFormat::Json => json_export(project, true),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}
