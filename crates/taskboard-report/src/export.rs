//! CSV, Markdown and JSON exports

use taskboard_core::{Project, Record};

use crate::error::ReportError;
use crate::text::display_timestamp;

/// CSV header row
pub const CSV_HEADER: &str = "Task ID,Title,Description,Priority,State,Assignee,Created,Labels";

/// Separator for labels inside one CSV cell
pub const LABEL_SEPARATOR: char = '|';

/// Quote a CSV field, doubling embedded quotes
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote only when the field would otherwise break the row
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

/// One row per task, column order then task order
///
/// Title and description are always quoted; labels are joined with `|`.
#[must_use]
pub fn csv_export(project: &Project) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for task in project.all_tasks() {
        let labels = task
            .labels()
            .collect::<Vec<_>>()
            .join(&LABEL_SEPARATOR.to_string());
        let row = [
            field(task.id().as_str()),
            quoted(task.title()),
            quoted(task.description()),
            task.priority().to_string(),
            task.state().to_string(),
            field(task.assignee().unwrap_or_default()),
            taskboard_core::time::format_timestamp(&task.created_at()),
            field(&labels),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

/// Tasks grouped under one heading per column
#[must_use]
pub fn markdown_export(project: &Project) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", project.name()));
    if !project.description().is_empty() {
        md.push_str(&format!("**Description:** {}\n\n", project.description()));
    }
    md.push_str(&format!("**Created:** {}\n\n", display_timestamp(&project.created_at())));
    md.push_str(&format!("**Total tasks:** {}\n\n", project.task_count()));

    for column in project.sorted_columns() {
        md.push_str(&format!("## {}\n\n", column.name()));
        if column.is_empty() {
            md.push_str("*(empty)*\n\n");
            continue;
        }
        for task in column.tasks() {
            md.push_str(&format!(
                "- **{}** ({}, {})\n",
                task.title(),
                task.priority(),
                task.state()
            ));
            if !task.description().is_empty() {
                md.push_str(&format!("  - {}\n", task.description()));
            }
            if let Some(assignee) = task.assignee() {
                md.push_str(&format!("  - Assigned to: {assignee}\n"));
            }
        }
        md.push('\n');
    }
    md
}

/// Project record as JSON, in the same shape as the stored document entry
///
/// # Errors
/// Returns `ReportError` if the project cannot be encoded
pub fn json_export(project: &Project, pretty: bool) -> Result<String, ReportError> {
    let record = project.to_record()?;
    let json = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    Ok(json)
}
