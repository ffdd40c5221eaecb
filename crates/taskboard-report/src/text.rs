//! Plain-text project report and statistics screen

use chrono::NaiveDate;
use taskboard_core::{percent_of, Priority, Project, TaskState, Timestamp};

const RULE_WIDTH: usize = 60;

/// Format timestamp for display
pub(crate) fn display_timestamp(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Full text report
///
/// Sections: general statistics, counts by state, by priority and by
/// assignee, overdue tasks (omitted when there are none), and the tasks of
/// every column.
#[must_use]
pub fn text_report(project: &Project, today: NaiveDate) -> String {
    let stats = project.statistics(today);
    let rule = "=".repeat(RULE_WIDTH);
    let mut report = String::new();

    report.push_str(&format!("{rule}\n"));
    report.push_str(&format!("PROJECT REPORT: {}\n", project.name()));
    report.push_str(&format!("{rule}\n\n"));

    report.push_str(&format!("Description: {}\n", project.description()));
    report.push_str(&format!("Created: {}\n", display_timestamp(&project.created_at())));
    report.push_str(&format!("Modified: {}\n\n", display_timestamp(&project.modified_at())));

    report.push_str("GENERAL STATISTICS:\n");
    report.push_str(&format!("  Total tasks: {}\n", stats.total_tasks));
    report.push_str(&format!("  Total columns: {}\n", stats.total_columns));
    report.push_str(&format!("  Progress: {:.1}%\n\n", stats.progress_percent()));

    report.push_str("BY STATE:\n");
    for state in TaskState::ALL {
        report.push_str(&format!("  {state}: {}\n", stats.state_count(state)));
    }
    report.push('\n');

    report.push_str("BY PRIORITY:\n");
    for priority in Priority::ALL {
        report.push_str(&format!("  {priority}: {}\n", stats.priority_count(priority)));
    }
    report.push('\n');

    report.push_str("TASK ASSIGNMENT:\n");
    for (assignee, count) in &stats.by_assignee.assigned {
        report.push_str(&format!("  {assignee}: {count}\n"));
    }
    report.push_str(&format!("  Unassigned: {}\n\n", stats.by_assignee.unassigned));

    let overdue = project.overdue_tasks(today);
    if !overdue.is_empty() {
        report.push_str("OVERDUE TASKS:\n");
        for (_, task) in overdue {
            let due = task.due_date().map(|d| d.to_string()).unwrap_or_default();
            report.push_str(&format!("  - {} (due: {due})\n", task.title()));
        }
        report.push('\n');
    }

    report.push_str("DISTRIBUTION BY COLUMN:\n");
    for column in project.sorted_columns() {
        report.push_str(&format!("  {}:\n", column.name()));
        for task in column.tasks() {
            report.push_str(&format!("    * {} [{}]\n", task.title(), task.priority()));
        }
    }

    report.push_str(&format!("\n{rule}\n"));
    report
}

/// Statistics screen with truncated percentages
#[must_use]
pub fn statistics_screen(project: &Project, today: NaiveDate) -> String {
    let stats = project.statistics(today);
    let total = stats.total_tasks;
    let mut screen = String::new();

    screen.push_str(&format!("STATISTICS: {}\n\n", project.name()));
    if total == 0 {
        screen.push_str("No tasks in this project\n");
        return screen;
    }

    let line = |label: &dyn std::fmt::Display, count: usize| {
        format!("  {label}: {count} ({}%)\n", percent_of(count, total))
    };

    screen.push_str(&format!("Total tasks: {total}\n\n"));

    screen.push_str("BY STATE:\n");
    for state in TaskState::ALL {
        screen.push_str(&line(&state, stats.state_count(state)));
    }
    screen.push('\n');

    screen.push_str("BY PRIORITY:\n");
    for priority in Priority::ALL.iter().rev() {
        screen.push_str(&line(priority, stats.priority_count(*priority)));
    }
    screen.push('\n');

    let unassigned = stats.by_assignee.unassigned;
    screen.push_str("ASSIGNMENT:\n");
    screen.push_str(&line(&"Assigned", total - unassigned));
    screen.push_str(&line(&"Unassigned", unassigned));
    screen.push('\n');

    screen.push_str("BY COLUMN:\n");
    for column in &stats.per_column {
        screen.push_str(&format!("  {}: {} tasks\n", column.name, column.tasks));
    }
    screen
}

/// Overdue tasks with their columns and due dates
#[must_use]
pub fn overdue_listing(project: &Project, today: NaiveDate) -> String {
    let overdue = project.overdue_tasks(today);
    if overdue.is_empty() {
        return format!("No overdue tasks in {}\n", project.name());
    }
    let mut listing = format!("OVERDUE TASKS: {} ({})\n", project.name(), overdue.len());
    for (column, task) in overdue {
        let due = task.due_date().map(|d| d.to_string()).unwrap_or_default();
        listing.push_str(&format!(
            "  - {} [{}] in '{}' (due: {due}, {})\n",
            task.title(),
            task.priority(),
            column.name(),
            task.assignee().unwrap_or("Unassigned"),
        ));
    }
    listing
}
