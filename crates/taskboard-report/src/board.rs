//! Kanban board rendering

use taskboard_core::{Priority, Project};

/// Short marker shown before a task title
#[must_use]
pub fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "!!",
        Priority::High => "[H]",
        Priority::Medium => "[M]",
        Priority::Low => "[L]",
    }
}

/// Render every column with its tasks
#[must_use]
pub fn render_board(project: &Project) -> String {
    let mut board = format!("BOARD: {}\n\n", project.name());
    let columns = project.sorted_columns();
    if columns.is_empty() {
        board.push_str("No columns in this project\n");
        return board;
    }

    for column in columns {
        board.push_str(&format!("+- {} ({} tasks)\n", column.name(), column.task_count()));
        board.push_str(&format!("{}\n", "-".repeat(40)));
        if column.is_empty() {
            board.push_str("| (empty)\n");
        }
        for task in column.tasks() {
            board.push_str(&format!("| {} {}\n", priority_marker(task.priority()), task.title()));
            board.push_str(&format!(
                "|    ID: {}... | Assigned: {}\n",
                task.id().short(),
                task.assignee().unwrap_or("Unassigned")
            ));
        }
        board.push_str(&format!("+{}\n\n", "-".repeat(39)));
    }
    board
}
