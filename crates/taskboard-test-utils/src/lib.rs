//! Testing utilities for the taskboard workspace
//!
//! Shared fixtures: sample users, a project with a known task distribution,
//! and a scratch directory for document files.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use chrono::NaiveDate;
use taskboard_core::{ColumnId, Priority, Project, Task, TaskState, TaskUpdate, User};
use tempfile::TempDir;

/// Fixed "today" used by fixtures with due dates
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn sample_user() -> User {
    User::new("Ana", "ana@x.com").unwrap()
}

pub fn sample_users() -> Vec<User> {
    vec![
        sample_user(),
        User::new("Bruno", "bruno@x.com").unwrap(),
        User::new("Carla", "carla@x.com").unwrap(),
    ]
}

/// Id of the column with this name
pub fn column_id(project: &Project, name: &str) -> ColumnId {
    project
        .column_by_name(name)
        .unwrap_or_else(|| panic!("no column named {name}"))
        .id()
        .clone()
}

pub fn create_task(title: &str, state: TaskState, priority: Priority) -> Task {
    let mut task = Task::new(title).unwrap().with_priority(priority);
    task.update(TaskUpdate::new().state(state)).unwrap();
    task
}

/// "Demo" project with eight tasks
///
/// States: 3 pending, 2 in progress, 2 completed, 1 blocked.
/// Priorities: 2 urgent, 2 high, 3 medium, 1 low.
/// Assignees: "ana" x3, "bruno" x2, 3 unassigned.
/// Overdue relative to [`fixed_today`]: "Fix login" and "Blocked on API".
pub fn seeded_project() -> Project {
    let mut project = Project::new("Demo")
        .unwrap()
        .with_description("Seeded board");
    let pending = column_id(&project, "Pending");
    let doing = column_id(&project, "In Progress");
    let done = column_id(&project, "Completed");
    let overdue = fixed_today().pred_opt().unwrap();
    let later = fixed_today().succ_opt().unwrap();

    let tasks = [
        (
            &pending,
            create_task("Write spec", TaskState::Pending, Priority::Urgent)
                .with_assignee("ana")
                .with_description("First draft"),
        ),
        (
            &pending,
            create_task("Fix login", TaskState::Pending, Priority::High)
                .with_assignee("bruno")
                .with_due_date(overdue),
        ),
        (&pending, create_task("Update docs", TaskState::Pending, Priority::Low)),
        (
            &doing,
            create_task("Build API", TaskState::InProgress, Priority::Urgent)
                .with_assignee("ana")
                .with_due_date(later),
        ),
        (&doing, create_task("Design UI", TaskState::InProgress, Priority::Medium)),
        (
            &doing,
            create_task("Blocked on API", TaskState::Blocked, Priority::High)
                .with_assignee("bruno")
                .with_due_date(overdue),
        ),
        (
            &done,
            create_task("Set up repo", TaskState::Completed, Priority::Medium)
                .with_assignee("ana")
                .with_due_date(overdue),
        ),
        (&done, create_task("Kickoff", TaskState::Completed, Priority::Medium)),
    ];
    for (column, task) in tasks {
        assert!(project.add_task(column, task));
    }
    project
}

/// Scratch directory holding a document path
pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Document path inside a not-yet-created `data/` subdirectory
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("projects.json")
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}
