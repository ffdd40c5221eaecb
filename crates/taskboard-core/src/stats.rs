//! Read-only aggregate views over a project

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::column::Column;
use crate::id::ColumnId;
use crate::project::Project;
use crate::task::Task;
use crate::types::{Priority, TaskState};

/// Task counts per assignee
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssigneeCounts {
    /// Assignee to count, in first-seen order
    pub assigned: IndexMap<String, usize>,
    /// Tasks without an assignee
    pub unassigned: usize,
}

/// Task count of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    /// Column identifier
    pub id: ColumnId,
    /// Column name
    pub name: String,
    /// Tasks in the column
    pub tasks: usize,
}

/// Aggregate statistics for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    /// Total tasks
    pub total_tasks: usize,
    /// Total columns
    pub total_columns: usize,
    /// Count per state; every state is present
    pub by_state: BTreeMap<TaskState, usize>,
    /// Count per priority; every priority is present
    pub by_priority: BTreeMap<Priority, usize>,
    /// Count per assignee
    pub by_assignee: AssigneeCounts,
    /// Overdue tasks
    pub overdue: usize,
    /// Count per column, in column order
    pub per_column: Vec<ColumnCount>,
}

impl ProjectStats {
    /// Completed tasks
    #[inline]
    #[must_use]
    pub fn completed(&self) -> usize {
        self.state_count(TaskState::Completed)
    }

    /// Count for one state
    #[inline]
    #[must_use]
    pub fn state_count(&self, state: TaskState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }

    /// Count for one priority
    #[inline]
    #[must_use]
    pub fn priority_count(&self, priority: Priority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Completed share of all tasks, 0..=100; 0 when there are no tasks
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed() as f64 * 100.0 / self.total_tasks as f64
    }
}

/// Integer percentage, truncated toward zero; 0 when `total` is 0
///
/// `percent_of(3, 8)` is 37, not 38.
#[inline]
#[must_use]
pub fn percent_of(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    count * 100 / total
}

impl Project {
    /// Derive aggregate statistics as of `today`
    #[must_use]
    pub fn statistics(&self, today: NaiveDate) -> ProjectStats {
        let mut by_state: BTreeMap<TaskState, usize> =
            TaskState::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_priority: BTreeMap<Priority, usize> =
            Priority::ALL.iter().map(|p| (*p, 0)).collect();
        let mut by_assignee = AssigneeCounts::default();
        let mut overdue = 0;
        let mut total_tasks = 0;

        for task in self.all_tasks() {
            total_tasks += 1;
            *by_state.entry(task.state()).or_default() += 1;
            *by_priority.entry(task.priority()).or_default() += 1;
            match task.assignee() {
                Some(who) => *by_assignee.assigned.entry(who.to_string()).or_default() += 1,
                None => by_assignee.unassigned += 1,
            }
            if task.is_overdue(today) {
                overdue += 1;
            }
        }

        let per_column = self
            .sorted_columns()
            .into_iter()
            .map(|c| ColumnCount {
                id: c.id().clone(),
                name: c.name().to_string(),
                tasks: c.task_count(),
            })
            .collect();

        ProjectStats {
            total_tasks,
            total_columns: self.columns().len(),
            by_state,
            by_priority,
            by_assignee,
            overdue,
            per_column,
        }
    }

    /// Overdue tasks with their columns, in column then task order
    #[must_use]
    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<(&Column, &Task)> {
        self.sorted_columns()
            .into_iter()
            .flat_map(|c| c.tasks().iter().map(move |t| (c, t)))
            .filter(|(_, t)| t.is_overdue(today))
            .collect()
    }
}
