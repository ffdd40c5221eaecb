//! Tasks and partial task updates

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{require_text, ModelError};
use crate::id::TaskId;
use crate::lenient;
use crate::record::Record;
use crate::time::{self, lenient_date, lenient_timestamp, Timestamp};
use crate::types::{Priority, TaskState};

/// Unit of work living in exactly one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "tarea_id", alias = "id", default)]
    id: TaskId,
    #[serde(rename = "titulo", alias = "title")]
    title: String,
    #[serde(rename = "descripcion", alias = "description", default, deserialize_with = "lenient::null_as_default")]
    description: String,
    #[serde(rename = "prioridad", alias = "priority", default)]
    priority: Priority,
    #[serde(rename = "asignado_a", alias = "assignee", default)]
    assignee: Option<String>,
    #[serde(rename = "estado", alias = "state", default)]
    state: TaskState,
    #[serde(
        rename = "fecha_creacion",
        alias = "created_at",
        default = "time::now",
        with = "lenient_timestamp"
    )]
    created_at: Timestamp,
    #[serde(
        rename = "fecha_modificacion",
        alias = "modified_at",
        default = "time::now",
        with = "lenient_timestamp"
    )]
    modified_at: Timestamp,
    #[serde(
        rename = "fecha_vencimiento",
        alias = "due_date",
        default,
        with = "lenient_date"
    )]
    due_date: Option<NaiveDate>,
    #[serde(rename = "etiquetas", alias = "labels", default, deserialize_with = "lenient::null_as_default")]
    labels: IndexSet<String>,
}

impl Task {
    /// Create new pending task with medium priority
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the title is blank
    pub fn new(title: impl Into<String>) -> Result<Self, ModelError> {
        let title = require_text(title, "task title")?;
        let now = time::now();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: String::new(),
            priority: Priority::default(),
            assignee: None,
            state: TaskState::default(),
            created_at: now,
            modified_at: now,
            due_date: None,
            labels: IndexSet::new(),
        })
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// With assignee (blank means unassigned)
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = normalize_assignee(Some(assignee.into()));
        self
    }

    /// With due date
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Task identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description (empty when unset)
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Priority
    #[inline]
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Assignee name or user id
    #[inline]
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Workflow state
    #[inline]
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last modification timestamp
    #[inline]
    #[must_use]
    pub fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Due date
    #[inline]
    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Number of labels
    #[inline]
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Apply partial update
    ///
    /// Only fields present in `update` change. The modification timestamp is
    /// refreshed even when the update is empty.
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the update sets a blank title;
    /// nothing is applied in that case
    pub fn update(&mut self, update: TaskUpdate) -> Result<(), ModelError> {
        let title = update
            .title
            .map(|t| require_text(t, "task title"))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = normalize_assignee(assignee);
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        self.touch();
        Ok(())
    }

    /// Add label; duplicates and blanks are ignored
    ///
    /// Returns `true` if the label was added.
    pub fn add_label(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || !self.labels.insert(label.to_string()) {
            return false;
        }
        self.touch();
        true
    }

    /// Remove label, preserving the order of the rest
    ///
    /// Returns `true` if the label was present.
    pub fn remove_label(&mut self, label: &str) -> bool {
        if !self.labels.shift_remove(label.trim()) {
            return false;
        }
        self.touch();
        true
    }

    /// Check if task is overdue on `today`
    ///
    /// A task is overdue when its due date is strictly before `today` and it
    /// is not completed.
    #[inline]
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.state.is_done() && self.due_date.is_some_and(|due| due < today)
    }

    /// Case-insensitive substring match on title or description
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn touch(&mut self) {
        self.modified_at = time::now().max(self.created_at);
    }
}

impl Record for Task {
    const KIND: &'static str = "task";
    const ID_KEY: &'static str = "tarea_id";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn repair(&mut self) {
        if self.modified_at < self.created_at {
            tracing::warn!(task = %self.id, "modification time before creation, clamping");
            self.modified_at = self.created_at;
        }
    }
}

fn normalize_assignee(assignee: Option<String>) -> Option<String> {
    assignee
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Partial task update
///
/// Each field is one mutable attribute; `None` leaves it untouched. For the
/// optional attributes, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New priority
    pub priority: Option<Priority>,
    /// New assignee, or `Some(None)` to unassign
    pub assignee: Option<Option<String>>,
    /// New state
    pub state: Option<TaskState>,
    /// New due date, or `Some(None)` to clear
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskUpdate {
    /// Create empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set priority
    #[inline]
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assign
    #[inline]
    #[must_use]
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(Some(assignee.into()));
        self
    }

    /// Unassign
    #[inline]
    #[must_use]
    pub fn unassign(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Set state
    #[inline]
    #[must_use]
    pub fn state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set due date
    #[inline]
    #[must_use]
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clear due date
    #[inline]
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Check if no field is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
