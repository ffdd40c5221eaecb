//! Projects: columns, members and the tasks they hold

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{require_text, ModelError};
use crate::id::{ColumnId, ProjectId, TaskId, UserId};
use crate::lenient;
use crate::record::Record;
use crate::task::Task;
use crate::time::{self, lenient_timestamp, Timestamp};

/// Columns every new project starts with, in order
pub const DEFAULT_COLUMNS: [&str; 3] = ["Pending", "In Progress", "Completed"];

/// Kanban project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "proyecto_id", alias = "id", default)]
    id: ProjectId,
    #[serde(rename = "nombre", alias = "name")]
    name: String,
    #[serde(rename = "descripcion", alias = "description", default, deserialize_with = "lenient::null_as_default")]
    description: String,
    #[serde(rename = "propietario_id", alias = "owner_id", default)]
    owner: Option<UserId>,
    #[serde(rename = "columnas", alias = "columns", default, deserialize_with = "lenient::null_as_default")]
    columns: Vec<Column>,
    #[serde(rename = "miembros", alias = "members", default, deserialize_with = "lenient::null_as_default")]
    members: IndexSet<UserId>,
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
}

impl Project {
    /// Create new project with the default columns
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = require_text(name, "project name")?;
        let now = time::now();
        let mut project = Self {
            id: ProjectId::new(),
            name,
            description: String::new(),
            owner: None,
            columns: Vec::with_capacity(DEFAULT_COLUMNS.len()),
            members: IndexSet::new(),
            created_at: now,
            modified_at: now,
        };
        for name in DEFAULT_COLUMNS {
            project.add_column(name)?;
        }
        Ok(project)
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// With owner
    #[inline]
    #[must_use]
    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Project identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Project name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description (empty when unset)
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Owner identifier, not checked against stored users
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
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

    // Columns

    /// Append column; its order is the current column count
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the name is blank
    pub fn add_column(&mut self, name: impl Into<String>) -> Result<&mut Column, ModelError> {
        let order = u32::try_from(self.columns.len()).unwrap_or(u32::MAX);
        let column = Column::new(name, order)?;
        self.touch();
        let idx = self.columns.len();
        self.columns.push(column);
        Ok(&mut self.columns[idx])
    }

    /// Remove column and every task in it
    ///
    /// Returns `false` if no column has this id. Other columns keep their
    /// order values.
    pub fn remove_column(&mut self, id: &ColumnId) -> bool {
        let Some(pos) = self.columns.iter().position(|c| c.id() == id) else {
            return false;
        };
        let removed = self.columns.remove(pos);
        tracing::debug!(
            column = %removed.id(),
            tasks = removed.task_count(),
            "column removed with its tasks"
        );
        self.touch();
        true
    }

    /// Get column by id
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Get mutable column by id
    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id() == id)
    }

    /// First column whose name matches, ignoring case
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        let name = name.trim().to_lowercase();
        self.sorted_columns()
            .into_iter()
            .find(|c| c.name().to_lowercase() == name)
    }

    /// Columns in insertion order
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns sorted by order, ties kept in insertion order
    #[must_use]
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order());
        columns
    }

    // Members

    /// Add member; returns `false` if already present
    pub fn add_member(&mut self, user: UserId) -> bool {
        if !self.members.insert(user) {
            return false;
        }
        self.touch();
        true
    }

    /// Remove member; returns `false` if absent
    pub fn remove_member(&mut self, user: &UserId) -> bool {
        if !self.members.shift_remove(user) {
            return false;
        }
        self.touch();
        true
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn is_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Members in insertion order
    pub fn members(&self) -> impl Iterator<Item = &UserId> {
        self.members.iter()
    }

    // Tasks

    /// All tasks, column order then task order
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.sorted_columns()
            .into_iter()
            .flat_map(|c| c.tasks().iter())
    }

    /// Total tasks across all columns
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::task_count).sum()
    }

    /// Add task to a column
    ///
    /// Returns `false` if the column is unknown or already holds the task.
    pub fn add_task(&mut self, column: &ColumnId, task: Task) -> bool {
        let added = self
            .column_mut(column)
            .is_some_and(|c| c.add_task(task));
        if added {
            self.touch();
        }
        added
    }

    /// Find task and the column holding it
    #[must_use]
    pub fn locate_task(&self, id: &TaskId) -> Option<(&Column, &Task)> {
        self.columns
            .iter()
            .find_map(|c| c.task(id).map(|t| (c, t)))
    }

    /// Get mutable task by id from any column
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.columns.iter_mut().find_map(|c| c.task_mut(id))
    }

    /// Move task to another column, appending it there
    ///
    /// Returns `false` if the task or the destination column is unknown.
    /// Moving a task to the column it is already in leaves it in place.
    pub fn move_task(&mut self, id: &TaskId, to: &ColumnId) -> bool {
        let Some((from, _)) = self.locate_task(id) else {
            return false;
        };
        if from.id() == to {
            return true;
        }
        if self.column(to).is_none() {
            return false;
        }
        let Some(task) = self.remove_task(id) else {
            return false;
        };
        self.add_task(to, task)
    }

    /// Remove task from whichever column holds it
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let task = self.columns.iter_mut().find_map(|c| c.remove_task(id))?;
        self.touch();
        Some(task)
    }

    /// Case-insensitive search over task titles and descriptions
    ///
    /// # Errors
    /// Returns `ModelError::EmptySearchTerm` if the term is blank
    pub fn search_tasks(&self, term: &str) -> Result<Vec<(&Column, &Task)>, ModelError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ModelError::EmptySearchTerm);
        }
        Ok(self
            .sorted_columns()
            .into_iter()
            .flat_map(|c| c.tasks().iter().map(move |t| (c, t)))
            .filter(|(_, t)| t.matches_lowercase(&needle))
            .collect())
    }

    fn touch(&mut self) {
        self.modified_at = time::now().max(self.created_at);
    }
}

impl Record for Project {
    const KIND: &'static str = "project";
    const ID_KEY: &'static str = "proyecto_id";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn repair(&mut self) {
        if self.modified_at < self.created_at {
            tracing::warn!(project = %self.id, "modification time before creation, clamping");
            self.modified_at = self.created_at;
        }
        self.columns.iter_mut().for_each(Record::repair);
    }
}
