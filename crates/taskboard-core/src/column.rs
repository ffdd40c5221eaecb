//! Kanban columns

use serde::{Deserialize, Serialize};

use crate::error::{require_text, ModelError};
use crate::id::{ColumnId, TaskId};
use crate::lenient;
use crate::record::Record;
use crate::task::Task;
use crate::time::{self, lenient_timestamp, Timestamp};

/// Named, ordered bucket of tasks within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "columna_id", alias = "id", default)]
    id: ColumnId,
    #[serde(rename = "nombre", alias = "name")]
    name: String,
    #[serde(rename = "orden", alias = "order", default, deserialize_with = "lenient::column_order")]
    order: u32,
    #[serde(rename = "tareas", alias = "tasks", default, deserialize_with = "lenient::null_as_default")]
    tasks: Vec<Task>,
    #[serde(
        rename = "fecha_creacion",
        alias = "created_at",
        default = "time::now",
        with = "lenient_timestamp"
    )]
    created_at: Timestamp,
}

impl Column {
    /// Create new empty column
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the name is blank
    pub fn new(name: impl Into<String>, order: u32) -> Result<Self, ModelError> {
        Ok(Self {
            id: ColumnId::new(),
            name: require_text(name, "column name")?,
            order,
            tasks: Vec::new(),
            created_at: time::now(),
        })
    }

    /// Column identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit sort position
    #[inline]
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Rename column
    ///
    /// # Errors
    /// Returns `ModelError::EmptyField` if the new name is blank
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        self.name = require_text(name, "column name")?;
        Ok(())
    }

    /// Append task
    ///
    /// Returns `false` and drops nothing from the column if a task with the
    /// same identifier is already here.
    pub fn add_task(&mut self, task: Task) -> bool {
        if self.task(task.id()).is_some() {
            tracing::debug!(task = %task.id(), column = %self.id, "task already in column");
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Remove task by id, preserving the order of the rest
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id() == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Get task by id
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Get mutable task by id
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// Tasks in insertion order
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks
    #[inline]
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Check if column has no tasks
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Record for Column {
    const KIND: &'static str = "column";
    const ID_KEY: &'static str = "columna_id";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn repair(&mut self) {
        self.tasks.iter_mut().for_each(Record::repair);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use serde_json::json;

    #[test]
    fn column_requires_name() {
        assert!(Column::new("", 0).is_err());
        let col = Column::new(" Review ", 3).unwrap();
        assert_eq!(col.name(), "Review");
        assert_eq!(col.order(), 3);
        assert!(col.is_empty());
    }

    #[test]
    fn tasks_keep_insertion_order() {
        let mut col = Column::new("Todo", 0).unwrap();
        let titles = ["c", "a", "b"];
        for title in titles {
            assert!(col.add_task(Task::new(title).unwrap()));
        }
        let got: Vec<_> = col.tasks().iter().map(Task::title).collect();
        assert_eq!(got, titles);
        assert_eq!(col.task_count(), 3);
    }

    #[test]
    fn add_task_rejects_same_task_twice() {
        let mut col = Column::new("Todo", 0).unwrap();
        let task = Task::new("once").unwrap();
        assert!(col.add_task(task.clone()));
        assert!(!col.add_task(task));
        assert_eq!(col.task_count(), 1);
    }

    #[test]
    fn remove_missing_task_is_none() {
        let mut col = Column::new("Todo", 0).unwrap();
        let task = Task::new("x").unwrap();
        let id = task.id().clone();
        col.add_task(task);

        assert!(col.remove_task(&TaskId::from("nope")).is_none());
        assert_eq!(col.remove_task(&id).map(|t| t.title().to_string()), Some("x".into()));
        assert!(col.task(&id).is_none());
    }

    #[test]
    fn rename_validates() {
        let mut col = Column::new("Todo", 0).unwrap();
        assert!(col.rename("  ").is_err());
        assert_eq!(col.name(), "Todo");
        col.rename("Backlog").unwrap();
        assert_eq!(col.name(), "Backlog");
    }

    #[test]
    fn record_round_trip_with_tasks() {
        let mut col = Column::new("Doing", 1).unwrap();
        col.add_task(Task::new("a").unwrap().with_priority(Priority::High));
        col.add_task(Task::new("b").unwrap());

        let record = col.to_record().unwrap();
        assert_eq!(record["orden"], json!(1));
        assert_eq!(record["tareas"].as_array().map(Vec::len), Some(2));
        assert_eq!(Column::from_record(&record).unwrap(), col);
    }

    #[test]
    fn from_record_defaults_order_and_tasks() {
        let col = Column::from_record(&json!({ "columna_id": "c1", "nombre": "Old" })).unwrap();
        assert_eq!(col.order(), 0);
        assert!(col.is_empty());
    }
}
