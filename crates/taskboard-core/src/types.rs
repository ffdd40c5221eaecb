//! Task priority and workflow state
//!
//! Both enums are written to the document with their historical Spanish
//! labels (`Urgente`, `En Progreso`, ...) so existing files keep loading.
//! English spellings are accepted on read and from user input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::ModelError;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority (default)
    #[default]
    Medium,
    /// High priority
    High,
    /// Urgent priority
    Urgent,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Label stored in the document
    #[inline]
    #[must_use]
    pub fn wire_label(&self) -> &'static str {
        match self {
            Priority::Low => "Baja",
            Priority::Medium => "Media",
            Priority::High => "Alta",
            Priority::Urgent => "Urgente",
        }
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Ok(Priority::Low),
            "medium" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            "urgent" | "urgente" => Ok(Priority::Urgent),
            _ => Err(ModelError::UnknownPriority(s.to_string())),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Priority::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "unknown priority in record, using default");
            Priority::default()
        }))
    }
}

/// Task workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TaskState {
    /// Not started (default)
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Waiting on something else
    Blocked,
}

impl TaskState {
    /// All states in workflow order
    pub const ALL: [TaskState; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Blocked,
    ];

    /// Label stored in the document
    #[inline]
    #[must_use]
    pub fn wire_label(&self) -> &'static str {
        match self {
            TaskState::Pending => "Pendiente",
            TaskState::InProgress => "En Progreso",
            TaskState::Completed => "Completada",
            TaskState::Blocked => "Bloqueada",
        }
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::Pending => "Pending",
            TaskState::InProgress => "In Progress",
            TaskState::Completed => "Completed",
            TaskState::Blocked => "Blocked",
        }
    }

    /// Check if state counts toward progress
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, TaskState::Completed)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match normalized.as_str() {
            "pending" | "pendiente" | "todo" => Ok(TaskState::Pending),
            "inprogress" | "enprogreso" | "doing" => Ok(TaskState::InProgress),
            "completed" | "completada" | "done" => Ok(TaskState::Completed),
            "blocked" | "bloqueada" => Ok(TaskState::Blocked),
            _ => Err(ModelError::UnknownState(s.to_string())),
        }
    }
}

impl Serialize for TaskState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_label())
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(TaskState::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "unknown task state in record, using default");
            TaskState::default()
        }))
    }
}
