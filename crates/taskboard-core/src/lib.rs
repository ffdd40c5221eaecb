//! Taskboard Core - entity model for a local kanban board
//!
//! Defines the four entities and their invariants:
//! - [`User`]: name and unique email
//! - [`Project`]: owns ordered [`Column`]s and a member set
//! - [`Column`]: ordered bucket of [`Task`]s
//! - [`Task`]: title, priority, state, assignee, due date, labels
//!
//! Every entity converts to and from a plain JSON record through the
//! [`Record`] trait. Reads are tolerant: missing optional fields fall back to
//! defaults so older documents keep loading.
//!
//! # Example
//!
//! ```rust
//! use taskboard_core::prelude::*;
//!
//! let mut project = Project::new("Demo")?;
//! let pending = project.column_by_name("Pending").map(|c| c.id().clone());
//! if let Some(pending) = pending {
//!     project.add_task(&pending, Task::new("Write spec")?.with_priority(Priority::Urgent));
//! }
//! assert_eq!(project.task_count(), 1);
//! # Ok::<(), taskboard_core::ModelError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod column;
pub mod error;
pub mod id;
mod lenient;
pub mod project;
pub mod record;
pub mod stats;
pub mod task;
pub mod time;
pub mod types;
pub mod user;

pub use column::Column;
pub use error::ModelError;
pub use id::{ColumnId, ProjectId, TaskId, UserId};
pub use project::{Project, DEFAULT_COLUMNS};
pub use record::{raw_record_id, Record};
pub use stats::{percent_of, AssigneeCounts, ColumnCount, ProjectStats};
pub use task::{Task, TaskUpdate};
pub use time::{parse_due_date, Timestamp};
pub use types::{Priority, TaskState};
pub use user::{is_valid_email, User};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the entity model
    pub use crate::{
        Column, ColumnId, ModelError, Priority, Project, ProjectId, Record, Task, TaskId,
        TaskState, TaskUpdate, User, UserId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
