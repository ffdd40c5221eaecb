//! Taskboard Storage - whole-document JSON persistence
//!
//! All users and projects live in one JSON file. [`StorageManager`] loads it
//! tolerantly, upserts one entity at a time, and rewrites the whole file on
//! every save.
//!
//! # Example
//!
//! ```rust,no_run
//! use taskboard_core::{Project, User};
//! use taskboard_storage::StorageManager;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = StorageManager::new("data/projects.json");
//! storage.save_user(&User::new("Ana", "ana@x.com")?)?;
//! storage.save_project(&Project::new("Demo")?)?;
//! assert_eq!(storage.load_projects().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod manager;

pub use config::{StorageConfig, DEFAULT_DATA_FILE};
pub use document::{Collection, Document, Session};
pub use error::{ConfigError, StorageError};
pub use manager::StorageManager;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with storage
    pub use crate::{Session, StorageConfig, StorageError, StorageManager};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use taskboard_core::{Project, User};

    #[test]
    fn manager_from_config_round_trips_entities() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new().with_data_file(dir.path().join("board.json"));
        let storage = StorageManager::from_config(&config);

        let user = User::new("Ana", "ana@x.com").unwrap();
        let project = Project::new("Demo").unwrap().with_owner(user.id().clone());
        storage.save_user(&user).unwrap();
        storage.save_project(&project).unwrap();

        assert_eq!(storage.load_users(), vec![user]);
        assert_eq!(storage.load_project(project.id()), Some(project));
    }
}
