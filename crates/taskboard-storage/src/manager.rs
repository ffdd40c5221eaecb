//! Whole-document storage manager
//!
//! Every save reloads the document from disk, upserts one entity, and
//! rewrites the entire file through a temporary sibling that is renamed
//! into place. Loads never fail: a missing, unreadable or corrupt file is
//! logged and treated as an empty document.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use taskboard_core::{Project, ProjectId, Record, User, UserId};

use crate::config::StorageConfig;
use crate::document::{Collection, Document, Session};
use crate::error::StorageError;

/// Owner of the persisted document
#[derive(Debug, Clone)]
pub struct StorageManager {
    path: PathBuf,
    pretty: bool,
}

impl StorageManager {
    /// Create manager for the document at `path`
    ///
    /// The parent directory is created if missing; the file itself is only
    /// written on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(dir) = parent_dir(&path) {
            if let Err(err) = std::fs::create_dir_all(dir) {
                tracing::warn!(dir = %dir.display(), error = %err, "could not create data directory");
            }
        }
        Self { path, pretty: true }
    }

    /// Create manager from config
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.data_file.clone()).with_pretty(config.pretty)
    }

    /// With pretty printing
    #[inline]
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Path of the document
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Loading

    /// Load the whole document, falling back to empty on any failure
    #[must_use]
    pub fn load_document(&self) -> Document {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no document yet");
                return Document::empty();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read document, using empty");
                return Document::empty();
            }
        };
        let value = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "document is not valid JSON, using empty");
                return Document::empty();
            }
        };
        Document::from_value(value).unwrap_or_else(|| {
            tracing::warn!(path = %self.path.display(), "document is not a JSON object, using empty");
            Document::empty()
        })
    }

    /// Load every user that parses; malformed entries are skipped
    #[must_use]
    pub fn load_users(&self) -> Vec<User> {
        parse_all(self.load_document().users())
    }

    /// Load every project that parses; malformed entries are skipped
    #[must_use]
    pub fn load_projects(&self) -> Vec<Project> {
        parse_all(self.load_document().projects())
    }

    /// Load one user by id
    #[must_use]
    pub fn load_user(&self, id: &UserId) -> Option<User> {
        find_one(self.load_document().users(), id.as_str())
    }

    /// Load one project by id
    #[must_use]
    pub fn load_project(&self, id: &ProjectId) -> Option<Project> {
        find_one(self.load_document().projects(), id.as_str())
    }

    /// Load persisted current-user / current-project pointers
    #[must_use]
    pub fn load_session(&self) -> Session {
        self.load_document().session()
    }

    // Saving

    /// Insert or replace a user
    ///
    /// # Errors
    /// - `StorageError::DuplicateEmail` if a different stored user has the
    ///   same email; nothing is written
    /// - `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let mut doc = self.load_document();
        let taken = doc.users().iter().any(|entry| {
            let same_email = entry
                .get("email")
                .and_then(Value::as_str)
                .is_some_and(|email| user.has_email(email));
            same_email && taskboard_core::raw_record_id(entry, User::ID_KEY) != Some(user.record_id())
        });
        if taken {
            tracing::debug!(email = user.email(), "rejecting duplicate email");
            return Err(StorageError::DuplicateEmail(user.email().to_string()));
        }
        doc.upsert(Collection::Users, user)?;
        self.save_document(doc)
    }

    /// Insert or replace a project
    ///
    /// # Errors
    /// Returns `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn save_project(&self, project: &Project) -> Result<(), StorageError> {
        let mut doc = self.load_document();
        doc.upsert(Collection::Projects, project)?;
        self.save_document(doc)
    }

    /// Delete a user and clear the current-user pointer if it referenced it
    ///
    /// Returns `false` if no user had this id; the file is rewritten either way.
    ///
    /// # Errors
    /// Returns `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn delete_user(&self, id: &UserId) -> Result<bool, StorageError> {
        let mut doc = self.load_document();
        let removed = doc.remove(Collection::Users, id.as_str());
        let mut session = doc.session();
        if session.forget_user(id) {
            doc.set_session(&session);
        }
        self.save_document(doc)?;
        if removed > 0 {
            tracing::info!(user = %id, "user deleted");
        }
        Ok(removed > 0)
    }

    /// Delete a project and clear the current-project pointer if it referenced it
    ///
    /// # Errors
    /// Returns `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn delete_project(&self, id: &ProjectId) -> Result<bool, StorageError> {
        let mut doc = self.load_document();
        let removed = doc.remove(Collection::Projects, id.as_str());
        let mut session = doc.session();
        if session.forget_project(id) {
            doc.set_session(&session);
        }
        self.save_document(doc)?;
        if removed > 0 {
            tracing::info!(project = %id, "project deleted");
        }
        Ok(removed > 0)
    }

    /// Persist current-user / current-project pointers
    ///
    /// # Errors
    /// Returns `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let mut doc = self.load_document();
        doc.set_session(session);
        self.save_document(doc)
    }

    /// Rewrite the whole document
    ///
    /// # Errors
    /// Returns `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn save_document(&self, doc: Document) -> Result<(), StorageError> {
        self.save_raw(&doc.into_value())
    }

    /// Rewrite the whole document from raw JSON after a shape check
    ///
    /// # Errors
    /// - `StorageError::InvalidDocument` if `value` is not an object with
    ///   `usuarios` and `proyectos` arrays; the file is left untouched
    /// - `StorageError::Io` / `StorageError::Serialize` if the write fails
    pub fn save_raw(&self, value: &Value) -> Result<(), StorageError> {
        Document::validate(value)?;
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        bytes.push(b'\n');
        self.atomic_write(&bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "document saved");
        Ok(())
    }

    /// Write `data` to a temporary sibling, then rename it over the document
    fn atomic_write(&self, data: &[u8]) -> Result<(), StorageError> {
        let dir = parent_dir(&self.path).unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io_error(dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StorageError::io_error(dir, e))?;
        tmp.write_all(data)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io_error(&self.path, e.error))?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn parse_all<R: Record>(entries: &[Value]) -> Vec<R> {
    entries
        .iter()
        .filter_map(|entry| match R::from_record(entry) {
            Ok(entity) => Some(entity),
            Err(err) => {
                tracing::warn!(kind = R::KIND, error = %err, "skipping malformed record");
                None
            }
        })
        .collect()
}

fn find_one<R: Record>(entries: &[Value], id: &str) -> Option<R> {
    let entry = entries
        .iter()
        .find(|e| taskboard_core::raw_record_id(e, R::ID_KEY) == Some(id))?;
    R::from_record(entry)
        .map_err(|err| tracing::warn!(kind = R::KIND, id, error = %err, "stored record is malformed"))
        .ok()
}
