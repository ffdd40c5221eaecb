//! The persisted JSON document
//!
//! Canonical shape:
//!
//! ```json
//! { "usuarios": [ ... ], "proyectos": [ ... ] }
//! ```
//!
//! The alternate shape additionally carries `usuario_actual_id` and
//! `proyecto_actual_id`. Entries are kept as raw JSON so that records this
//! version cannot parse survive a rewrite untouched.

use serde_json::{Map, Value};
use taskboard_core::{raw_record_id, Project, ProjectId, Record, User, UserId};

use crate::error::StorageError;

/// Key of the user array
pub const USERS_KEY: &str = "usuarios";
/// Key of the project array
pub const PROJECTS_KEY: &str = "proyectos";
/// Key of the persisted current-user pointer
pub const CURRENT_USER_KEY: &str = "usuario_actual_id";
/// Key of the persisted current-project pointer
pub const CURRENT_PROJECT_KEY: &str = "proyecto_actual_id";

/// Currently selected user and project
///
/// Owned by the front end. Storage only persists it; nothing in the entity
/// model depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Selected user
    pub current_user: Option<UserId>,
    /// Selected project
    pub current_project: Option<ProjectId>,
}

impl Session {
    /// Clear the user pointer if it references `id`
    pub fn forget_user(&mut self, id: &UserId) -> bool {
        if self.current_user.as_ref() == Some(id) {
            self.current_user = None;
            return true;
        }
        false
    }

    /// Clear the project pointer if it references `id`
    pub fn forget_project(&mut self, id: &ProjectId) -> bool {
        if self.current_project.as_ref() == Some(id) {
            self.current_project = None;
            return true;
        }
        false
    }
}

/// Entity array within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// `usuarios`
    Users,
    /// `proyectos`
    Projects,
}

impl Collection {
    /// Document key of this array
    #[inline]
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => USERS_KEY,
            Self::Projects => PROJECTS_KEY,
        }
    }

    /// Record key holding each entry's id
    #[inline]
    #[must_use]
    pub fn id_key(self) -> &'static str {
        match self {
            Self::Users => User::ID_KEY,
            Self::Projects => Project::ID_KEY,
        }
    }

    fn alias(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Projects => "projects",
        }
    }
}

/// Whole persisted document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    users: Vec<Value>,
    projects: Vec<Value>,
    /// Selection pointers and any keys this version does not know
    extra: Map<String, Value>,
}

impl Document {
    /// Create empty document
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from parsed JSON, repairing what can be repaired
    ///
    /// Missing arrays become empty, English top-level keys are accepted, and
    /// a non-object value yields `None`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut root) = value else {
            return None;
        };
        let mut take = |collection: Collection| {
            let primary = root.remove(collection.key());
            let alias = root.remove(collection.alias());
            if primary.is_some() && alias.is_some() {
                tracing::warn!(
                    key = collection.key(),
                    alias = collection.alias(),
                    "document holds both keys, dropping the alias"
                );
            }
            match primary.or(alias) {
                Some(Value::Array(entries)) => entries,
                Some(_) => {
                    tracing::warn!(key = collection.key(), "document entry is not an array, treating as empty");
                    Vec::new()
                }
                None => Vec::new(),
            }
        };
        let users = take(Collection::Users);
        let projects = take(Collection::Projects);
        Some(Self {
            users,
            projects,
            extra: root,
        })
    }

    /// Check the minimal shape required before a write
    ///
    /// # Errors
    /// Returns `StorageError::InvalidDocument` unless `value` is an object
    /// holding `usuarios` and `proyectos` arrays
    pub fn validate(value: &Value) -> Result<(), StorageError> {
        let Some(root) = value.as_object() else {
            return Err(StorageError::InvalidDocument("top level is not an object"));
        };
        if !root.get(USERS_KEY).is_some_and(Value::is_array) {
            return Err(StorageError::InvalidDocument("missing 'usuarios' array"));
        }
        if !root.get(PROJECTS_KEY).is_some_and(Value::is_array) {
            return Err(StorageError::InvalidDocument("missing 'proyectos' array"));
        }
        Ok(())
    }

    /// Raw user records
    #[inline]
    #[must_use]
    pub fn users(&self) -> &[Value] {
        &self.users
    }

    /// Raw project records
    #[inline]
    #[must_use]
    pub fn projects(&self) -> &[Value] {
        &self.projects
    }

    /// Insert or replace an entity by id, keeping its position
    ///
    /// # Errors
    /// Returns `StorageError::Model` if the entity cannot be converted
    pub fn upsert<R: Record>(&mut self, collection: Collection, entity: &R) -> Result<(), StorageError> {
        let record = entity.to_record()?;
        let id = entity.record_id();
        let entries = self.entries_mut(collection);
        match entries
            .iter()
            .position(|e| raw_record_id(e, collection.id_key()) == Some(id))
        {
            Some(pos) => {
                tracing::debug!(kind = R::KIND, id, "replacing record");
                entries[pos] = record;
            }
            None => {
                tracing::debug!(kind = R::KIND, id, "appending record");
                entries.push(record);
            }
        }
        Ok(())
    }

    /// Remove every entry with this id; returns how many were removed
    pub fn remove(&mut self, collection: Collection, id: &str) -> usize {
        let entries = self.entries_mut(collection);
        let before = entries.len();
        entries.retain(|e| raw_record_id(e, collection.id_key()) != Some(id));
        before - entries.len()
    }

    /// Persisted selection pointers
    #[must_use]
    pub fn session(&self) -> Session {
        let pointer = |key: &str| self.extra.get(key).and_then(Value::as_str).map(str::to_string);
        Session {
            current_user: pointer(CURRENT_USER_KEY).map(UserId::from),
            current_project: pointer(CURRENT_PROJECT_KEY).map(ProjectId::from),
        }
    }

    /// Store selection pointers; unset pointers are omitted
    pub fn set_session(&mut self, session: &Session) {
        let pointers = [
            (CURRENT_USER_KEY, session.current_user.as_ref().map(UserId::as_str)),
            (
                CURRENT_PROJECT_KEY,
                session.current_project.as_ref().map(ProjectId::as_str),
            ),
        ];
        for (key, value) in pointers {
            match value {
                Some(id) => {
                    self.extra.insert(key.to_string(), Value::String(id.to_string()));
                }
                None => {
                    self.extra.remove(key);
                }
            }
        }
    }

    /// Check if a top-level key other than the two arrays is present
    #[inline]
    #[must_use]
    pub fn has_extra_key(&self, key: &str) -> bool {
        self.extra.contains_key(key)
    }

    /// Convert into JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut root = self.extra;
        root.insert(USERS_KEY.to_string(), Value::Array(self.users));
        root.insert(PROJECTS_KEY.to_string(), Value::Array(self.projects));
        Value::Object(root)
    }

    fn entries_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Projects => &mut self.projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_shape() {
        let value = Document::empty().into_value();
        assert_eq!(value, json!({ "usuarios": [], "proyectos": [] }));
        assert!(Document::validate(&value).is_ok());
    }

    #[test]
    fn from_value_repairs_missing_and_aliased_keys() {
        let doc = Document::from_value(json!({ "users": [{ "id": "u" }] })).unwrap();
        assert_eq!(doc.users().len(), 1);
        assert!(doc.projects().is_empty());

        let doc = Document::from_value(json!({ "usuarios": 5, "proyectos": [] })).unwrap();
        assert!(doc.users().is_empty());

        assert!(Document::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn both_key_spellings_collapse_to_one() {
        let doc = Document::from_value(json!({
            "usuarios": [{ "usuario_id": "kept" }],
            "users": [{ "id": "dropped" }],
            "proyectos": [],
            "projects": []
        }))
        .unwrap();
        assert_eq!(doc.users().len(), 1);
        assert!(!doc.has_extra_key("users"));
        assert!(!doc.has_extra_key("projects"));
        assert_eq!(
            doc.into_value(),
            json!({ "usuarios": [{ "usuario_id": "kept" }], "proyectos": [] })
        );
    }

    #[test]
    fn validate_rejects_bad_shapes() {
        assert!(Document::validate(&json!([])).is_err());
        assert!(Document::validate(&json!({ "usuarios": [] })).is_err());
        assert!(Document::validate(&json!({ "usuarios": {}, "proyectos": [] })).is_err());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut doc = Document::empty();
        let first = User::new("A", "a@x.com").unwrap();
        let second = User::new("B", "b@x.com").unwrap();
        doc.upsert(Collection::Users, &first).unwrap();
        doc.upsert(Collection::Users, &second).unwrap();
        doc.upsert(Collection::Users, &first).unwrap();

        let ids: Vec<_> = doc
            .users()
            .iter()
            .filter_map(|u| raw_record_id(u, "usuario_id"))
            .collect();
        assert_eq!(ids, [first.id().as_str(), second.id().as_str()]);
    }

    #[test]
    fn remove_drops_all_matches() {
        let mut doc = Document::from_value(json!({
            "usuarios": [{ "usuario_id": "x" }, { "usuario_id": "y" }, { "usuario_id": "x" }],
            "proyectos": []
        }))
        .unwrap();
        assert_eq!(doc.remove(Collection::Users, "x"), 2);
        assert_eq!(doc.remove(Collection::Users, "x"), 0);
        assert_eq!(doc.users().len(), 1);
    }

    #[test]
    fn session_pointers_round_trip() {
        let mut doc = Document::empty();
        assert_eq!(doc.session(), Session::default());

        let session = Session {
            current_user: Some(UserId::from("u1")),
            current_project: None,
        };
        doc.set_session(&session);
        assert_eq!(doc.session(), session);
        assert!(!doc.has_extra_key(CURRENT_PROJECT_KEY));

        doc.set_session(&Session::default());
        assert!(!doc.has_extra_key(CURRENT_USER_KEY));
    }

    #[test]
    fn session_forget_only_matching() {
        let mut session = Session {
            current_user: Some(UserId::from("u1")),
            current_project: Some(ProjectId::from("p1")),
        };
        assert!(!session.forget_user(&UserId::from("u2")));
        assert!(session.forget_user(&UserId::from("u1")));
        assert!(session.forget_project(&ProjectId::from("p1")));
        assert_eq!(session, Session::default());
    }
}
