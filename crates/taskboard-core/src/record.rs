//! Structured record conversion
//!
//! A record is a plain `serde_json::Value`: a map of string keys to
//! primitives, nested records, and sequences thereof. Entities convert to
//! and from records symmetrically; reads fill missing optional fields with
//! defaults so documents written by earlier versions still load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;

/// Entity that round-trips through a structured record
pub trait Record: Serialize + DeserializeOwned {
    /// Entity kind, used in errors and logs
    const KIND: &'static str;

    /// Record key holding the identifier
    const ID_KEY: &'static str;

    /// Identifier of this entity
    fn record_id(&self) -> &str;

    /// Convert to structured record
    ///
    /// # Errors
    /// Returns `ModelError::InvalidRecord` if serialization fails
    fn to_record(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|source| ModelError::InvalidRecord {
            kind: Self::KIND,
            source,
        })
    }

    /// Build from structured record
    ///
    /// # Errors
    /// Returns `ModelError::InvalidRecord` if a required field is missing
    /// or has the wrong type
    fn from_record(record: &Value) -> Result<Self, ModelError> {
        let mut entity = Self::deserialize(record).map_err(|source| ModelError::InvalidRecord {
            kind: Self::KIND,
            source,
        })?;
        entity.repair();
        Ok(entity)
    }

    /// Restore invariants a stored record may violate
    fn repair(&mut self) {}
}

/// Read the identifier of a raw record, if present
///
/// Falls back to a plain `id` key for records written with English field
/// names.
#[must_use]
pub fn raw_record_id<'a>(record: &'a Value, id_key: &str) -> Option<&'a str> {
    record
        .get(id_key)
        .or_else(|| record.get("id"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_record_id_prefers_named_key() {
        let record = json!({ "tarea_id": "t-1", "id": "other" });
        assert_eq!(raw_record_id(&record, "tarea_id"), Some("t-1"));

        let record = json!({ "id": "t-2" });
        assert_eq!(raw_record_id(&record, "tarea_id"), Some("t-2"));

        let record = json!({ "tarea_id": 7 });
        assert_eq!(raw_record_id(&record, "tarea_id"), None);
    }
}
