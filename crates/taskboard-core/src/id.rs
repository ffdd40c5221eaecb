//! Opaque entity identifiers
//!
//! Identifiers are UUID v4 strings when generated here, but any string read
//! back from a stored document is accepted verbatim.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate new random identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Borrow as string slice
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short display form (first 8 characters)
            #[inline]
            #[must_use]
            pub fn short(&self) -> &str {
                self.0.get(..8).unwrap_or(&self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Unique user identifier
    UserId
);
entity_id!(
    /// Unique task identifier
    TaskId
);
entity_id!(
    /// Unique column identifier
    ColumnId
);
entity_id!(
    /// Unique project identifier
    ProjectId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn short_form_handles_short_ids() {
        let id = TaskId::from("abc");
        assert_eq!(id.short(), "abc");

        let id = TaskId::from("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ProjectId::from("p-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");
        let back: ProjectId = serde_json::from_str("\"p-1\"").unwrap();
        assert_eq!(back, id);
    }
}
