//! Users

use serde::{Deserialize, Serialize};

use crate::error::{require_text, ModelError};
use crate::id::UserId;
use crate::record::Record;
use crate::time::{self, lenient_timestamp, Timestamp};

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "usuario_id", alias = "id")]
    id: UserId,
    #[serde(rename = "nombre", alias = "name")]
    name: String,
    email: String,
    #[serde(
        rename = "fecha_creacion",
        alias = "created_at",
        default = "time::now",
        with = "lenient_timestamp"
    )]
    created_at: Timestamp,
}

impl User {
    /// Create new user with a fresh identifier
    ///
    /// # Errors
    /// - `ModelError::EmptyField` if the name is blank
    /// - `ModelError::InvalidEmail` if the email is malformed
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ModelError> {
        let name = require_text(name, "user name")?;
        let email = email.into().trim().to_string();
        if !is_valid_email(&email) {
            return Err(ModelError::InvalidEmail(email));
        }
        Ok(Self {
            id: UserId::new(),
            name,
            email,
            created_at: time::now(),
        })
    }

    /// User identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Creation timestamp
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Check if this user has the given email, ignoring ASCII case
    #[inline]
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Record for User {
    const KIND: &'static str = "user";
    const ID_KEY: &'static str = "usuario_id";

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Email must contain "@" and a "." somewhere after it
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email
        .split('@')
        .nth(1)
        .is_some_and(|domain| domain.contains('.'))
}
