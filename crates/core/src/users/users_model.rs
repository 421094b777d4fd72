//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A registered ledger user. Only the salted password hash is ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Authenticated identity on whose behalf bet records are scoped.
///
/// Passed explicitly into every record-store and aggregation call; there is
/// no ambient current-user state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

/// Registration input. The plaintext password never leaves the service layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        Ok(())
    }

    /// Username with surrounding whitespace removed.
    pub fn normalized_username(&self) -> String {
        self.username.trim().to_string()
    }
}
