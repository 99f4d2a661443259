//! Account and profile domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ACCOUNT_AGE, MIN_ACCOUNT_AGE};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a login identity in the ledger.
///
/// The account number is server-generated and stable; it is never reused,
/// even after deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: i64,
    pub username: String,
    /// Opaque secret, compared verbatim. Hashing is out of scope.
    pub credential: String,
    pub is_admin: bool,
}

/// Result of a successful credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    pub account_number: i64,
    pub is_admin: bool,
}

/// Read-only join of an account and its profile, used by listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_number: i64,
    pub username: String,
    pub name: String,
    pub balance: Decimal,
    pub age: i32,
}

/// Input model for opening a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    pub credential: String,
    pub name: String,
    pub age: i32,
    pub is_admin: bool,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Username cannot be empty".to_string(),
            )));
        }
        if self.credential.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Credential cannot be empty".to_string(),
            )));
        }
        if self.age < MIN_ACCOUNT_AGE || self.age > MAX_ACCOUNT_AGE {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Age must be between {} and {}",
                MIN_ACCOUNT_AGE, MAX_ACCOUNT_AGE
            ))));
        }
        Ok(())
    }
}

/// Input model for updating an account's credential and/or profile name.
///
/// Absent or empty fields are no-ops, not set-to-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ProfileUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Username cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Collapses empty strings into `None` so they are treated as no-ops.
    pub fn normalized(mut self) -> Self {
        if matches!(self.credential.as_deref(), Some("")) {
            self.credential = None;
        }
        if matches!(self.name.as_deref(), Some("")) {
            self.name = None;
        }
        self
    }

    /// True when neither field would change anything.
    pub fn is_noop(&self) -> bool {
        self.credential.is_none() && self.name.is_none()
    }
}
