//! Database models for accounts and profiles.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tellerd_core::accounts::Account;

/// Database model for accounts
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(primary_key(account_number))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub account_number: i64,
    pub username: String,
    pub credential: String,
    pub is_admin: bool,
}

/// Insert model for accounts; the account number is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccountRow {
    pub username: String,
    pub credential: String,
    pub is_admin: bool,
}

/// Database model for profiles. The balance is stored as TEXT and decoded
/// to a `Decimal` at the boundary.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(primary_key(account_number))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileDB {
    pub account_number: i64,
    pub name: String,
    pub age: i32,
    pub balance: String,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            account_number: db.account_number,
            username: db.username,
            credential: db.credential,
            is_admin: db.is_admin,
        }
    }
}
