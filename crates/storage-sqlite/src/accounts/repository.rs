use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{accounts, profiles, transaction_history};
use crate::utils::parse_stored_decimal;

use tellerd_core::accounts::{
    Account, AccountError, AccountRepositoryTrait, AccountSummary, NewAccount, ProfileUpdate,
};
use tellerd_core::Result;

use super::model::{AccountDB, NewAccountRow, ProfileDB};

/// Repository for managing account and profile data in the database.
///
/// Reads run on pooled connections; every mutation goes through the shared
/// writer handle so it executes inside the process-wide serial transaction
/// stream.
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    /// Creates the account row and its zero-balance profile in one
    /// transaction. The duplicate check and the inserts cannot interleave
    /// with another creation because the writer runs jobs serially.
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                // COLLATE NOCASE on the column makes this check, and the
                // UNIQUE constraint backing it, case-insensitive.
                let existing: Option<i64> = accounts::table
                    .filter(accounts::username.eq(&new_account.username))
                    .select(accounts::account_number)
                    .first::<i64>(conn)
                    .optional()
                    .into_core()?;
                if existing.is_some() {
                    return Err(AccountError::UsernameExists.into());
                }

                let row = NewAccountRow {
                    username: new_account.username.clone(),
                    credential: new_account.credential.clone(),
                    is_admin: new_account.is_admin,
                };
                let account_number: i64 = diesel::insert_into(accounts::table)
                    .values(&row)
                    .returning(accounts::account_number)
                    .get_result(conn)
                    .into_core()?;

                let profile = ProfileDB {
                    account_number,
                    name: new_account.name.clone(),
                    age: new_account.age,
                    balance: Decimal::ZERO.to_string(),
                };
                diesel::insert_into(profiles::table)
                    .values(&profile)
                    .execute(conn)
                    .into_core()?;

                Ok(Account {
                    account_number,
                    username: new_account.username,
                    credential: new_account.credential,
                    is_admin: new_account.is_admin,
                })
            })
            .await
    }

    /// Cascading delete: history rows and the profile go first to satisfy
    /// the foreign keys, then the account itself.
    async fn delete(&self, account_number: i64) -> Result<bool> {
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    transaction_history::table
                        .filter(transaction_history::account_number.eq(account_number)),
                )
                .execute(conn)
                .into_core()?;

                diesel::delete(profiles::table.find(account_number))
                    .execute(conn)
                    .into_core()?;

                let affected_rows = diesel::delete(accounts::table.find(account_number))
                    .execute(conn)
                    .into_core()?;

                Ok(affected_rows > 0)
            })
            .await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let account_number: Option<i64> = accounts::table
                    .filter(accounts::username.eq(&update.username))
                    .select(accounts::account_number)
                    .first::<i64>(conn)
                    .optional()
                    .into_core()?;
                let account_number = account_number.ok_or(AccountError::NotFound)?;

                if let Some(credential) = &update.credential {
                    diesel::update(accounts::table.find(account_number))
                        .set(accounts::credential.eq(credential))
                        .execute(conn)
                        .into_core()?;
                }

                if let Some(name) = &update.name {
                    diesel::update(profiles::table.find(account_number))
                        .set(profiles::name.eq(name))
                        .execute(conn)
                        .into_core()?;
                }

                Ok(())
            })
            .await
    }

    fn find_by_credentials(&self, username: &str, credential: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        // The username column collates NOCASE; the credential column does
        // not, so the secret comparison stays verbatim.
        let account = accounts::table
            .filter(accounts::username.eq(username))
            .filter(accounts::credential.eq(credential))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(account.map(Account::from))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(account.map(Account::from))
    }

    fn get_balance(&self, account_number: i64) -> Result<Option<Decimal>> {
        let mut conn = get_connection(&self.pool)?;

        let stored: Option<String> = profiles::table
            .find(account_number)
            .select(profiles::balance)
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;

        stored.map(|s| parse_stored_decimal(&s)).transpose()
    }

    /// Snapshot join of accounts and profiles. Accounts without a profile
    /// (the seeded admin) are intentionally absent.
    fn list_with_profiles(&self) -> Result<Vec<AccountSummary>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = accounts::table
            .inner_join(profiles::table)
            .select((
                accounts::account_number,
                accounts::username,
                profiles::name,
                profiles::balance,
                profiles::age,
            ))
            .order(accounts::account_number.asc())
            .load::<(i64, String, String, String, i32)>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|(account_number, username, name, balance, age)| {
                Ok(AccountSummary {
                    account_number,
                    username,
                    name,
                    balance: parse_stored_decimal(&balance)?,
                    age,
                })
            })
            .collect()
    }
}
