//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountSummary, NewAccount, ProfileUpdate};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Mutating methods are async because implementations funnel them through a
/// process-wide serialized writer; reads may run concurrently.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates an account together with its profile.
    ///
    /// The duplicate-username check and both inserts are one atomic unit;
    /// two concurrent creations of the same username must not both succeed.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account, its profile, and all its transaction records.
    ///
    /// Returns `false` (not an error) when the account is unknown.
    async fn delete(&self, account_number: i64) -> Result<bool>;

    /// Applies a credential and/or name update to an existing account.
    ///
    /// Fails with [`super::AccountError::NotFound`] for unknown usernames.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<()>;

    /// Looks up an account by exact username and credential match.
    fn find_by_credentials(&self, username: &str, credential: &str) -> Result<Option<Account>>;

    /// Looks up an account by username (case-insensitive).
    fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Reads the current balance of an account's profile.
    fn get_balance(&self, account_number: i64) -> Result<Option<Decimal>>;

    /// Snapshot join of all accounts with their profiles.
    fn list_with_profiles(&self) -> Result<Vec<AccountSummary>>;
}

/// Trait defining the contract for Account service operations.
///
/// The service layer handles input validation and coordinates with the
/// repository; all storage invariants live below this trait.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Checks credentials; `None` means the login failed.
    ///
    /// Policy: an unknown username and a wrong credential are deliberately
    /// indistinguishable in the result.
    fn login(&self, username: &str, credential: &str) -> Result<Option<super::LoginOutcome>>;

    /// Resolves a username to its account number, if any.
    fn lookup_account_number(&self, username: &str) -> Result<Option<i64>>;

    /// Reads an account's balance; `None` when the account is unknown.
    fn get_balance(&self, account_number: i64) -> Result<Option<Decimal>>;

    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account and all dependent rows.
    async fn delete_account(&self, account_number: i64) -> Result<bool>;

    /// Lists all accounts joined with their profiles.
    fn list_all_accounts(&self) -> Result<Vec<AccountSummary>>;

    /// Updates credential and/or profile name for a username.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<()>;
}
