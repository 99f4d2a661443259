use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{
    Account, AccountSummary, LoginOutcome, NewAccount, ProfileUpdate,
};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts and their profiles.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    fn login(&self, username: &str, credential: &str) -> Result<Option<LoginOutcome>> {
        let account = self.repository.find_by_credentials(username, credential)?;
        Ok(account.map(|a| LoginOutcome {
            account_number: a.account_number,
            is_admin: a.is_admin,
        }))
    }

    fn lookup_account_number(&self, username: &str) -> Result<Option<i64>> {
        let account = self.repository.find_by_username(username)?;
        Ok(account.map(|a| a.account_number))
    }

    fn get_balance(&self, account_number: i64) -> Result<Option<Decimal>> {
        self.repository.get_balance(account_number)
    }

    /// Creates a new account after validating the input.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account for username '{}'", new_account.username);
        self.repository.create(new_account).await
    }

    async fn delete_account(&self, account_number: i64) -> Result<bool> {
        debug!("Deleting account {}", account_number);
        self.repository.delete(account_number).await
    }

    fn list_all_accounts(&self) -> Result<Vec<AccountSummary>> {
        self.repository.list_with_profiles()
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        update.validate()?;
        let update = update.normalized();
        // Still hits the repository when both fields are absent so that an
        // unknown username is reported as not-found, matching the protocol.
        self.repository.update_profile(update).await
    }
}
