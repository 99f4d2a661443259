//! Transaction repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::transactions_model::{PostedTransfer, TransactionRecord};
use crate::errors::Result;

/// Trait defining the contract for ledger mutation and history operations.
///
/// Implementations must make each mutating method a single atomic unit:
/// either the balance update and its history row(s) all commit, or none do.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Applies a signed amount to an account and appends one history row.
    ///
    /// Returns the new balance. Fails with
    /// [`super::TransactionError::InsufficientFunds`] when the result would
    /// be negative, leaving the balance unchanged.
    async fn post_transaction(&self, account_number: i64, amount: Decimal) -> Result<Decimal>;

    /// Moves `amount` from one account to another.
    ///
    /// Debits the source, credits the destination, and appends two history
    /// rows (-amount at the source, +amount at the destination); all four
    /// writes commit together or not at all.
    async fn post_transfer(
        &self,
        from_account: i64,
        to_account: i64,
        amount: Decimal,
    ) -> Result<PostedTransfer>;

    /// Full history for an account, most recent first.
    ///
    /// An unknown account yields an empty list, not an error.
    fn history_for_account(&self, account_number: i64) -> Result<Vec<TransactionRecord>>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Posts a signed transaction after validation.
    async fn post_transaction(&self, account_number: i64, amount: Decimal) -> Result<Decimal>;

    /// Posts a transfer after validation; the amount must be non-negative.
    async fn post_transfer(
        &self,
        from_account: i64,
        to_account: i64,
        amount: Decimal,
    ) -> Result<PostedTransfer>;

    /// Full history for an account, most recent first.
    fn get_transaction_history(&self, account_number: i64) -> Result<Vec<TransactionRecord>>;
}
