use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::transactions_errors::TransactionError;
use super::transactions_model::{PostedTransfer, TransactionRecord};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

/// Service for posting transactions and transfers against the ledger.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn post_transaction(&self, account_number: i64, amount: Decimal) -> Result<Decimal> {
        debug!("Posting transaction of {} to account {}", amount, account_number);
        self.repository.post_transaction(account_number, amount).await
    }

    async fn post_transfer(
        &self,
        from_account: i64,
        to_account: i64,
        amount: Decimal,
    ) -> Result<PostedTransfer> {
        if amount < Decimal::ZERO {
            return Err(TransactionError::NegativeTransferAmount.into());
        }
        // A self-transfer would apply two absolute balance writes to the
        // same row, turning the second into a net credit.
        if from_account == to_account {
            return Err(TransactionError::SelfTransfer.into());
        }
        debug!(
            "Posting transfer of {} from account {} to account {}",
            amount, from_account, to_account
        );
        self.repository
            .post_transfer(from_account, to_account, amount)
            .await
    }

    fn get_transaction_history(&self, account_number: i64) -> Result<Vec<TransactionRecord>> {
        self.repository.history_for_account(account_number)
    }
}
