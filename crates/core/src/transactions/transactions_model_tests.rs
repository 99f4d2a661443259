//! Tests for transaction models and service-level validation.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::transactions::{
        PostedTransfer, TransactionError, TransactionRecord, TransactionRepositoryTrait,
        TransactionService, TransactionServiceTrait,
    };
    use crate::{Error, Result};

    #[test]
    fn test_transaction_record_wire_field_names() {
        let record = TransactionRecord {
            transaction_id: 7,
            account_number: 2,
            date: "2025-01-15".to_string(),
            time: "12:30:00".to_string(),
            amount: dec!(-50),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("transactionId").is_some());
        assert!(json.get("accountNumber").is_some());
        assert_eq!(json["amount"], serde_json::json!(-50.0));
    }

    /// Repository stub that records whether any mutation reached it.
    #[derive(Default)]
    struct RecordingRepository {
        touched: AtomicBool,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for RecordingRepository {
        async fn post_transaction(&self, _account: i64, _amount: Decimal) -> Result<Decimal> {
            self.touched.store(true, Ordering::SeqCst);
            Ok(Decimal::ZERO)
        }

        async fn post_transfer(
            &self,
            _from: i64,
            _to: i64,
            _amount: Decimal,
        ) -> Result<PostedTransfer> {
            self.touched.store(true, Ordering::SeqCst);
            Ok(PostedTransfer {
                new_from_balance: Decimal::ZERO,
                new_to_balance: Decimal::ZERO,
            })
        }

        fn history_for_account(&self, _account: i64) -> Result<Vec<TransactionRecord>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_negative_transfer_rejected_before_repository() {
        let repository = Arc::new(RecordingRepository::default());
        let service = TransactionService::new(repository.clone());

        let result = service.post_transfer(1, 2, dec!(-10)).await;
        assert!(matches!(
            result,
            Err(Error::Transaction(TransactionError::NegativeTransferAmount))
        ));
        assert!(!repository.touched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_self_transfer_rejected_before_repository() {
        let repository = Arc::new(RecordingRepository::default());
        let service = TransactionService::new(repository.clone());

        let result = service.post_transfer(5, 5, dec!(10)).await;
        assert!(matches!(
            result,
            Err(Error::Transaction(TransactionError::SelfTransfer))
        ));
        assert!(!repository.touched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_zero_transfer_allowed() {
        let repository = Arc::new(RecordingRepository::default());
        let service = TransactionService::new(repository.clone());

        assert!(service.post_transfer(1, 2, Decimal::ZERO).await.is_ok());
        assert!(repository.touched.load(Ordering::SeqCst));
    }
}
