//! Transactions module - posted ledger entries, transfers, and history.

mod transactions_errors;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_model_tests;

// Re-export the public interface
pub use transactions_errors::TransactionError;
pub use transactions_model::{PostedTransfer, TransactionRecord};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
