//! Transaction history persistence - Diesel models and repository.

pub mod model;
pub mod repository;

pub use model::{NewTransactionRow, TransactionRowDB};
pub use repository::TransactionRepository;
