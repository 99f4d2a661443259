//! Accounts module - domain models, services, and traits.

mod accounts_errors;
mod accounts_model;
mod accounts_service;
mod accounts_traits;

#[cfg(test)]
mod accounts_model_tests;

// Re-export the public interface
pub use accounts_errors::AccountError;
pub use accounts_model::{Account, AccountSummary, LoginOutcome, NewAccount, ProfileUpdate};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
