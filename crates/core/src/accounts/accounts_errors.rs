use thiserror::Error;

/// Errors specific to account operations.
///
/// The display strings double as the `errorMessage` values sent over the
/// wire, so they are part of the protocol contract.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Another account already holds this username (case-insensitive).
    #[error("exists")]
    UsernameExists,

    /// No account matches the given username or account number.
    #[error("Account not found")]
    NotFound,
}
