use thiserror::Error;

/// Errors specific to posting transactions and transfers.
///
/// The display strings double as the `errorMessage` values sent over the
/// wire, so they are part of the protocol contract.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The resulting balance would be negative.
    #[error("Insufficient balance")]
    InsufficientFunds,

    /// The source account cannot cover the transfer amount.
    #[error("Insufficient balance for the transfer")]
    InsufficientTransferFunds,

    /// Transfer amounts must be non-negative; direction is fixed by the
    /// from/to accounts, not by the sign.
    #[error("Transfer amount must not be negative")]
    NegativeTransferAmount,

    /// Source and destination are the same account.
    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    /// One of the referenced accounts does not exist.
    #[error("Account not found")]
    AccountNotFound,
}
