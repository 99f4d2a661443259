//! Transaction history domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One committed ledger entry.
///
/// Records are append-only: they are created when a transaction or transfer
/// leg commits and destroyed only by cascading account deletion. The
/// transaction id is monotonic and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub account_number: i64,
    /// Wall-clock date at commit, `%Y-%m-%d`.
    pub date: String,
    /// Wall-clock time at commit, `%H:%M:%S`.
    pub time: String,
    /// Signed amount: positive = credit, negative = debit.
    pub amount: Decimal,
}

/// Balances of both legs after a committed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedTransfer {
    pub new_from_balance: Decimal,
    pub new_to_balance: Decimal,
}
