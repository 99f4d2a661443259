//! Database models for transaction history rows.

use chrono::{DateTime, Local};
use diesel::prelude::*;
use rust_decimal::Decimal;

use tellerd_core::constants::{LEDGER_DATE_FORMAT, LEDGER_TIME_FORMAT};
use tellerd_core::transactions::TransactionRecord;
use tellerd_core::Result;

use crate::utils::parse_stored_decimal;

/// Database model for a committed ledger entry.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transaction_history)]
#[diesel(primary_key(transaction_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRowDB {
    pub transaction_id: i64,
    pub account_number: i64,
    pub date: String,
    pub time: String,
    pub amount: String,
}

/// Insert model for a ledger entry; the transaction id is assigned by
/// SQLite's AUTOINCREMENT and therefore monotonic and never reused.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transaction_history)]
pub struct NewTransactionRow {
    pub account_number: i64,
    pub date: String,
    pub time: String,
    pub amount: String,
}

impl NewTransactionRow {
    /// Builds a row stamped with the given wall-clock commit time.
    pub fn at(account_number: i64, amount: Decimal, now: DateTime<Local>) -> Self {
        Self {
            account_number,
            date: now.format(LEDGER_DATE_FORMAT).to_string(),
            time: now.format(LEDGER_TIME_FORMAT).to_string(),
            amount: amount.to_string(),
        }
    }
}

impl TransactionRowDB {
    pub fn into_domain(self) -> Result<TransactionRecord> {
        Ok(TransactionRecord {
            transaction_id: self.transaction_id,
            account_number: self.account_number,
            date: self.date,
            time: self.time,
            amount: parse_stored_decimal(&self.amount)?,
        })
    }
}
