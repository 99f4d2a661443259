use async_trait::async_trait;
use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{profiles, transaction_history};
use crate::utils::parse_stored_decimal;

use tellerd_core::transactions::{
    PostedTransfer, TransactionError, TransactionRecord, TransactionRepositoryTrait,
};
use tellerd_core::Result;

use super::model::{NewTransactionRow, TransactionRowDB};

/// Repository for posting ledger mutations and reading history.
///
/// Every mutation runs as one job on the shared writer: the balance check,
/// the balance update, and the history append commit together or roll back
/// together.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Reads a balance inside the writer's transaction.
fn balance_for_update(conn: &mut SqliteConnection, account_number: i64) -> Result<Decimal> {
    let stored: Option<String> = profiles::table
        .find(account_number)
        .select(profiles::balance)
        .first::<String>(conn)
        .optional()
        .into_core()?;
    let stored = stored.ok_or(TransactionError::AccountNotFound)?;
    parse_stored_decimal(&stored)
}

fn write_balance(
    conn: &mut SqliteConnection,
    account_number: i64,
    balance: Decimal,
) -> Result<()> {
    diesel::update(profiles::table.find(account_number))
        .set(profiles::balance.eq(balance.to_string()))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn post_transaction(&self, account_number: i64, amount: Decimal) -> Result<Decimal> {
        self.writer
            .exec(move |conn| {
                let balance = balance_for_update(conn, account_number)?;
                let new_balance = balance + amount;
                if new_balance < Decimal::ZERO {
                    return Err(TransactionError::InsufficientFunds.into());
                }

                write_balance(conn, account_number, new_balance)?;

                let now = Local::now();
                diesel::insert_into(transaction_history::table)
                    .values(&NewTransactionRow::at(account_number, amount, now))
                    .execute(conn)
                    .into_core()?;

                Ok(new_balance)
            })
            .await
    }

    async fn post_transfer(
        &self,
        from_account: i64,
        to_account: i64,
        amount: Decimal,
    ) -> Result<PostedTransfer> {
        self.writer
            .exec(move |conn| {
                let from_balance = balance_for_update(conn, from_account)?;
                let to_balance = balance_for_update(conn, to_account)?;

                let new_from_balance = from_balance - amount;
                if new_from_balance < Decimal::ZERO {
                    return Err(TransactionError::InsufficientTransferFunds.into());
                }
                let new_to_balance = to_balance + amount;

                write_balance(conn, from_account, new_from_balance)?;
                write_balance(conn, to_account, new_to_balance)?;

                // Both legs carry the same commit timestamp.
                let now = Local::now();
                diesel::insert_into(transaction_history::table)
                    .values(&NewTransactionRow::at(from_account, -amount, now))
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(transaction_history::table)
                    .values(&NewTransactionRow::at(to_account, amount, now))
                    .execute(conn)
                    .into_core()?;

                Ok(PostedTransfer {
                    new_from_balance,
                    new_to_balance,
                })
            })
            .await
    }

    /// Most recent first. Dates are stored ISO so the lexicographic sort is
    /// chronological; the id breaks ties within the same second.
    fn history_for_account(&self, account_number: i64) -> Result<Vec<TransactionRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transaction_history::table
            .filter(transaction_history::account_number.eq(account_number))
            .select(TransactionRowDB::as_select())
            .order((
                transaction_history::date.desc(),
                transaction_history::time.desc(),
                transaction_history::transaction_id.desc(),
            ))
            .load::<TransactionRowDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(TransactionRowDB::into_domain).collect()
    }
}
