use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use tellerd_core::Result;

/// Decodes a decimal stored as TEXT (balances and amounts).
///
/// Stored values are always written by us via `Decimal::to_string`, so a
/// parse failure means a corrupted row, reported as a storage error.
pub fn parse_stored_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::DecodeFailed(format!("invalid decimal '{}': {}", value, e)).into()
    })
}
