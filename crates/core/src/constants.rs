/// Minimum age accepted when opening an account
pub const MIN_ACCOUNT_AGE: i32 = 18;

/// Maximum age accepted when opening an account
pub const MAX_ACCOUNT_AGE: i32 = 120;

/// Format used for the `date` column of transaction records.
///
/// ISO ordering so that lexicographic comparison matches chronological
/// comparison when sorting history rows.
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for the `time` column of transaction records
pub const LEDGER_TIME_FORMAT: &str = "%H:%M:%S";
