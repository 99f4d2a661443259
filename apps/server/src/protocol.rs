//! Wire protocol: newline-delimited JSON request/response envelopes.
//!
//! Every request carries an integer `requestId` opcode; every response
//! echoes it back as `responseId`. One JSON document per line in both
//! directions.

use rust_decimal::Decimal;
use serde_json::Value;

/// Request opcodes understood by the dispatcher.
///
/// Tags 10 and 11 are the privileged admin-console variants of 2 and 8;
/// they share semantics and are kept as distinct opcodes only so the
/// response's `responseId` still mirrors what the client sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestId {
    Login = 0,
    LookupAccount = 1,
    GetBalance = 2,
    CreateAccount = 3,
    DeleteAccount = 4,
    ListAccounts = 5,
    PostTransaction = 6,
    PostTransfer = 7,
    TransactionHistory = 8,
    UpdateProfile = 9,
    GetBalanceAdmin = 10,
    TransactionHistoryAdmin = 11,
}

impl RequestId {
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(Self::Login),
            1 => Some(Self::LookupAccount),
            2 => Some(Self::GetBalance),
            3 => Some(Self::CreateAccount),
            4 => Some(Self::DeleteAccount),
            5 => Some(Self::ListAccounts),
            6 => Some(Self::PostTransaction),
            7 => Some(Self::PostTransfer),
            8 => Some(Self::TransactionHistory),
            9 => Some(Self::UpdateProfile),
            10 => Some(Self::GetBalanceAdmin),
            11 => Some(Self::TransactionHistoryAdmin),
            _ => None,
        }
    }
}

// === Field extraction helpers ===
//
// Requests are loose JSON objects; these return `None` for missing or
// wrongly-typed fields so the dispatcher can answer with a validation
// failure instead of touching the ledger.

pub fn field_str<'a>(request: &'a Value, name: &str) -> Option<&'a str> {
    request.get(name).and_then(Value::as_str)
}

pub fn field_i64(request: &Value, name: &str) -> Option<i64> {
    request.get(name).and_then(Value::as_i64)
}

pub fn field_bool(request: &Value, name: &str) -> Option<bool> {
    request.get(name).and_then(Value::as_bool)
}

/// Monetary amounts arrive as JSON numbers and are converted to `Decimal`
/// before they reach the ledger.
pub fn field_amount(request: &Value, name: &str) -> Option<Decimal> {
    request
        .get(name)
        .and_then(Value::as_f64)
        .and_then(|f| Decimal::try_from(f).ok())
}
