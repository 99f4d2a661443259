//! Request dispatcher: maps a decoded request to exactly one ledger
//! operation and shapes the response envelope.
//!
//! All business rules live in the services; this module only validates
//! field presence/types, routes, and translates errors into the wire's
//! `errorMessage` strings.

use serde_json::{json, Value};
use tracing::{error, warn};

use tellerd_core::accounts::{NewAccount, ProfileUpdate};
use tellerd_core::Error;

use crate::main_lib::AppState;
use crate::protocol::{field_amount, field_bool, field_i64, field_str, RequestId};

/// Handles one decoded request and produces the response document.
///
/// Never fails: every outcome, including unknown opcodes and storage
/// errors, becomes a response object so the connection stays usable.
pub async fn dispatch(state: &AppState, request: &Value) -> Value {
    let Some(tag) = request.get("requestId").and_then(Value::as_i64) else {
        warn!("Request without a usable requestId");
        return json!({ "responseId": Value::Null });
    };

    let mut response = match RequestId::from_tag(tag) {
        Some(RequestId::Login) => login(state, request),
        Some(RequestId::LookupAccount) => lookup_account(state, request),
        Some(RequestId::GetBalance) | Some(RequestId::GetBalanceAdmin) => {
            get_balance(state, request)
        }
        Some(RequestId::CreateAccount) => create_account(state, request).await,
        Some(RequestId::DeleteAccount) => delete_account(state, request).await,
        Some(RequestId::ListAccounts) => list_accounts(state),
        Some(RequestId::PostTransaction) => post_transaction(state, request).await,
        Some(RequestId::PostTransfer) => post_transfer(state, request).await,
        Some(RequestId::TransactionHistory) | Some(RequestId::TransactionHistoryAdmin) => {
            transaction_history(state, request)
        }
        Some(RequestId::UpdateProfile) => update_profile(state, request).await,
        None => {
            warn!("Unknown requestId {}", tag);
            json!({})
        }
    };

    response["responseId"] = json!(tag);
    response
}

/// The wire `errorMessage` for a failed operation. Domain errors carry
/// protocol-contract strings; anything else collapses to "failed".
fn error_message(err: &Error) -> String {
    match err {
        Error::Account(e) => e.to_string(),
        Error::Transaction(e) => e.to_string(),
        Error::Validation(e) => e.to_string(),
        _ => "failed".to_string(),
    }
}

fn login(state: &AppState, request: &Value) -> Value {
    let (Some(username), Some(credential)) = (
        field_str(request, "username"),
        field_str(request, "credential"),
    ) else {
        return json!({ "loginSuccess": false });
    };

    match state.accounts.login(username, credential) {
        Ok(Some(outcome)) => json!({
            "loginSuccess": true,
            "accountNumber": outcome.account_number,
            "isAdmin": outcome.is_admin,
        }),
        Ok(None) => json!({ "loginSuccess": false }),
        Err(e) => {
            error!("Login failed: {}", e);
            json!({ "loginSuccess": false })
        }
    }
}

fn lookup_account(state: &AppState, request: &Value) -> Value {
    let Some(username) = field_str(request, "username") else {
        return json!({ "userFound": false });
    };

    match state.accounts.lookup_account_number(username) {
        Ok(Some(account_number)) => json!({
            "userFound": true,
            "accountNumber": account_number,
        }),
        Ok(None) => json!({ "userFound": false }),
        Err(e) => {
            error!("Account lookup failed: {}", e);
            json!({ "userFound": false })
        }
    }
}

fn get_balance(state: &AppState, request: &Value) -> Value {
    let Some(account_number) = field_i64(request, "accountNumber") else {
        return json!({ "accountFound": false });
    };

    match state.accounts.get_balance(account_number) {
        Ok(Some(balance)) => json!({
            "accountFound": true,
            "balance": balance,
        }),
        Ok(None) => json!({ "accountFound": false }),
        Err(e) => {
            error!("Balance read failed: {}", e);
            json!({ "accountFound": false })
        }
    }
}

async fn create_account(state: &AppState, request: &Value) -> Value {
    let (Some(username), Some(credential), Some(name), Some(age), Some(is_admin)) = (
        field_str(request, "username"),
        field_str(request, "credential"),
        field_str(request, "name"),
        field_i64(request, "age"),
        field_bool(request, "isAdmin"),
    ) else {
        return json!({ "createAccountSuccess": false });
    };

    // Ages that do not fit the domain type are out of range a fortiori;
    // a lossy cast here would let the low bits sneak past validation.
    let Ok(age) = i32::try_from(age) else {
        return json!({ "createAccountSuccess": false });
    };

    let new_account = NewAccount {
        username: username.to_string(),
        credential: credential.to_string(),
        name: name.to_string(),
        age,
        is_admin,
    };

    match state.accounts.create_account(new_account).await {
        Ok(account) => json!({
            "createAccountSuccess": true,
            "accountNumber": account.account_number,
        }),
        Err(e) => json!({
            "createAccountSuccess": false,
            "errorMessage": error_message(&e),
        }),
    }
}

async fn delete_account(state: &AppState, request: &Value) -> Value {
    let Some(account_number) = field_i64(request, "accountNumber") else {
        return json!({ "deleteAccountSuccess": false });
    };

    match state.accounts.delete_account(account_number).await {
        Ok(deleted) => json!({ "deleteAccountSuccess": deleted }),
        Err(e) => {
            error!("Account deletion failed: {}", e);
            json!({ "deleteAccountSuccess": false })
        }
    }
}

fn list_accounts(state: &AppState) -> Value {
    match state.accounts.list_all_accounts() {
        Ok(summaries) => json!({
            "fetchUserDataSuccess": true,
            "userData": summaries,
        }),
        Err(e) => {
            error!("Account listing failed: {}", e);
            json!({
                "fetchUserDataSuccess": false,
                "errorMessage": "failed",
            })
        }
    }
}

async fn post_transaction(state: &AppState, request: &Value) -> Value {
    let (Some(account_number), Some(amount)) = (
        field_i64(request, "accountNumber"),
        field_amount(request, "amount"),
    ) else {
        return json!({ "transactionSuccess": false });
    };

    match state
        .transactions
        .post_transaction(account_number, amount)
        .await
    {
        Ok(new_balance) => json!({
            "transactionSuccess": true,
            "newBalance": new_balance,
        }),
        Err(e) => json!({
            "transactionSuccess": false,
            "errorMessage": error_message(&e),
        }),
    }
}

async fn post_transfer(state: &AppState, request: &Value) -> Value {
    let (Some(from_account), Some(to_account), Some(amount)) = (
        field_i64(request, "fromAccountNumber"),
        field_i64(request, "toAccountNumber"),
        field_amount(request, "amount"),
    ) else {
        return json!({ "transferSuccess": false });
    };

    match state
        .transactions
        .post_transfer(from_account, to_account, amount)
        .await
    {
        Ok(posted) => json!({
            "transferSuccess": true,
            "newFromBalance": posted.new_from_balance,
            "newToBalance": posted.new_to_balance,
        }),
        Err(e) => json!({
            "transferSuccess": false,
            "errorMessage": error_message(&e),
        }),
    }
}

fn transaction_history(state: &AppState, request: &Value) -> Value {
    let Some(account_number) = field_i64(request, "accountNumber") else {
        return json!({ "viewTransactionHistorySuccess": false });
    };

    match state.transactions.get_transaction_history(account_number) {
        Ok(records) => {
            let rows: Vec<Value> = records
                .iter()
                .map(|r| {
                    json!({
                        "transactionId": r.transaction_id,
                        "amount": r.amount,
                        "date": r.date,
                        "time": r.time,
                    })
                })
                .collect();
            json!({
                "viewTransactionHistorySuccess": true,
                "transactionHistory": rows,
            })
        }
        Err(e) => {
            error!("History read failed: {}", e);
            json!({ "viewTransactionHistorySuccess": false })
        }
    }
}

async fn update_profile(state: &AppState, request: &Value) -> Value {
    let Some(username) = field_str(request, "username") else {
        return json!({ "updateSuccess": false });
    };

    let update = ProfileUpdate {
        username: username.to_string(),
        credential: field_str(request, "credential").map(str::to_string),
        name: field_str(request, "name").map(str::to_string),
    };

    match state.accounts.update_profile(update).await {
        Ok(()) => json!({ "updateSuccess": true }),
        Err(e) => json!({
            "updateSuccess": false,
            "errorMessage": error_message(&e),
        }),
    }
}
