//! Integration tests for the account and transaction repositories against a
//! real temporary SQLite database.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use tellerd_core::accounts::{
    AccountError, AccountRepositoryTrait, NewAccount, ProfileUpdate,
};
use tellerd_core::transactions::{TransactionError, TransactionRepositoryTrait};
use tellerd_core::Error;
use tellerd_storage_sqlite::accounts::AccountRepository;
use tellerd_storage_sqlite::transactions::TransactionRepository;
use tellerd_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DatabaseError,
};

struct TestLedger {
    accounts: AccountRepository,
    transactions: TransactionRepository,
    // Held so the database file outlives the repositories.
    _tmp: TempDir,
}

fn new_account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        credential: "pw1".to_string(),
        name: "Test User".to_string(),
        age: 30,
        is_admin: false,
    }
}

async fn setup() -> TestLedger {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("ledger.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());

    TestLedger {
        accounts: AccountRepository::new(pool.clone(), writer.clone()),
        transactions: TransactionRepository::new(pool, writer),
        _tmp: tmp,
    }
}

#[tokio::test]
async fn create_then_login_roundtrip() {
    let ledger = setup().await;

    let account = ledger.accounts.create(new_account("alice")).await.unwrap();
    assert!(!account.is_admin);
    assert_eq!(
        ledger.accounts.get_balance(account.account_number).unwrap(),
        Some(Decimal::ZERO)
    );

    let found = ledger
        .accounts
        .find_by_credentials("alice", "pw1")
        .unwrap()
        .expect("login should succeed");
    assert_eq!(found.account_number, account.account_number);

    assert!(ledger
        .accounts
        .find_by_credentials("alice", "wrong")
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn seeded_admin_can_log_in_but_has_no_profile() {
    let ledger = setup().await;

    let admin = ledger
        .accounts
        .find_by_credentials("admin", "admin")
        .unwrap()
        .expect("seeded admin present");
    assert!(admin.is_admin);
    assert_eq!(ledger.accounts.get_balance(admin.account_number).unwrap(), None);
    assert!(ledger.accounts.list_with_profiles().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_username_is_rejected_case_insensitively() {
    let ledger = setup().await;

    ledger.accounts.create(new_account("alice")).await.unwrap();
    let err = ledger
        .accounts
        .create(new_account("ALICE"))
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(err, Error::Account(AccountError::UsernameExists)));

    // Only the original row exists.
    assert_eq!(ledger.accounts.list_with_profiles().unwrap().len(), 1);
}

#[tokio::test]
async fn post_transaction_updates_balance_and_history() {
    let ledger = setup().await;
    let account = ledger.accounts.create(new_account("alice")).await.unwrap();
    let n = account.account_number;

    let new_balance = ledger.transactions.post_transaction(n, dec!(100)).await.unwrap();
    assert_eq!(new_balance, dec!(100));

    // Overdraft attempt leaves the balance untouched.
    let err = ledger
        .transactions
        .post_transaction(n, dec!(-150))
        .await
        .expect_err("overdraft must fail");
    assert!(matches!(
        err,
        Error::Transaction(TransactionError::InsufficientFunds)
    ));
    assert_eq!(ledger.accounts.get_balance(n).unwrap(), Some(dec!(100)));

    // Exactly one history row, and no row for the rejected mutation.
    let history = ledger.transactions.history_for_account(n).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, dec!(100));
}

#[tokio::test]
async fn transfer_moves_funds_and_writes_both_legs() {
    let ledger = setup().await;
    let alice = ledger.accounts.create(new_account("alice")).await.unwrap();
    let bob = ledger.accounts.create(new_account("bob")).await.unwrap();
    let (n, m) = (alice.account_number, bob.account_number);

    ledger.transactions.post_transaction(n, dec!(100)).await.unwrap();

    let posted = ledger.transactions.post_transfer(n, m, dec!(50)).await.unwrap();
    assert_eq!(posted.new_from_balance, dec!(50));
    assert_eq!(posted.new_to_balance, dec!(50));
    assert_eq!(ledger.accounts.get_balance(n).unwrap(), Some(dec!(50)));
    assert_eq!(ledger.accounts.get_balance(m).unwrap(), Some(dec!(50)));

    let from_history = ledger.transactions.history_for_account(n).unwrap();
    assert_eq!(from_history.len(), 2);
    assert_eq!(from_history[0].amount, dec!(-50));

    let to_history = ledger.transactions.history_for_account(m).unwrap();
    assert_eq!(to_history.len(), 1);
    assert_eq!(to_history[0].amount, dec!(50));
}

#[tokio::test]
async fn transfer_with_insufficient_funds_changes_nothing() {
    let ledger = setup().await;
    let alice = ledger.accounts.create(new_account("alice")).await.unwrap();
    let bob = ledger.accounts.create(new_account("bob")).await.unwrap();
    let (n, m) = (alice.account_number, bob.account_number);

    ledger.transactions.post_transaction(n, dec!(30)).await.unwrap();

    let err = ledger
        .transactions
        .post_transfer(n, m, dec!(31))
        .await
        .expect_err("transfer must fail");
    assert!(matches!(
        err,
        Error::Transaction(TransactionError::InsufficientTransferFunds)
    ));

    // Neither leg applied, no history rows beyond the original credit.
    assert_eq!(ledger.accounts.get_balance(n).unwrap(), Some(dec!(30)));
    assert_eq!(ledger.accounts.get_balance(m).unwrap(), Some(Decimal::ZERO));
    assert_eq!(ledger.transactions.history_for_account(n).unwrap().len(), 1);
    assert!(ledger.transactions.history_for_account(m).unwrap().is_empty());
}

#[tokio::test]
async fn transfer_to_unknown_account_rolls_back() {
    let ledger = setup().await;
    let alice = ledger.accounts.create(new_account("alice")).await.unwrap();
    let n = alice.account_number;
    ledger.transactions.post_transaction(n, dec!(100)).await.unwrap();

    let err = ledger
        .transactions
        .post_transfer(n, 9999, dec!(10))
        .await
        .expect_err("unknown destination must fail");
    assert!(matches!(
        err,
        Error::Transaction(TransactionError::AccountNotFound)
    ));

    // Source untouched, no debit leg recorded.
    assert_eq!(ledger.accounts.get_balance(n).unwrap(), Some(dec!(100)));
    assert_eq!(ledger.transactions.history_for_account(n).unwrap().len(), 1);
}

#[tokio::test]
async fn delete_cascades_but_leaves_other_accounts_alone() {
    let ledger = setup().await;
    let alice = ledger.accounts.create(new_account("alice")).await.unwrap();
    let bob = ledger.accounts.create(new_account("bob")).await.unwrap();
    let (n, m) = (alice.account_number, bob.account_number);

    ledger.transactions.post_transaction(n, dec!(100)).await.unwrap();
    ledger.transactions.post_transfer(n, m, dec!(25)).await.unwrap();

    assert!(ledger.accounts.delete(n).await.unwrap());

    assert_eq!(ledger.accounts.get_balance(n).unwrap(), None);
    assert!(ledger.transactions.history_for_account(n).unwrap().is_empty());

    // Bob's data is untouched.
    assert_eq!(ledger.accounts.get_balance(m).unwrap(), Some(dec!(25)));
    assert_eq!(ledger.transactions.history_for_account(m).unwrap().len(), 1);

    // Deleting again reports false, not an error.
    assert!(!ledger.accounts.delete(n).await.unwrap());
}

#[tokio::test]
async fn account_numbers_are_not_reused_after_deletion() {
    let ledger = setup().await;
    let first = ledger.accounts.create(new_account("alice")).await.unwrap();
    ledger.accounts.delete(first.account_number).await.unwrap();

    let second = ledger.accounts.create(new_account("alice2")).await.unwrap();
    assert!(second.account_number > first.account_number);
}

#[tokio::test]
async fn update_profile_applies_only_supplied_fields() {
    let ledger = setup().await;
    ledger.accounts.create(new_account("alice")).await.unwrap();

    ledger
        .accounts
        .update_profile(ProfileUpdate {
            username: "alice".to_string(),
            credential: Some("pw2".to_string()),
            name: None,
        })
        .await
        .unwrap();

    // Old credential no longer works, new one does; name unchanged.
    assert!(ledger
        .accounts
        .find_by_credentials("alice", "pw1")
        .unwrap()
        .is_none());
    assert!(ledger
        .accounts
        .find_by_credentials("alice", "pw2")
        .unwrap()
        .is_some());
    let listing = ledger.accounts.list_with_profiles().unwrap();
    assert_eq!(listing[0].name, "Test User");
}

#[tokio::test]
async fn update_profile_unknown_username_is_not_found() {
    let ledger = setup().await;

    let err = ledger
        .accounts
        .update_profile(ProfileUpdate {
            username: "ghost".to_string(),
            credential: Some("pw".to_string()),
            name: None,
        })
        .await
        .expect_err("unknown username must fail");
    assert!(matches!(err, Error::Account(AccountError::NotFound)));
}

#[tokio::test]
async fn concurrent_creations_of_same_username_admit_exactly_one() {
    let ledger = setup().await;
    let accounts = Arc::new(ledger.accounts);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let accounts = accounts.clone();
        handles.push(tokio::spawn(async move {
            accounts.create(new_account("carol")).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(accounts.list_with_profiles().unwrap().len(), 1);
}

#[tokio::test]
async fn exhausted_pool_reports_a_connection_failure() {
    use diesel::r2d2::{ConnectionManager, Pool};
    use diesel::SqliteConnection;
    use std::time::Duration;

    let tmp = tempfile::tempdir().unwrap();
    let db_path = init(tmp.path().join("ledger.db").to_str().unwrap()).unwrap();

    let manager = ConnectionManager::<SqliteConnection>::new(&db_path);
    let pool = Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_millis(100))
        .build(manager)
        .unwrap();

    // Hold the only connection so the next checkout times out.
    let _held = pool.get().unwrap();
    let err = get_connection(&pool).err().expect("checkout must fail");
    assert!(matches!(
        err,
        Error::Database(DatabaseError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn history_is_ordered_most_recent_first() {
    let ledger = setup().await;
    let account = ledger.accounts.create(new_account("alice")).await.unwrap();
    let n = account.account_number;

    for amount in [dec!(10), dec!(20), dec!(30)] {
        ledger.transactions.post_transaction(n, amount).await.unwrap();
    }

    let history = ledger.transactions.history_for_account(n).unwrap();
    let ids: Vec<i64> = history.iter().map(|r| r.transaction_id).collect();
    let mut sorted = ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
    assert_eq!(history[0].amount, dec!(30));
}
