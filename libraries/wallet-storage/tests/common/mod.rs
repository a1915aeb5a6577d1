//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and locking.

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;
use wallet_core::{AccountStore, Amount, Identity, NewIdentity};
use wallet_storage::LocalAccountStore;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub store: LocalAccountStore,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = wallet_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        wallet_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            store: LocalAccountStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }
}

/// Test fixture: identity fields with a fake hash
pub fn new_identity(username: &str, first_name: &str, last_name: &str) -> NewIdentity {
    NewIdentity {
        username: username.to_string(),
        password_hash: format!("hash-of-{}", username),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

/// Test fixture: amount from whole units
pub fn amount(units: i64) -> Amount {
    Amount::from_minor_units(units * 100).expect("non-negative amount")
}

/// Test fixture: open an account with a starting balance
pub async fn open_account(db: &TestDb, username: &str, balance: i64) -> Identity {
    db.store
        .open_account(new_identity(username, username, "Tester"), amount(balance))
        .await
        .expect("Failed to open account")
}

/// Number of rows in a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
