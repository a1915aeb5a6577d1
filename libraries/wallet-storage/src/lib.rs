//! Wallet Storage
//!
//! `SQLite` persistence for wallet identities and balances.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: `users` and `balances` each own their queries
//! - **Transactional Signup**: an identity and its balance are written in one
//!   transaction (see [`LocalAccountStore::open_account`])
//! - **Atomic Transfers**: debit and credit commit together or not at all
//!
//! # Example
//!
//! ```rust,no_run
//! use wallet_storage::{LocalAccountStore, create_pool, run_migrations};
//! use wallet_core::{BalanceLedger, UserId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://wallet.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalAccountStore::new(pool);
//! let balance = store.balance_of(&UserId::new("some-user")).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod balances;
pub mod users;

pub use context::LocalAccountStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://wallet.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal) // Readers don't block the single writer
        .busy_timeout(std::time::Duration::from_secs(30)); // Writers queue instead of failing

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created");

    Ok(pool)
}
