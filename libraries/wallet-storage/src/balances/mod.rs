//! Balances: one per identity, mutated only by transfers

use sqlx::{Row, SqliteConnection, SqlitePool};
use wallet_core::{Amount, Result, UserId, WalletError};

/// Insert the balance record for an identity on an existing connection
///
/// Fails with `WalletError::Duplicate` if the identity already has a balance.
pub async fn insert(conn: &mut SqliteConnection, user_id: &UserId, amount: Amount) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("INSERT INTO balances (user_id, amount_minor, updated_at) VALUES (?, ?, ?)")
        .bind(user_id.as_str())
        .bind(amount.to_minor_units())
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                WalletError::Duplicate(format!("balance for {}", user_id))
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                WalletError::not_found("User", user_id.as_str())
            }
            other => WalletError::from(other),
        })?;

    Ok(())
}

/// Create the balance record for an identity
pub async fn create_for(pool: &SqlitePool, user_id: &UserId, amount: Amount) -> Result<()> {
    let mut conn = pool.acquire().await?;
    insert(&mut *conn, user_id, amount).await
}

/// Get the balance of an identity
pub async fn get_for(pool: &SqlitePool, user_id: &UserId) -> Result<Amount> {
    let row = sqlx::query("SELECT amount_minor FROM balances WHERE user_id = ?")
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| WalletError::not_found("Account", user_id.as_str()))?;

    Amount::from_minor_units(row.try_get("amount_minor")?)
}

/// Move `amount` from `from` to `to`
///
/// Both writes happen in one transaction. The debit only applies when the
/// sender holds enough funds, so the balance check and the write are a single
/// statement and concurrent transfers cannot overdraw an account.
///
/// # Errors
///
/// * `InvalidAmount` - amount is zero, or the credit would overflow
/// * `SelfTransfer` - `from == to`
/// * `NotFound` - either account is missing
/// * `InsufficientFunds` - sender balance is lower than `amount`
pub async fn transfer(pool: &SqlitePool, from: &UserId, to: &UserId, amount: Amount) -> Result<()> {
    if amount.is_zero() {
        return Err(WalletError::invalid_amount("amount must be greater than zero"));
    }
    if from == to {
        return Err(WalletError::SelfTransfer);
    }

    let minor = amount.to_minor_units();
    let now = chrono::Utc::now().timestamp();

    // Dropping the transaction without commit rolls it back
    let mut tx = pool.begin().await?;

    let debited = sqlx::query(
        "UPDATE balances SET amount_minor = amount_minor - ?, updated_at = ?
         WHERE user_id = ? AND amount_minor >= ?",
    )
    .bind(minor)
    .bind(now)
    .bind(from.as_str())
    .bind(minor)
    .execute(&mut *tx)
    .await?;

    if debited.rows_affected() == 0 {
        return Err(if account_exists(&mut *tx, from).await? {
            WalletError::InsufficientFunds
        } else {
            WalletError::not_found("Account", from.as_str())
        });
    }

    let credited = sqlx::query(
        "UPDATE balances SET amount_minor = amount_minor + ?, updated_at = ?
         WHERE user_id = ? AND amount_minor <= ?",
    )
    .bind(minor)
    .bind(now)
    .bind(to.as_str())
    .bind(i64::MAX - minor)
    .execute(&mut *tx)
    .await?;

    if credited.rows_affected() == 0 {
        return Err(if account_exists(&mut *tx, to).await? {
            WalletError::invalid_amount("recipient balance would overflow")
        } else {
            WalletError::not_found("Account", to.as_str())
        });
    }

    tx.commit().await?;

    tracing::debug!("Transferred {} from {} to {}", amount, from, to);

    Ok(())
}

async fn account_exists(conn: &mut SqliteConnection, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM balances WHERE user_id = ?")
        .bind(user_id.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.is_some())
}
