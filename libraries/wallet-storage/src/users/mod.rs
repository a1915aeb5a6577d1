//! Identity records: lookup, creation, profile updates and name search

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use wallet_core::{Identity, NewIdentity, ProfileUpdate, Result, UserId, WalletError};

const IDENTITY_COLUMNS: &str = "id, username, password_hash, first_name, last_name, created_at";

/// Insert a new identity on an existing connection or transaction
///
/// # Arguments
///
/// * `conn` - Connection (or transaction) to write on
/// * `identity` - Fields of the new identity
///
/// # Returns
///
/// The stored identity, or `WalletError::Conflict` if the username is taken
pub async fn insert(conn: &mut SqliteConnection, identity: NewIdentity) -> Result<Identity> {
    let id = UserId::generate();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, first_name, last_name,
                            first_name_folded, last_name_folded, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&identity.username)
    .bind(&identity.password_hash)
    .bind(&identity.first_name)
    .bind(&identity.last_name)
    .bind(fold_case(&identity.first_name))
    .bind(fold_case(&identity.last_name))
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            WalletError::Conflict(identity.username.clone())
        }
        other => WalletError::from(other),
    })?;

    Ok(Identity {
        id,
        username: identity.username,
        password_hash: identity.password_hash,
        first_name: identity.first_name,
        last_name: identity.last_name,
        created_at: now,
    })
}

/// Create a new identity
pub async fn create(pool: &SqlitePool, identity: NewIdentity) -> Result<Identity> {
    let mut conn = pool.acquire().await?;
    insert(&mut *conn, identity).await
}

/// Find an identity by its exact username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Identity>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM users WHERE username = ?",
        IDENTITY_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(identity_from_row).transpose()
}

/// Apply a partial profile update
///
/// Fields set to `None` keep their stored value.
pub async fn update(pool: &SqlitePool, id: &UserId, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        // Nothing to write, but the identity must still exist
        let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?;
        return match exists {
            Some(_) => Ok(()),
            None => Err(WalletError::not_found("User", id.as_str())),
        };
    }

    let result = sqlx::query(
        "UPDATE users
         SET password_hash = COALESCE(?, password_hash),
             first_name = COALESCE(?, first_name),
             last_name = COALESCE(?, last_name),
             first_name_folded = COALESCE(?, first_name_folded),
             last_name_folded = COALESCE(?, last_name_folded)
         WHERE id = ?",
    )
    .bind(update.password_hash.as_deref())
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.first_name.as_deref().map(fold_case))
    .bind(update.last_name.as_deref().map(fold_case))
    .bind(id.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WalletError::not_found("User", id.as_str()));
    }

    Ok(())
}

/// Search identities by first or last name
///
/// Matches `pattern` as a literal, case-insensitive substring. Case is folded
/// in Rust so non-ASCII letters match too. Results come back in insertion
/// order.
pub async fn search(pool: &SqlitePool, pattern: &str) -> Result<Vec<Identity>> {
    let like = format!("%{}%", escape_like(&fold_case(pattern)));

    let rows = sqlx::query(&format!(
        "SELECT {} FROM users
         WHERE first_name_folded LIKE ? ESCAPE '\\' OR last_name_folded LIKE ? ESCAPE '\\'
         ORDER BY rowid",
        IDENTITY_COLUMNS
    ))
    .bind(&like)
    .bind(&like)
    .fetch_all(pool)
    .await?;

    rows.iter().map(identity_from_row).collect()
}

/// Lowercase form stored alongside each name for searching
fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Escape `LIKE` wildcards so user input is matched literally
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn identity_from_row(row: &SqliteRow) -> Result<Identity> {
    Ok(Identity {
        id: UserId::new(row.try_get::<String, _>("id")?),
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at: row.try_get("created_at")?,
    })
}
