//! Request shape checks

use wallet_core::{Result, WalletError};

/// Longest accepted username (RFC 5321 path limit)
const MAX_USERNAME_LEN: usize = 254;

/// Check that `username` looks like an email address
///
/// One `@`, a non-empty local part and a dotted domain with no empty labels.
/// No whitespace anywhere.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(WalletError::validation("username must be an email address"));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(WalletError::validation("username must be an email address"));
    }

    let Some((local, domain)) = username.split_once('@') else {
        return Err(WalletError::validation("username must be an email address"));
    };

    let domain_ok = domain.contains('.')
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty());

    if local.is_empty() || !domain_ok {
        return Err(WalletError::validation("username must be an email address"));
    }

    Ok(())
}

/// Check that a required text field is present
pub fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WalletError::validation(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Check an optional field: absent is fine, present must be non-empty
pub fn optional_field(name: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| require_field(name, v))
}
