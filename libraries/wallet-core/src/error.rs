/// Core error types for the wallet
use thiserror::Error;

/// Result type alias using `WalletError`
pub type Result<T> = std::result::Result<T, WalletError>;

/// Core error type for the wallet
#[derive(Error, Debug)]
pub enum WalletError {
    /// Malformed input the caller can correct
    #[error("Incorrect inputs: {0}")]
    Validation(String),

    /// Username already registered
    #[error("Email already taken")]
    Conflict(String),

    /// A record that must be unique already exists
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Credentials did not match. Deliberately carries no detail.
    #[error("Error while logging in")]
    Authentication,

    /// Sender balance is lower than the requested amount
    #[error("Insufficient balance")]
    InsufficientFunds,

    /// Transfer amount is zero, negative, or not representable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Sender and recipient are the same account
    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up
        entity: String,
        /// Identifier that matched nothing
        id: String,
    },

    /// The backing store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl WalletError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid amount error
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a store unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for WalletError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}
