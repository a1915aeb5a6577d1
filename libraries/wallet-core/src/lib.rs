//! Wallet Core
//!
//! Domain types, store traits, and error handling shared by the wallet
//! storage layer and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Identity`, `PublicUser`, `Amount`, `UserId`
//! - **Store Traits**: `CredentialStore`, `BalanceLedger`, `AccountStore`
//! - **Error Handling**: Unified `WalletError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use wallet_core::types::{Amount, NewIdentity};
//! use rust_decimal::Decimal;
//!
//! let identity = NewIdentity {
//!     username: "alice@example.com".to_string(),
//!     password_hash: "$2b$04$...".to_string(),
//!     first_name: "Alice".to_string(),
//!     last_name: "Liddell".to_string(),
//! };
//!
//! let seed = Amount::new(Decimal::new(10_000, 2)).unwrap();
//! assert_eq!(seed.to_string(), "100.00");
//! # let _ = identity;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error taxonomy shared by every layer
pub mod error;
/// Store traits implemented by `wallet-storage`
pub mod storage;
/// Domain types
pub mod types;

// Re-export commonly used types
pub use error::{Result, WalletError};
pub use storage::{AccountStore, BalanceLedger, CredentialStore};

pub use types::{Amount, Identity, NewIdentity, ProfileUpdate, PublicUser, UserId};
