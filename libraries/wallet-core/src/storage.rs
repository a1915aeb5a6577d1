//! Store traits for identities and balances

use crate::error::Result;
use crate::types::{Amount, Identity, NewIdentity, ProfileUpdate, UserId};
use async_trait::async_trait;

/// Persistent identity records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by its exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>>;

    /// Create an identity.
    ///
    /// Fails with `WalletError::Conflict` if the username is taken. The store's
    /// uniqueness constraint is the authority, not any earlier lookup.
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity>;

    /// Apply a partial update; absent fields stay unchanged
    async fn update_identity(&self, id: &UserId, update: ProfileUpdate) -> Result<()>;

    /// Identities whose first or last name contains `pattern`, ignoring case.
    /// An empty pattern matches everyone.
    async fn search_identities(&self, pattern: &str) -> Result<Vec<Identity>>;
}

/// One balance per identity
#[async_trait]
pub trait BalanceLedger: Send + Sync {
    /// Create the balance record for an identity.
    ///
    /// Fails with `WalletError::Duplicate` if one already exists.
    async fn create_balance(&self, user_id: &UserId, amount: Amount) -> Result<()>;

    /// Current balance of an identity
    async fn balance_of(&self, user_id: &UserId) -> Result<Amount>;

    /// Move `amount` from one balance to another, all or nothing
    async fn transfer(&self, from: &UserId, to: &UserId, amount: Amount) -> Result<()>;
}

/// Store that can open accounts atomically
#[async_trait]
pub trait AccountStore: CredentialStore + BalanceLedger {
    /// Create an identity together with its balance in one transaction.
    ///
    /// Either both records exist afterwards or neither does.
    async fn open_account(&self, identity: NewIdentity, initial_balance: Amount)
        -> Result<Identity>;
}
