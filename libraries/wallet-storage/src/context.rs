use crate::{balances, users};
use async_trait::async_trait;
use sqlx::SqlitePool;
use wallet_core::{
    AccountStore, Amount, BalanceLedger, CredentialStore, Identity, NewIdentity, ProfileUpdate,
    Result, UserId,
};

/// Account store backed by a local `SQLite` database
#[derive(Clone)]
pub struct LocalAccountStore {
    pool: SqlitePool,
}

impl LocalAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for LocalAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>> {
        users::find_by_username(&self.pool, username).await
    }

    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity> {
        users::create(&self.pool, identity).await
    }

    async fn update_identity(&self, id: &UserId, update: ProfileUpdate) -> Result<()> {
        users::update(&self.pool, id, update).await
    }

    async fn search_identities(&self, pattern: &str) -> Result<Vec<Identity>> {
        users::search(&self.pool, pattern).await
    }
}

#[async_trait]
impl BalanceLedger for LocalAccountStore {
    async fn create_balance(&self, user_id: &UserId, amount: Amount) -> Result<()> {
        balances::create_for(&self.pool, user_id, amount).await
    }

    async fn balance_of(&self, user_id: &UserId) -> Result<Amount> {
        balances::get_for(&self.pool, user_id).await
    }

    async fn transfer(&self, from: &UserId, to: &UserId, amount: Amount) -> Result<()> {
        balances::transfer(&self.pool, from, to, amount).await
    }
}

#[async_trait]
impl AccountStore for LocalAccountStore {
    async fn open_account(
        &self,
        identity: NewIdentity,
        initial_balance: Amount,
    ) -> Result<Identity> {
        let mut tx = self.pool.begin().await?;

        let identity = users::insert(&mut *tx, identity).await?;
        balances::insert(&mut *tx, &identity.id, initial_balance).await?;

        tx.commit().await?;

        tracing::info!("Opened account {} for {}", identity.id, identity.username);

        Ok(identity)
    }
}
