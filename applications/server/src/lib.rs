//! Wallet Server Library
//!
//! Account service with signup, signin, user search, balances and transfers.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AccountService, AuthService};
pub use state::AppState;

use std::sync::Arc;
use wallet_core::Amount;
use wallet_storage::LocalAccountStore;

/// Open the database named in `config` and wire up the services
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let pool = wallet_storage::create_pool(&config.storage.database_url).await?;
    wallet_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        &config.auth.jwt_secret,
        config.auth.token_expiration_hours,
        config.auth.bcrypt_cost,
    ));

    let accounts = AccountService::new(
        Arc::new(LocalAccountStore::new(pool)),
        Arc::clone(&auth_service),
        Amount::new(config.accounts.seed_min)?,
        Amount::new(config.accounts.seed_max)?,
    )?;

    Ok(AppState::new(Arc::new(accounts), auth_service))
}
