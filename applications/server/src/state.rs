/// Shared application state
use crate::services::{AccountService, AuthService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(accounts: Arc<AccountService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            accounts,
            auth_service,
        }
    }
}
