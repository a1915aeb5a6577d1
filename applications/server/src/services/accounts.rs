/// Account service - signup, signin, profiles, balances and transfers
use crate::error::{Result, ServerError};
use crate::services::validation::{optional_field, require_field, validate_username};
use crate::services::AuthService;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use wallet_core::{
    AccountStore, Amount, NewIdentity, ProfileUpdate, PublicUser, UserId, WalletError,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a successful signup
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub user: PublicUser,
    pub token: String,
}

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    auth: Arc<AuthService>,
    /// Starting balance range in minor units
    seed_range: RangeInclusive<i64>,
}

impl AccountService {
    /// Create the service
    ///
    /// New accounts start with a balance drawn uniformly from
    /// `[seed_min, seed_max]`.
    pub fn new(
        store: Arc<dyn AccountStore>,
        auth: Arc<AuthService>,
        seed_min: Amount,
        seed_max: Amount,
    ) -> Result<Self> {
        if seed_min > seed_max {
            return Err(ServerError::Config(format!(
                "Seed range is empty: {} > {}",
                seed_min, seed_max
            )));
        }

        Ok(Self {
            store,
            auth,
            seed_range: seed_min.to_minor_units()..=seed_max.to_minor_units(),
        })
    }

    /// Register a new identity with a seeded balance and return a session token
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupOutcome> {
        validate_username(&req.username)?;
        require_field("password", &req.password)?;
        require_field("firstName", &req.first_name)?;
        require_field("lastName", &req.last_name)?;

        if self.store.find_by_username(&req.username).await?.is_some() {
            return Err(WalletError::Conflict(req.username).into());
        }

        let password_hash = self.hash_password(req.password).await?;
        let seed = self.draw_seed()?;

        // A concurrent signup for the same username fails here with Conflict
        let identity = self
            .store
            .open_account(
                NewIdentity {
                    username: req.username,
                    password_hash,
                    first_name: req.first_name,
                    last_name: req.last_name,
                },
                seed,
            )
            .await?;

        let token = self.auth.issue_token(&identity.id)?;

        tracing::info!("User {} signed up with balance {}", identity.id, seed);

        Ok(SignupOutcome {
            user: identity.into(),
            token,
        })
    }

    /// Check credentials and return a session token
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    pub async fn signin(&self, req: SigninRequest) -> Result<String> {
        validate_username(&req.username)?;
        require_field("password", &req.password)?;

        let Some(identity) = self.store.find_by_username(&req.username).await? else {
            tracing::debug!("Sign-in for unknown username");
            return Err(WalletError::Authentication.into());
        };

        if !self
            .verify_password(req.password, identity.password_hash.clone())
            .await?
        {
            tracing::debug!("Sign-in with wrong password for {}", identity.id);
            return Err(WalletError::Authentication.into());
        }

        self.auth.issue_token(&identity.id)
    }

    /// Apply a partial profile update to the caller's own identity
    pub async fn update_profile(&self, user_id: &UserId, req: ProfileUpdateRequest) -> Result<()> {
        optional_field("password", req.password.as_deref())?;
        optional_field("firstName", req.first_name.as_deref())?;
        optional_field("lastName", req.last_name.as_deref())?;

        let password_hash = match req.password {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        self.store
            .update_identity(
                user_id,
                ProfileUpdate {
                    password_hash,
                    first_name: req.first_name,
                    last_name: req.last_name,
                },
            )
            .await?;

        tracing::info!("Updated profile of {}", user_id);

        Ok(())
    }

    /// Users whose first or last name contains `filter`, ignoring case
    pub async fn search_users(&self, filter: &str) -> Result<Vec<PublicUser>> {
        let identities = self.store.search_identities(filter).await?;
        Ok(identities.into_iter().map(PublicUser::from).collect())
    }

    /// Current balance of the caller
    pub async fn balance(&self, user_id: &UserId) -> Result<Amount> {
        Ok(self.store.balance_of(user_id).await?)
    }

    /// Move funds from the caller's account to `to`
    pub async fn transfer(&self, user_id: &UserId, to: &UserId, amount: Decimal) -> Result<()> {
        let amount = Amount::new(amount)?;

        self.store.transfer(user_id, to, amount).await.map_err(|e| {
            tracing::debug!("Transfer of {} from {} to {} failed: {}", amount, user_id, to, e);
            e
        })?;

        tracing::info!("Transferred {} from {} to {}", amount, user_id, to);

        Ok(())
    }

    fn draw_seed(&self) -> Result<Amount> {
        let minor = rand::thread_rng().gen_range(self.seed_range.clone());
        Ok(Amount::from_minor_units(minor)?)
    }

    // bcrypt is CPU bound, keep it off the async workers
    async fn hash_password(&self, password: String) -> Result<String> {
        let auth = Arc::clone(&self.auth);
        tokio::task::spawn_blocking(move || auth.hash_password(&password))
            .await
            .map_err(|e| ServerError::Internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let auth = Arc::clone(&self.auth);
        tokio::task::spawn_blocking(move || auth.verify_password(&password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("Verification task failed: {}", e)))?
    }
}
