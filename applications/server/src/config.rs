/// Server configuration
use crate::error::{Result, ServerError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wallet_core::Amount;

/// Cost bounds accepted by bcrypt
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_accounts")]
    pub accounts: AccountSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_token_expiration_hours")]
    pub token_expiration_hours: u64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

/// Promotional starting balance range, in whole currency units
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountSettings {
    #[serde(default = "default_seed_min")]
    pub seed_min: Decimal,

    #[serde(default = "default_seed_max")]
    pub seed_max: Decimal,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file and environment
    ///
    /// Environment variables use the `WALLET_` prefix and `__` between
    /// nested keys, e.g. `WALLET_AUTH__JWT_SECRET`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("WALLET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set WALLET_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.auth.bcrypt_cost
            )));
        }

        if self.auth.token_expiration_hours == 0 {
            return Err(ServerError::Config(
                "Token expiration must be at least one hour".to_string(),
            ));
        }

        let accounts = &self.accounts;
        for seed in [accounts.seed_min, accounts.seed_max] {
            Amount::new(seed)
                .map_err(|e| ServerError::Config(format!("Invalid seed bound {}: {}", seed, e)))?;
        }
        if accounts.seed_min > accounts.seed_max {
            return Err(ServerError::Config(format!(
                "Seed range is empty: {} > {}",
                accounts.seed_min, accounts.seed_max
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/wallet.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        token_expiration_hours: default_token_expiration_hours(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_token_expiration_hours() -> u64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_accounts() -> AccountSettings {
    AccountSettings {
        seed_min: default_seed_min(),
        seed_max: default_seed_max(),
    }
}

fn default_seed_min() -> Decimal {
    Decimal::ONE
}

fn default_seed_max() -> Decimal {
    Decimal::new(10_000, 0)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            accounts: default_accounts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_expiration_hours, 24);
        assert_eq!(config.accounts.seed_min, Decimal::ONE);
        assert_eq!(config.accounts.seed_max, Decimal::new(10_000, 0));
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = valid_config();
        config.auth.bcrypt_cost = 3;
        assert!(config.validate().is_err());

        config.auth.bcrypt_cost = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_range_validation() {
        let mut config = valid_config();
        config.accounts.seed_min = Decimal::new(-1, 0);
        assert!(config.validate().is_err());

        config.accounts.seed_min = Decimal::new(50, 0);
        config.accounts.seed_max = Decimal::new(10, 0);
        assert!(config.validate().is_err());

        config.accounts.seed_min = Decimal::ZERO;
        config.accounts.seed_max = Decimal::ZERO;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 4000

[auth]
jwt_secret = "from-file"
bcrypt_cost = 4

[accounts]
seed_min = 10
seed_max = 20
"#,
        )
        .unwrap();

        let config = ServerConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.auth.bcrypt_cost, 4);
        assert_eq!(config.accounts.seed_min, Decimal::new(10, 0));
        assert_eq!(config.accounts.seed_max, Decimal::new(20, 0));
        assert_eq!(config.storage.database_url, "sqlite://./data/wallet.db");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        // Tests run from the crate directory, which has no config.toml
        let config = ServerConfig::load().unwrap();
        let defaults = ServerConfig::default();
        assert_eq!(config.storage.database_url, defaults.storage.database_url);
        assert_eq!(config.accounts.seed_min, defaults.accounts.seed_min);
        assert_eq!(config.accounts.seed_max, defaults.accounts.seed_max);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ServerConfig::load_from(Some(Path::new("/nonexistent/wallet.toml")));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
