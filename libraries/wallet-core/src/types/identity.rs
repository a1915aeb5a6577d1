/// Identity domain types
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// A registered user's account record (credentials + profile).
///
/// Holds the password hash, so it is never serialized outward; use
/// [`PublicUser`] for anything leaving the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Store-assigned identifier
    pub id: UserId,

    /// Email-shaped login name, unique across identities
    pub username: String,

    /// Salted password hash
    pub password_hash: String,

    /// Given name, searchable
    pub first_name: String,

    /// Family name, searchable
    pub last_name: String,

    /// Creation time as a Unix timestamp (seconds)
    pub created_at: i64,
}

/// Fields required to create an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    /// Email-shaped login name
    pub username: String,
    /// Already-hashed password
    pub password_hash: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement password hash
    pub password_hash: Option<String>,
    /// Replacement given name
    pub first_name: Option<String>,
    /// Replacement family name
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Outward projection of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Store-assigned identifier
    pub id: UserId,
    /// Email-shaped login name
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl From<Identity> for PublicUser {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            first_name: identity.first_name,
            last_name: identity.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_drops_password_hash() {
        let identity = Identity {
            id: UserId::new("u1"),
            username: "alice@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Dines".to_string(),
            created_at: 0,
        };

        let json = serde_json::to_value(PublicUser::from(identity)).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["lastName"], "Dines");
        assert!(!json.to_string().contains("secret-hash"));
    }

    #[test]
    fn empty_profile_update() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            first_name: Some("Bob".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
