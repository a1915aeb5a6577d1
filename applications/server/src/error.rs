/// Server error types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use wallet_core::WalletError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Status for rejected input. Existing clients of this API expect 411.
const REJECTED_INPUT: StatusCode = StatusCode::LENGTH_REQUIRED;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<wallet_storage::StorageError> for ServerError {
    fn from(err: wallet_storage::StorageError) -> Self {
        ServerError::Wallet(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    /// Status code and client-facing message
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Wallet(err) => wallet_status(err),
            ServerError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServerError::BadRequest(_) => (REJECTED_INPUT, "Incorrect inputs".to_string()),
            ServerError::Jwt(_) => (
                StatusCode::FORBIDDEN,
                "You are not a valid user".to_string(),
            ),
            ServerError::Internal(_) | ServerError::Config(_) | ServerError::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

fn wallet_status(err: &WalletError) -> (StatusCode, String) {
    let status = match err {
        WalletError::Validation(_) | WalletError::Conflict(_) | WalletError::Authentication => {
            REJECTED_INPUT
        }
        WalletError::InsufficientFunds
        | WalletError::InvalidAmount(_)
        | WalletError::SelfTransfer => StatusCode::BAD_REQUEST,
        WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
        WalletError::Duplicate(_) => StatusCode::CONFLICT,
        WalletError::Unavailable(_) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
            )
        }
    };
    (status, err.to_string())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_input_uses_411() {
        let cases = [
            ServerError::from(WalletError::validation("username must be an email")),
            ServerError::from(WalletError::Conflict("a@b.co".to_string())),
            ServerError::from(WalletError::Authentication),
            ServerError::BadRequest("missing field".to_string()),
        ];
        for err in cases {
            assert_eq!(err.status_and_message().0, StatusCode::LENGTH_REQUIRED);
        }
    }

    #[test]
    fn test_authentication_message_is_uniform() {
        let (_, message) = ServerError::from(WalletError::Authentication).status_and_message();
        assert_eq!(message, "Error while logging in");
    }

    #[test]
    fn test_transfer_preconditions_are_bad_request() {
        for err in [
            WalletError::InsufficientFunds,
            WalletError::SelfTransfer,
            WalletError::invalid_amount("zero"),
        ] {
            assert_eq!(
                ServerError::from(err).status_and_message().0,
                StatusCode::BAD_REQUEST
            );
        }
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = ServerError::from(WalletError::unavailable("disk I/O error at /var/db"));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!message.contains("/var/db"));
    }

    #[test]
    fn test_token_failures_are_forbidden() {
        let err = ServerError::Unauthorized("You are not a valid user".to_string());
        assert_eq!(err.status_and_message().0, StatusCode::FORBIDDEN);
    }
}
