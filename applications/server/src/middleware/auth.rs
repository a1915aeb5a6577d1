/// Bearer token middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use wallet_core::UserId;

const NOT_A_VALID_USER: &str = "You are not a valid user";

/// Identity proven by the request's session token.
/// Can be used as an extractor in handlers behind [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Middleware that validates `Authorization: Bearer <token>`
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ServerError::Unauthorized(NOT_A_VALID_USER.to_string()))?;

    let user_id = auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Unauthorized(NOT_A_VALID_USER.to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Unauthorized(NOT_A_VALID_USER.to_string()))
    }
}
