/// User API routes
use crate::{
    api::extract::{ApiJson, ApiQuery},
    error::Result,
    middleware::AuthenticatedUser,
    services::{ProfileUpdateRequest, SigninRequest, SignupRequest},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use wallet_core::PublicUser;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkQuery {
    #[serde(default)]
    pub filter: String,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub user: Vec<PublicUser>,
}

/// POST /api/v1/user/signup
pub async fn signup(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    let outcome = app_state.accounts.signup(req).await?;

    Ok(Json(TokenResponse {
        message: "User created successfully".to_string(),
        token: outcome.token,
    }))
}

/// POST /api/v1/user/signin
pub async fn signin(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<SigninRequest>,
) -> Result<Json<TokenResponse>> {
    let token = app_state.accounts.signin(req).await?;

    Ok(Json(TokenResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// PUT /api/v1/user
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<ProfileUpdateRequest>,
) -> Result<Json<MessageResponse>> {
    app_state
        .accounts
        .update_profile(user.user_id(), req)
        .await?;

    Ok(Json(MessageResponse {
        message: "Updated successfully".to_string(),
    }))
}

/// GET /api/v1/user/bulk?filter=
pub async fn bulk(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<BulkQuery>,
) -> Result<Json<BulkResponse>> {
    let user = app_state.accounts.search_users(&query.filter).await?;
    Ok(Json(BulkResponse { user }))
}
