/// Account API routes
use crate::{
    api::{extract::ApiJson, user::MessageResponse},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wallet_core::UserId;

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub to: UserId,
    pub amount: Decimal,
}

/// GET /api/v1/account/balance
pub async fn balance(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<BalanceResponse>> {
    let balance = app_state.accounts.balance(user.user_id()).await?;

    Ok(Json(BalanceResponse {
        balance: balance.value(),
    }))
}

/// POST /api/v1/account/transfer
pub async fn transfer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<TransferRequest>,
) -> Result<Json<MessageResponse>> {
    app_state
        .accounts
        .transfer(user.user_id(), &req.to, req.amount)
        .await?;

    Ok(Json(MessageResponse {
        message: "Transfer successful".to_string(),
    }))
}
