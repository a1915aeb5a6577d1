/// API route modules
pub mod account;
pub mod extract;
pub mod health;
pub mod user;

use crate::{middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the HTTP router, everything nested under `/api/v1`
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/user/signup", post(user::signup))
        .route("/user/signin", post(user::signin))
        .route("/user/bulk", get(user::bulk));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/user", put(user::update_profile))
        .route("/user/", put(user::update_profile))
        .route("/account/balance", get(account::balance))
        .route("/account/transfer", post(account::transfer))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
