/// Extractors that answer rejections with the API error shape
use crate::error::ServerError;
use axum::extract::{FromRequest, FromRequestParts};

/// Like `axum::Json`, but a malformed body becomes a [`ServerError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Like `axum::extract::Query`, but a malformed query string becomes a [`ServerError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);
