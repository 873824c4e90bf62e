//! Bearer-token authentication.

pub mod jwt;

pub use jwt::JwtService;

use axum::http::{header, HeaderMap};
use reelvault_core::AppError;

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))
}
