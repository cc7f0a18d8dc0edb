//! Authentication middleware and extractors

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::api::SharedState;
use crate::auth::Claims;
use crate::error::{Error, Result};

pub const TOKEN_COOKIE: &str = "portal_token";

/// Find the bearer token in the Authorization header or the session cookie
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(auth_header) = headers.get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim());
            }
        }
    }

    if let Some(cookie_header) = headers.get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                if let Some(token) = cookie
                    .trim()
                    .strip_prefix(TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return Some(token);
                }
            }
        }
    }

    None
}

/// Extract user claims from request headers
pub fn extract_claims(state: &SharedState, headers: &HeaderMap) -> Result<Claims> {
    let token = bearer_token(headers)
        .ok_or_else(|| Error::Unauthorized("No valid authentication token found".to_string()))?;
    state.auth.verify_token(token)
}

/// Middleware for requiring authentication; the claims are available to handlers
/// as an `Extension<Claims>`
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let claims = extract_claims(&state, req.headers())?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
