//! API route handlers

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::server::SharedState;
use crate::access::DeviceClass;
use crate::auth::{bearer_token, AuthResponse, Claims, LoginRequest};
use crate::error::Error;
use crate::session::{Authenticated, Session};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    pub path: String,
    /// Viewport width in CSS pixels; desktop when absent
    pub width: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Auth routes

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.auth.login(&req.email, &req.password).await {
        Ok((token, user)) => (StatusCode::OK, Json(AuthResponse::ok(token, user))),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!("Login failed: {}", e);
            }
            (status, Json(AuthResponse::failure(e.to_string())))
        }
    }
}

pub async fn me(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, Error> {
    let user = state.auth.user_for_claims(&claims).await?;
    Ok(Json(ApiResponse::ok(user)))
}

// Navigation

/// Session as seen by the server for this request; anonymous unless the
/// bearer token resolves to an existing user
async fn request_session(state: &SharedState, headers: &HeaderMap) -> Session {
    let Some(token) = bearer_token(headers) else {
        return Session::default();
    };

    match state.auth.current_user(token).await {
        Ok(user) => Authenticated::new(user, token.to_string())
            .map(|auth| Session::authenticated(auth, false))
            .unwrap_or_default(),
        Err(e) => {
            tracing::debug!("Ignoring bearer token on navigate: {}", e);
            Session::default()
        }
    }
}

pub async fn navigate(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<NavigateQuery>,
) -> Result<impl IntoResponse, Error> {
    if !query.path.starts_with('/') {
        return Err(Error::BadRequest(format!(
            "path must be absolute: {}",
            query.path
        )));
    }

    let session = request_session(&state, &headers).await;
    let device = query
        .width
        .map(DeviceClass::from_width)
        .unwrap_or(DeviceClass::Desktop);

    let navigation = state.navigator.resolve(&session, &query.path, device)?;
    Ok(Json(ApiResponse::ok(navigation)))
}
