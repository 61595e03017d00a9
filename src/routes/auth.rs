use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::session::OperatorSession;
use crate::store;

/// Fixed operator-facing messages; the distinction between them is the
/// whole error contract of the login surface.
const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials. Please contact IT Helpdesk.";
const MSG_CONNECTION_ERROR: &str = "Connection error. Please try again.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub employee_id: String,
    /// Hex digest as produced by the dashboard page; this layer only
    /// compares it for equality, it enforces no hashing scheme.
    pub password_hash: String,
}

/// Authenticate an operator
///
/// A credential miss and a store failure are deliberately distinct:
/// the first is 401 "invalid credentials", the second 503 "connection
/// error". Both fail closed.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = OperatorSession),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Credential store unreachable"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<OperatorSession>> {
    let profile = store::verify_credentials(&state.db, &req.employee_id, &req.password_hash)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Credential lookup failed");
            AppError::ServiceUnavailable(MSG_CONNECTION_ERROR.to_string())
        })?;

    match profile {
        Some(profile) => {
            let session = state.sessions.login(&profile.employee_id).await;
            Ok(Json(session))
        }
        None => {
            tracing::info!(employee_id = %req.employee_id, "Login rejected");
            Err(AppError::Unauthorized(MSG_INVALID_CREDENTIALS.to_string()))
        }
    }
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(("bearer_token" = [])),
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    operator: CurrentOperator,
) -> AppResult<StatusCode> {
    state.sessions.logout(&operator.token).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Extractor resolving the `Authorization: Bearer` token to a live session.
#[derive(Debug, Clone)]
pub struct CurrentOperator {
    pub employee_id: String,
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let employee_id = state
            .sessions
            .resolve(&token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Session expired or invalid".to_string()))?;

        Ok(Self { employee_id, token })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
