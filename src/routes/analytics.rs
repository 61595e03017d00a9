use axum::{extract::State, Json};

use crate::board::analytics::WallAnalytics;
use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::auth::CurrentOperator;

/// Per-wall burner distribution analytics
///
/// Counts, imbalance, and severity for all four walls, computed from the
/// live board.
#[utoipa::path(
    get,
    path = "/api/analytics/walls",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Analytics computed", body = Vec<WallAnalytics>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "analytics"
)]
pub async fn wall_analytics(
    State(state): State<AppState>,
    _operator: CurrentOperator,
) -> AppResult<Json<Vec<WallAnalytics>>> {
    Ok(Json(state.board.analytics()))
}

/// Active imbalance alarms
///
/// Walls whose severity is above normal. An empty list means all walls
/// are balanced.
#[utoipa::path(
    get,
    path = "/api/alarms",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Active alarms listed", body = Vec<WallAnalytics>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "analytics"
)]
pub async fn active_alarms(
    State(state): State<AppState>,
    _operator: CurrentOperator,
) -> AppResult<Json<Vec<WallAnalytics>>> {
    let alarms = state
        .board
        .analytics()
        .into_iter()
        .filter(|a| !a.severity.is_normal())
        .collect();
    Ok(Json(alarms))
}
