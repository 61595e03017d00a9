use std::convert::Infallible;
use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use utoipa::{IntoParams, ToSchema};

use crate::board::{BurnerChange, BurnerKey, BurnerState, Wall};
use crate::common::AppState;
use crate::entity::burners;
use crate::error::{AppError, AppResult};
use crate::routes::auth::CurrentOperator;
use crate::store;

#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct BurnerResponse {
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    /// One-letter operating mode: B, N, O or C
    pub state: String,
    pub updated_at: DateTime<Utc>,
}

impl From<burners::Model> for BurnerResponse {
    fn from(m: burners::Model) -> Self {
        Self {
            wall: m.wall,
            row: m.row,
            burner_num: m.burner_num,
            state: m.state,
            updated_at: m.updated_at.to_utc(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetBurnerStateRequest {
    /// New operating mode: B, N, O or C
    pub state: String,
}

/// List the burner grid
///
/// Returns all 360 positions in (wall, row, burner_num) order, served
/// from the live board rather than the store.
#[utoipa::path(
    get,
    path = "/api/burners",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Burner collection retrieved", body = Vec<BurnerResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "burners"
)]
pub async fn list_burners(
    State(state): State<AppState>,
    _operator: CurrentOperator,
) -> AppResult<Json<Vec<BurnerResponse>>> {
    let listing = state
        .board
        .snapshot()
        .into_iter()
        .map(BurnerResponse::from)
        .collect();
    Ok(Json(listing))
}

/// Set one burner's operating mode
///
/// The board is updated optimistically before the upsert is confirmed.
/// On store failure the board reverts to the prior row and the revert is
/// broadcast so every subscribed dashboard reconciles.
#[utoipa::path(
    put,
    path = "/api/burners/{wall}/{row}/{burner_num}",
    params(
        ("wall" = String, Path, description = "Wall letter A-D"),
        ("row" = i16, Path, description = "Row 1-6"),
        ("burner_num" = i16, Path, description = "Burner 1-15"),
    ),
    request_body = SetBurnerStateRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "State updated", body = BurnerResponse),
        (status = 400, description = "Invalid position or state"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Position not on the board"),
    ),
    tag = "burners"
)]
pub async fn set_burner_state(
    State(state): State<AppState>,
    operator: CurrentOperator,
    Path((wall, row, burner_num)): Path<(String, i16, i16)>,
    Json(req): Json<SetBurnerStateRequest>,
) -> AppResult<Json<BurnerResponse>> {
    let wall = Wall::from_str(&wall).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let key =
        BurnerKey::new(wall, row, burner_num).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let new_state =
        BurnerState::from_str(&req.state).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let stamp = Utc::now();

    // Optimistic apply; the returned prior row is the known-good value
    let Some(prior) = state.board.apply_local(&key, new_state, stamp) else {
        return Err(AppError::NotFound(format!("Burner {key} not on the board")));
    };

    match store::set_burner_state(&state.db, &key, new_state, stamp).await {
        Ok(updated) => {
            tracing::debug!(
                burner = %key,
                state = new_state.letter(),
                operator = %operator.employee_id,
                "Burner state updated"
            );
            state.publish(BurnerChange {
                row: updated.clone(),
            });
            Ok(Json(updated.into()))
        }
        Err(e) => {
            tracing::error!(burner = %key, error = %e, "Burner state write failed, reverting");
            state.board.restore(&key, prior.clone());
            state.publish(BurnerChange { row: prior });
            Err(e)
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StreamQuery {
    /// Session token; EventSource cannot set an Authorization header
    pub token: String,
}

/// Subscribe to burner change notifications
///
/// Server-sent events; each event carries the full post-update row.
/// The subscription ends when the client disconnects.
#[utoipa::path(
    get,
    path = "/api/burners/stream",
    params(StreamQuery),
    responses(
        (status = 200, description = "Event stream of burner updates", content_type = "text/event-stream"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "burners"
)]
pub async fn stream_burners(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    if state.sessions.resolve(&query.token).await.is_none() {
        return Err(AppError::Unauthorized(
            "Session expired or invalid".to_string(),
        ));
    }

    let rx = state.changes.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(change) => Event::default()
            .event("burner")
            .json_data(BurnerResponse::from(change.row))
            .ok()
            .map(Ok),
        // Lagged receivers skip ahead; clients refetch on reconnect
        Err(_) => None,
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
