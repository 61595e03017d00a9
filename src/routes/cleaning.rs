use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::board::{BurnerKey, Wall};
use crate::common::AppState;
use crate::entity::cleaning_history;
use crate::error::{AppError, AppResult};
use crate::routes::auth::CurrentOperator;
use crate::routes::{csv_response, determine_format};
use crate::store;

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CleaningListQuery {
    /// Response format: json (default) or csv
    #[serde(default = "default_format")]
    pub format: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CleaningEventRequest {
    /// Wall letter A-D
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    /// When the burner was cleaned; defaults to now
    pub cleaning_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CleaningEventResponse {
    pub id: Uuid,
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    pub cleaning_date: DateTime<Utc>,
}

impl From<cleaning_history::Model> for CleaningEventResponse {
    fn from(m: cleaning_history::Model) -> Self {
        Self {
            id: m.id,
            wall: m.wall,
            row: m.row,
            burner_num: m.burner_num,
            cleaning_date: m.cleaning_date.to_utc(),
        }
    }
}

fn build_csv(events: &[CleaningEventResponse]) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(["wall", "row", "burner_num", "cleaning_date"])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for e in events {
        writer
            .write_record([
                e.wall.clone(),
                e.row.to_string(),
                e.burner_num.to_string(),
                e.cleaning_date.to_rfc3339(),
            ])
            .map_err(|err| AppError::Internal(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// List the cleaning log
///
/// All events, most recent cleaning date first. Supports JSON and CSV.
#[utoipa::path(
    get,
    path = "/api/cleaning-history",
    params(CleaningListQuery),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Cleaning log retrieved", body = Vec<CleaningEventResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn list_cleaning_history(
    State(state): State<AppState>,
    _operator: CurrentOperator,
    Query(query): Query<CleaningListQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let events: Vec<CleaningEventResponse> = store::list_cleaning_events(&state.db)
        .await?
        .into_iter()
        .map(CleaningEventResponse::from)
        .collect();

    match determine_format(&query.format, &headers).as_str() {
        "csv" => csv_response(build_csv(&events)?),
        _ => Ok(Json(events).into_response()),
    }
}

/// Record a cleaning event
#[utoipa::path(
    post,
    path = "/api/cleaning-history",
    request_body = CleaningEventRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Event recorded", body = CleaningEventResponse),
        (status = 400, description = "Invalid burner position"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn record_cleaning_event(
    State(state): State<AppState>,
    operator: CurrentOperator,
    Json(req): Json<CleaningEventRequest>,
) -> AppResult<(StatusCode, Json<CleaningEventResponse>)> {
    let wall = Wall::from_str(&req.wall).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let key = BurnerKey::new(wall, req.row, req.burner_num)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let cleaning_date = req.cleaning_date.unwrap_or_else(Utc::now);
    let saved = store::record_cleaning_event(&state.db, &key, cleaning_date).await?;
    tracing::debug!(burner = %key, operator = %operator.employee_id, "Cleaning event recorded");
    Ok((StatusCode::CREATED, Json(saved.into())))
}
