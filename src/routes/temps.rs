use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::AppState;
use crate::entity::temp_readings;
use crate::error::{AppError, AppResult};
use crate::routes::auth::CurrentOperator;
use crate::routes::{csv_response, determine_format};
use crate::store;

const SHIFTS: [&str; 3] = ["Morning", "Evening", "Night"];

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TempListQuery {
    /// Response format: json (default) or csv
    #[serde(default = "default_format")]
    pub format: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TempReadingRequest {
    /// Reading time; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
    /// Morning, Evening or Night
    pub shift: String,
    pub ab_cot: Option<f64>,
    pub cd_cot: Option<f64>,
    pub flue_gas: Option<f64>,
    pub excess_o2: Option<f64>,
    pub prereformer_max: Option<f64>,
    pub prereformer_min: Option<f64>,
    /// Peephole observations keyed by label; values are numbers or notes
    #[schema(value_type = Object)]
    pub peep_holes: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TempReadingResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub shift: String,
    pub ab_cot: Option<f64>,
    pub cd_cot: Option<f64>,
    pub flue_gas: Option<f64>,
    pub excess_o2: Option<f64>,
    pub prereformer_max: Option<f64>,
    pub prereformer_min: Option<f64>,
    #[schema(value_type = Object)]
    pub peep_holes: Option<serde_json::Value>,
}

impl From<temp_readings::Model> for TempReadingResponse {
    fn from(m: temp_readings::Model) -> Self {
        Self {
            id: m.id,
            timestamp: m.timestamp.to_utc(),
            shift: m.shift,
            ab_cot: m.ab_cot,
            cd_cot: m.cd_cot,
            flue_gas: m.flue_gas,
            excess_o2: m.excess_o2,
            prereformer_max: m.prereformer_max,
            prereformer_min: m.prereformer_min,
            peep_holes: m.peep_holes,
        }
    }
}

fn build_csv(readings: &[TempReadingResponse]) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record([
            "timestamp",
            "shift",
            "ab_cot",
            "cd_cot",
            "flue_gas",
            "excess_o2",
            "prereformer_max",
            "prereformer_min",
        ])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for r in readings {
        writer
            .write_record([
                r.timestamp.to_rfc3339(),
                r.shift.clone(),
                fmt(r.ab_cot),
                fmt(r.cd_cot),
                fmt(r.flue_gas),
                fmt(r.excess_o2),
                fmt(r.prereformer_max),
                fmt(r.prereformer_min),
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// List recent temperature readings
///
/// Newest first, capped at 100. Supports JSON and CSV.
#[utoipa::path(
    get,
    path = "/api/temp-readings",
    params(TempListQuery),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Readings retrieved", body = Vec<TempReadingResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn list_temp_readings(
    State(state): State<AppState>,
    _operator: CurrentOperator,
    Query(query): Query<TempListQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let readings: Vec<TempReadingResponse> = store::list_temp_readings(&state.db)
        .await?
        .into_iter()
        .map(TempReadingResponse::from)
        .collect();

    match determine_format(&query.format, &headers).as_str() {
        "csv" => csv_response(build_csv(&readings)?),
        _ => Ok(Json(readings).into_response()),
    }
}

/// Record a temperature reading
///
/// Append-only; every call creates a new row.
#[utoipa::path(
    post,
    path = "/api/temp-readings",
    request_body = TempReadingRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Reading recorded", body = TempReadingResponse),
        (status = 400, description = "Unknown shift"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn record_temp_reading(
    State(state): State<AppState>,
    operator: CurrentOperator,
    Json(req): Json<TempReadingRequest>,
) -> AppResult<(StatusCode, Json<TempReadingResponse>)> {
    if !SHIFTS.contains(&req.shift.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unknown shift '{}', expected one of {SHIFTS:?}",
            req.shift
        )));
    }

    let reading = temp_readings::ActiveModel {
        timestamp: Set(req.timestamp.unwrap_or_else(Utc::now).into()),
        shift: Set(req.shift),
        ab_cot: Set(req.ab_cot),
        cd_cot: Set(req.cd_cot),
        flue_gas: Set(req.flue_gas),
        excess_o2: Set(req.excess_o2),
        prereformer_max: Set(req.prereformer_max),
        prereformer_min: Set(req.prereformer_min),
        peep_holes: Set(req.peep_holes),
        ..Default::default()
    };

    let saved = store::record_temp_reading(&state.db, reading).await?;
    tracing::debug!(shift = %saved.shift, operator = %operator.employee_id, "Temperature reading recorded");
    Ok((StatusCode::CREATED, Json(saved.into())))
}
