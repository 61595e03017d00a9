use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::board::{BurnerKey, Wall};
use crate::common::AppState;
use crate::entity::tip_damage;
use crate::error::{AppError, AppResult};
use crate::routes::auth::CurrentOperator;
use crate::store;

const YES_NO: [&str; 2] = ["Yes", "No"];

#[derive(Debug, Deserialize, ToSchema)]
pub struct TipDamageRequest {
    /// Wall letter A-D
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    /// "Yes" or "No"
    pub damaged: String,
    pub damage_date: Option<DateTime<Utc>>,
    /// "Yes" or "No"
    pub replaced: String,
    pub replace_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TipDamageResponse {
    pub id: Uuid,
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    pub damaged: String,
    pub damage_date: Option<DateTime<Utc>>,
    pub replaced: String,
    pub replace_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<tip_damage::Model> for TipDamageResponse {
    fn from(m: tip_damage::Model) -> Self {
        Self {
            id: m.id,
            wall: m.wall,
            row: m.row,
            burner_num: m.burner_num,
            damaged: m.damaged,
            damage_date: m.damage_date.map(|d| d.to_utc()),
            replaced: m.replaced,
            replace_date: m.replace_date.map(|d| d.to_utc()),
            remarks: m.remarks,
            updated_at: m.updated_at.to_utc(),
        }
    }
}

fn require_yes_no(field: &str, value: &str) -> AppResult<()> {
    if YES_NO.contains(&value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{field} must be \"Yes\" or \"No\", got '{value}'"
        )))
    }
}

/// List tip damage records
///
/// Most recently updated first. At most one record per burner position.
#[utoipa::path(
    get,
    path = "/api/tip-damage",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Records retrieved", body = Vec<TipDamageResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn list_tip_damage(
    State(state): State<AppState>,
    _operator: CurrentOperator,
) -> AppResult<Json<Vec<TipDamageResponse>>> {
    let records = store::list_tip_damage(&state.db)
        .await?
        .into_iter()
        .map(TipDamageResponse::from)
        .collect();
    Ok(Json(records))
}

/// Upsert the damage record for one burner position
///
/// Repeated writes for the same position overwrite the previous record.
#[utoipa::path(
    put,
    path = "/api/tip-damage",
    request_body = TipDamageRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Record saved", body = TipDamageResponse),
        (status = 400, description = "Invalid position or flag"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "logs"
)]
pub async fn upsert_tip_damage(
    State(state): State<AppState>,
    operator: CurrentOperator,
    Json(req): Json<TipDamageRequest>,
) -> AppResult<Json<TipDamageResponse>> {
    let wall = Wall::from_str(&req.wall).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let key = BurnerKey::new(wall, req.row, req.burner_num)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    require_yes_no("damaged", &req.damaged)?;
    require_yes_no("replaced", &req.replaced)?;

    // The id here is only the insert candidate; a conflicting write keeps
    // the stored row's id, and the store reports whichever won.
    let active = tip_damage::ActiveModel {
        id: Set(Uuid::new_v4()),
        wall: Set(key.wall.as_str().to_string()),
        row: Set(key.row),
        burner_num: Set(key.burner_num),
        damaged: Set(req.damaged),
        damage_date: Set(req.damage_date.map(Into::into)),
        replaced: Set(req.replaced),
        replace_date: Set(req.replace_date.map(Into::into)),
        remarks: Set(req.remarks),
        updated_at: Set(Utc::now().into()),
    };

    let saved = store::upsert_tip_damage(&state.db, active).await?;
    tracing::debug!(burner = %key, operator = %operator.employee_id, "Tip damage record saved");
    Ok(Json(saved.into()))
}
