//! Typed access to the relational store. One function per dashboard
//! intent; failures surface as `AppError::Database` with no local retry.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::board::{BurnerKey, BurnerState, Wall, BURNERS_PER_ROW, GRID_ROWS};
use crate::entity::{burners, cleaning_history, profiles, temp_readings, tip_damage};
use crate::error::AppResult;

/// Batch size for bulk inserts
const BATCH_SIZE: usize = 1000;

/// Newest-first listing cap for temperature readings
const TEMP_READINGS_LIMIT: u64 = 100;

/// Full burner collection in canonical (wall, row, burner_num) order.
///
/// No pagination: the grid is fixed at 360 rows once seeded.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_burners(db: &DatabaseConnection) -> AppResult<Vec<burners::Model>> {
    Ok(burners::Entity::find()
        .order_by_asc(burners::Column::Wall)
        .order_by_asc(burners::Column::Row)
        .order_by_asc(burners::Column::BurnerNum)
        .all(db)
        .await?)
}

/// The full grid as insertable rows, every burner Capped.
///
/// Pure: the caller decides whether to persist.
#[must_use]
pub fn seed_plan(now: DateTime<Utc>) -> Vec<burners::ActiveModel> {
    let mut plan = Vec::with_capacity(crate::board::TOTAL_BURNERS);
    for wall in Wall::ALL {
        for row in 1..=GRID_ROWS {
            for burner_num in 1..=BURNERS_PER_ROW {
                plan.push(burners::ActiveModel {
                    wall: Set(wall.as_str().to_string()),
                    row: Set(row),
                    burner_num: Set(burner_num),
                    state: Set(BurnerState::Capped.letter().to_string()),
                    updated_at: Set(now.into()),
                });
            }
        }
    }
    plan
}

/// Seed the burner grid. Intended to run only when the initial listing
/// came back empty; the composite primary key rejects double-seeding.
///
/// # Errors
///
/// Returns an error if any insert batch fails.
pub async fn seed_burners(db: &DatabaseConnection) -> AppResult<usize> {
    let plan = seed_plan(Utc::now());
    let total = plan.len();

    for batch in plan.chunks(BATCH_SIZE) {
        burners::Entity::insert_many(batch.to_vec()).exec(db).await?;
    }

    Ok(total)
}

/// Upsert one burner's state with a fresh timestamp.
///
/// Conflict target is the (wall, row, burner_num) key, so repeated calls
/// overwrite rather than duplicate. Returns the post-update row.
///
/// # Errors
///
/// Returns an error if the upsert fails; the caller owns any compensating
/// update to optimistic UI state.
pub async fn set_burner_state(
    db: &DatabaseConnection,
    key: &BurnerKey,
    state: BurnerState,
    stamp: DateTime<Utc>,
) -> AppResult<burners::Model> {
    let row = burners::ActiveModel {
        wall: Set(key.wall.as_str().to_string()),
        row: Set(key.row),
        burner_num: Set(key.burner_num),
        state: Set(state.letter().to_string()),
        updated_at: Set(stamp.into()),
    };

    burners::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                burners::Column::Wall,
                burners::Column::Row,
                burners::Column::BurnerNum,
            ])
            .update_columns([burners::Column::State, burners::Column::UpdatedAt])
            .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(burners::Model {
        wall: key.wall.as_str().to_string(),
        row: key.row,
        burner_num: key.burner_num,
        state: state.letter().to_string(),
        updated_at: stamp.into(),
    })
}

/// Most recent temperature readings, newest first, capped at 100.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_temp_readings(db: &DatabaseConnection) -> AppResult<Vec<temp_readings::Model>> {
    Ok(temp_readings::Entity::find()
        .order_by_desc(temp_readings::Column::Timestamp)
        .limit(TEMP_READINGS_LIMIT)
        .all(db)
        .await?)
}

/// Append one temperature reading. Each call creates a new row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn record_temp_reading(
    db: &DatabaseConnection,
    mut reading: temp_readings::ActiveModel,
) -> AppResult<temp_readings::Model> {
    reading.id = Set(Uuid::new_v4());
    reading.created_at = Set(Some(Utc::now().into()));
    Ok(reading.insert(db).await?)
}

/// All cleaning events, most recent cleaning date first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_cleaning_events(
    db: &DatabaseConnection,
) -> AppResult<Vec<cleaning_history::Model>> {
    Ok(cleaning_history::Entity::find()
        .order_by_desc(cleaning_history::Column::CleaningDate)
        .all(db)
        .await?)
}

/// Append one cleaning event.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn record_cleaning_event(
    db: &DatabaseConnection,
    key: &BurnerKey,
    cleaning_date: DateTime<Utc>,
) -> AppResult<cleaning_history::Model> {
    let event = cleaning_history::ActiveModel {
        id: Set(Uuid::new_v4()),
        wall: Set(key.wall.as_str().to_string()),
        row: Set(key.row),
        burner_num: Set(key.burner_num),
        cleaning_date: Set(cleaning_date.into()),
        created_at: Set(Some(Utc::now().into())),
    };
    Ok(event.insert(db).await?)
}

/// All tip damage records, most recently updated first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_tip_damage(db: &DatabaseConnection) -> AppResult<Vec<tip_damage::Model>> {
    Ok(tip_damage::Entity::find()
        .order_by_desc(tip_damage::Column::UpdatedAt)
        .all(db)
        .await?)
}

/// Upsert the damage record for one burner position.
///
/// Returns the row as stored. On conflict the existing row keeps its id,
/// so callers must not assume the insert candidate's id survived.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub async fn upsert_tip_damage(
    db: &DatabaseConnection,
    record: tip_damage::ActiveModel,
) -> AppResult<tip_damage::Model> {
    Ok(tip_damage::Entity::insert(record)
        .on_conflict(
            OnConflict::columns([
                tip_damage::Column::Wall,
                tip_damage::Column::Row,
                tip_damage::Column::BurnerNum,
            ])
            .update_columns([
                tip_damage::Column::Damaged,
                tip_damage::Column::DamageDate,
                tip_damage::Column::Replaced,
                tip_damage::Column::ReplaceDate,
                tip_damage::Column::Remarks,
                tip_damage::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(db)
        .await?)
}

/// Exact-match credential lookup.
///
/// Returns `Ok(None)` for a miss and `Err` for a transport failure so the
/// login surface can distinguish "invalid credentials" from "connection
/// error". Neither outcome authenticates.
///
/// # Errors
///
/// Returns the underlying database error on transport failure.
pub async fn verify_credentials(
    db: &DatabaseConnection,
    employee_id: &str,
    password_hash: &str,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::EmployeeId.eq(employee_id))
        .filter(profiles::Column::PasswordHash.eq(password_hash))
        .one(db)
        .await
}
