use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shift temperature log entry. Append-only; sensor fields are nullable
/// because operators record whatever instruments are readable that shift.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "temp_readings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub timestamp: DateTimeWithTimeZone,
    pub shift: String,
    pub ab_cot: Option<f64>,
    pub cd_cot: Option<f64>,
    pub flue_gas: Option<f64>,
    pub excess_o2: Option<f64>,
    pub prereformer_max: Option<f64>,
    pub prereformer_min: Option<f64>,
    /// Free-form peephole observations, keyed by peephole label
    pub peep_holes: Option<Json>,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
