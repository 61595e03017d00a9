use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tip damage record for a burner position. At most one per
/// (wall, row, burner_num); writes upsert on that key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tip_damage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub wall: String,
    pub row: i16,
    pub burner_num: i16,
    /// "Yes" / "No", kept as strings to match the shift-log convention
    pub damaged: String,
    pub damage_date: Option<DateTimeWithTimeZone>,
    pub replaced: String,
    pub replace_date: Option<DateTimeWithTimeZone>,
    pub remarks: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
