use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One burner on a reformer wall. The grid is fixed at 4 walls x 6 rows x
/// 15 burners; rows are never deleted once seeded.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "burners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub wall: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub row: i16,
    #[sea_orm(primary_key, auto_increment = false)]
    pub burner_num: i16,
    /// Operating mode: B (both fuels), N (NG only), O (off-gas only), C (capped)
    pub state: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
