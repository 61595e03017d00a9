use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== BURNERS ==========
        manager
            .create_table(
                Table::create()
                    .table(Burners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Burners::Wall).string_len(1).not_null())
                    .col(ColumnDef::new(Burners::Row).small_integer().not_null())
                    .col(ColumnDef::new(Burners::BurnerNum).small_integer().not_null())
                    .col(ColumnDef::new(Burners::State).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Burners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT NOW()"),
                    )
                    // Composite key doubles as the upsert conflict target for state writes
                    .primary_key(
                        Index::create()
                            .name("burners_position_pk")
                            .col(Burners::Wall)
                            .col(Burners::Row)
                            .col(Burners::BurnerNum),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== TEMP READINGS ==========
        manager
            .create_table(
                Table::create()
                    .table(TempReadings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TempReadings::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()"),
                    )
                    .col(
                        ColumnDef::new(TempReadings::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TempReadings::Shift).string_len(16).not_null())
                    .col(ColumnDef::new(TempReadings::AbCot).double())
                    .col(ColumnDef::new(TempReadings::CdCot).double())
                    .col(ColumnDef::new(TempReadings::FlueGas).double())
                    .col(ColumnDef::new(TempReadings::ExcessO2).double())
                    .col(ColumnDef::new(TempReadings::PrereformerMax).double())
                    .col(ColumnDef::new(TempReadings::PrereformerMin).double())
                    .col(ColumnDef::new(TempReadings::PeepHoles).json_binary())
                    .col(
                        ColumnDef::new(TempReadings::CreatedAt)
                            .timestamp_with_time_zone()
                            .extra("DEFAULT NOW()"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_temp_readings_timestamp ON temp_readings (timestamp DESC)",
            )
            .await?;

        // ========== CLEANING HISTORY ==========
        manager
            .create_table(
                Table::create()
                    .table(CleaningHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CleaningHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()"),
                    )
                    .col(ColumnDef::new(CleaningHistory::Wall).string_len(1).not_null())
                    .col(ColumnDef::new(CleaningHistory::Row).small_integer().not_null())
                    .col(
                        ColumnDef::new(CleaningHistory::BurnerNum)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CleaningHistory::CleaningDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CleaningHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .extra("DEFAULT NOW()"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_cleaning_history_date ON cleaning_history (cleaning_date DESC)",
            )
            .await?;

        // ========== TIP DAMAGE ==========
        manager
            .create_table(
                Table::create()
                    .table(TipDamage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TipDamage::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()"),
                    )
                    .col(ColumnDef::new(TipDamage::Wall).string_len(1).not_null())
                    .col(ColumnDef::new(TipDamage::Row).small_integer().not_null())
                    .col(ColumnDef::new(TipDamage::BurnerNum).small_integer().not_null())
                    .col(ColumnDef::new(TipDamage::Damaged).string_len(3).not_null())
                    .col(ColumnDef::new(TipDamage::DamageDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TipDamage::Replaced).string_len(3).not_null())
                    .col(ColumnDef::new(TipDamage::ReplaceDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TipDamage::Remarks).text())
                    .col(
                        ColumnDef::new(TipDamage::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT NOW()"),
                    )
                    .to_owned(),
            )
            .await?;

        // One damage record per burner position
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX tip_damage_position_idx ON tip_damage (wall, "row", burner_num)"#,
            )
            .await?;

        // ========== PROFILES ==========
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::EmployeeId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::PasswordHash)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .extra("DEFAULT NOW()"),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TipDamage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CleaningHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TempReadings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Burners::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Burners {
    Table,
    Wall,
    Row,
    BurnerNum,
    State,
    UpdatedAt,
}

#[derive(Iden)]
enum TempReadings {
    Table,
    Id,
    Timestamp,
    Shift,
    AbCot,
    CdCot,
    FlueGas,
    ExcessO2,
    PrereformerMax,
    PrereformerMin,
    PeepHoles,
    CreatedAt,
}

#[derive(Iden)]
enum CleaningHistory {
    Table,
    Id,
    Wall,
    Row,
    BurnerNum,
    CleaningDate,
    CreatedAt,
}

#[derive(Iden)]
enum TipDamage {
    Table,
    Id,
    Wall,
    Row,
    BurnerNum,
    Damaged,
    DamageDate,
    Replaced,
    ReplaceDate,
    Remarks,
    UpdatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    EmployeeId,
    PasswordHash,
    CreatedAt,
}
