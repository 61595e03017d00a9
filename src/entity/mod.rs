pub mod burners;
pub mod cleaning_history;
pub mod profiles;
pub mod temp_readings;
pub mod tip_damage;
