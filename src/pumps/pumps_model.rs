use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A dispensing unit with its own meter, drawing from one tank
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::pumps)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Pump {
    pub id: String,
    pub station_id: String,
    pub pump_number: i32,
    pub product_type: String,
    pub tank_id: String,
    pub capacity: f64,
    pub created_at: Option<String>,
}

/// Input for registering a pump
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::pumps)]
#[serde(rename_all = "camelCase")]
pub struct NewPump {
    pub id: Option<String>,
    pub station_id: String,
    pub pump_number: i32,
    pub product_type: String,
    pub tank_id: String,
    pub capacity: f64,
    pub created_at: Option<String>,
}

/// Station-level storage capacity for one product type
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::tank_capacities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TankCapacity {
    pub id: String,
    pub station_code: String,
    pub product_type: String,
    pub capacity: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::tank_capacities)]
#[serde(rename_all = "camelCase")]
pub struct NewTankCapacity {
    pub id: Option<String>,
    pub station_code: String,
    pub product_type: String,
    pub capacity: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
