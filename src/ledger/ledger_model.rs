use chrono::NaiveDate;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::pumps::Pump;

/// Provenance of a daily record: operator-entered, system-derived placeholder,
/// or written by a restock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Manual,
    Auto,
    Restock,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Manual => "manual",
            InputMode::Auto => "auto",
            InputMode::Restock => "restock",
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(InputMode::Manual),
            "auto" => Ok(InputMode::Auto),
            "restock" => Ok(InputMode::Restock),
            other => Err(format!("Unknown input mode: {}", other)),
        }
    }
}

/// One daily meter/stock record per (station, pump, date)
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::fuel_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub id: String,
    pub station_code: String,
    pub pump_id: String,
    pub product_type: Option<String>,
    pub record_date: String,
    pub meter_opening: Option<f64>,
    pub meter_closing: Option<f64>,
    pub sales_volume: f64,
    pub price_per_litre: Option<f64>,
    pub total_sales: Option<f64>,
    pub opening_stock: f64,
    pub closing_stock: f64,
    pub input_mode: String,
    pub created_at: Option<String>,
}

impl FuelRecord {
    pub fn meter_opening(&self) -> f64 {
        self.meter_opening.unwrap_or(0.0)
    }

    pub fn meter_closing(&self) -> f64 {
        self.meter_closing.unwrap_or(0.0)
    }

    pub fn price_per_litre(&self) -> f64 {
        self.price_per_litre.unwrap_or(0.0)
    }

    pub fn total_sales(&self) -> f64 {
        self.total_sales.unwrap_or(0.0)
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode.parse().unwrap_or(InputMode::Manual)
    }

    /// Placeholder rows are seeded/propagated rows no operator has touched yet.
    pub fn is_placeholder(&self) -> bool {
        self.input_mode() == InputMode::Auto && self.sales_volume == 0.0
    }
}

/// Input for inserting/upserting a daily record
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::fuel_records)]
#[serde(rename_all = "camelCase")]
pub struct NewFuelRecord {
    pub id: Option<String>,
    pub station_code: String,
    pub pump_id: String,
    pub product_type: Option<String>,
    pub record_date: String,
    pub meter_opening: Option<f64>,
    pub meter_closing: Option<f64>,
    pub sales_volume: f64,
    pub price_per_litre: Option<f64>,
    pub total_sales: Option<f64>,
    pub opening_stock: f64,
    pub closing_stock: f64,
    pub input_mode: String,
    pub created_at: Option<String>,
}

/// Operator input for the meter-reading path
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeterReadingInput {
    pub station_code: String,
    pub pump_id: String,
    pub date: NaiveDate,
    pub meter_opening: f64,
    pub meter_closing: f64,
}

/// Resolved stock view for one pump/date, after fallback resolution
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayStock {
    pub opening_stock: f64,
    pub sales_volume: f64,
    pub closing_stock: f64,
    pub opening_meter: f64,
    pub closing_meter: f64,
}

/// Derived, non-persisted aggregate of the pumps sharing one tank
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TankGroup {
    pub tank_id: String,
    pub product_type: String,
    pub pumps: Vec<Pump>,
    pub opening_stock: f64,
    pub closing_stock: f64,
    pub sales_volume: f64,
    pub max_capacity: f64,
}

/// Daily record joined with its pump for display lists
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecordWithPump {
    #[serde(flatten)]
    pub record: FuelRecord,
    pub pump_number: i32,
}

/// Forward propagation into tomorrow's row, decided before the commit
#[derive(Debug, Clone)]
pub enum Propagation {
    /// Tomorrow's row exists: re-anchor its opening stock/meter and replace
    /// its derived fields with values recomputed against the new anchor.
    Update(PropagationUpdate),
    /// Tomorrow's row does not exist yet: create an auto placeholder.
    Create(NewFuelRecord),
}

#[derive(Debug, Clone)]
pub struct PropagationUpdate {
    pub id: String,
    pub opening_stock: f64,
    pub meter_opening: f64,
    pub sales_volume: f64,
    pub total_sales: Option<f64>,
    pub closing_stock: f64,
}

/// Result of a tank restock, with per-pump outcomes
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RestockOutcome {
    pub tank_id: String,
    pub amount: f64,
    pub new_opening_stock: f64,
    pub updated_pumps: Vec<String>,
    pub skipped_pumps: Vec<String>,
}

/// Result of a month-start reconciliation
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    pub tank_id: String,
    pub date: NaiveDate,
    pub real_stock: f64,
    pub excess: f64,
    pub updated_pumps: Vec<String>,
    pub skipped_pumps: Vec<String>,
}

/// Month-start stock snapshot persisted alongside a reconciliation
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::monthly_stock)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStock {
    pub id: String,
    pub station_id: String,
    pub product_type: String,
    pub month_year: String,
    pub opening_stock: f64,
    pub actual_closing_stock: Option<f64>,
    pub excess: Option<f64>,
    pub created_at: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::monthly_stock)]
#[serde(rename_all = "camelCase")]
pub struct NewMonthlyStock {
    pub id: Option<String>,
    pub station_id: String,
    pub product_type: String,
    pub month_year: String,
    pub opening_stock: f64,
    pub actual_closing_stock: Option<f64>,
    pub excess: Option<f64>,
    pub created_at: Option<String>,
}

/// Canonical monetary rounding: volumes stay exact, money is rounded to
/// 2 decimal places, midpoint away from zero.
pub fn monetary_total(volume: f64, price_per_litre: f64) -> f64 {
    let volume = Decimal::from_f64_retain(volume).unwrap_or_default();
    let price = Decimal::from_f64_retain(price_per_litre).unwrap_or_default();
    (volume * price)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
