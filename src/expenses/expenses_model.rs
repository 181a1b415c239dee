use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::expenses;

pub const FUEL_COLLECTION_CATEGORY: &str = "Fuel Collection";

#[derive(
    Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub station_id: String,
    pub expense_date: String,
    pub category: Option<String>,
    pub description: String,
    pub amount: f64,
    pub created_at: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub station_id: String,
    pub expense_date: String,
    pub category: Option<String>,
    pub description: String,
    pub amount: f64,
    pub created_at: Option<String>,
}

/// Structured payload carried in the description of a Fuel Collection
/// expense. Stored as JSON so the row stays a plain expense for totals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelCollectionDetails {
    pub driver_name: String,
    pub company: String,
    pub product_type: String,
    pub litres: f64,
    pub price_per_litre: f64,
    pub ticket_number: Option<String>,
    pub attendant: Option<String>,
    pub remarks: Option<String>,
}

impl Expense {
    /// Parses the structured payload of a Fuel Collection expense, if this
    /// row carries one.
    pub fn fuel_collection_details(&self) -> Option<FuelCollectionDetails> {
        if self.category.as_deref() != Some(FUEL_COLLECTION_CATEGORY) {
            return None;
        }
        serde_json::from_str(&self.description).ok()
    }
}
