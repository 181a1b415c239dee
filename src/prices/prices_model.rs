use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::product_prices;

/// One append-only price entry. The price in force for a product on a given
/// day is the entry with the latest effective_date not after that day.
#[derive(
    Queryable, Identifiable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(table_name = product_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    pub id: String,
    pub product_type: String,
    pub price_per_litre: f64,
    pub effective_date: String,
    pub created_at: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = product_prices)]
#[serde(rename_all = "camelCase")]
pub struct NewProductPrice {
    pub id: Option<String>,
    pub product_type: String,
    pub price_per_litre: f64,
    pub effective_date: String,
    pub created_at: Option<String>,
}
