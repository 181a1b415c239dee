use serde::{Deserialize, Serialize};

use crate::expenses::Expense;

/// Aggregated sales of one product for one day
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesSummary {
    pub product_type: String,
    pub volume: f64,
    pub price_per_litre: f64,
    pub total_sales: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub station_id: String,
    pub date: String,
    pub products: Vec<ProductSalesSummary>,
    pub expenses: Vec<Expense>,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_sales: f64,
}

/// One row of the paginated net-sales listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetSalesRecord {
    pub date: String,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_sales: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetSalesPage {
    pub records: Vec<NetSalesRecord>,
    pub page: usize,
    pub total_pages: usize,
}

/// Bucketing for the volume trend: all days of a month or all months of a year
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TrendPeriod {
    Daily { year: i32, month: u32 },
    Monthly { year: i32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTrendPoint {
    /// Bucket label, a date for daily trends or a month for monthly ones.
    pub bucket: String,
    pub product_type: String,
    pub volume: f64,
}

/// Latest known tank level against configured capacity
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TankLevel {
    pub product_type: String,
    pub current_stock: f64,
    pub capacity: f64,
    pub percent_full: f64,
    pub last_updated: Option<String>,
}
