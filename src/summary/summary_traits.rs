use chrono::NaiveDate;

use crate::errors::Result;
use crate::summary::summary_model::{DailySummary, NetSalesPage, TankLevel, TrendPeriod, VolumeTrendPoint};

/// Trait for read-only sales aggregation over the daily ledger
pub trait SummaryServiceTrait: Send + Sync {
    fn daily_summary(&self, station_id: &str, date: NaiveDate) -> Result<DailySummary>;

    /// Net sales per record date, newest first, ten dates per page.
    /// Pages are one-based.
    fn net_sales_by_date(&self, station_id: &str, page: usize) -> Result<NetSalesPage>;

    /// Per-product sales volume bucketed over a month (daily) or a year
    /// (monthly). Buckets without sales are zero-filled.
    fn volume_trend(&self, station_id: &str, period: TrendPeriod) -> Result<Vec<VolumeTrendPoint>>;

    fn tank_levels(&self, station_id: &str) -> Result<Vec<TankLevel>>;
}
