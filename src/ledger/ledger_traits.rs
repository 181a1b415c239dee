use crate::errors::Result;
use crate::ledger::ledger_model::{
    DayStock, FuelRecord, FuelRecordWithPump, MeterReadingInput, MonthlyStock, NewFuelRecord,
    NewMonthlyStock, Propagation, ReconciliationOutcome, RestockOutcome, TankGroup,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for daily-record store operations
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    fn get_record(&self, station: &str, pump_id: &str, date: &str) -> Result<Option<FuelRecord>>;
    fn get_records_for_date(&self, station: &str, date: &str) -> Result<Vec<FuelRecord>>;
    fn get_records_in_range(&self, station: &str, from: &str, to: &str) -> Result<Vec<FuelRecord>>;
    fn get_pump_records_in_range(
        &self,
        station: &str,
        pump_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<FuelRecord>>;
    fn get_most_recent_before(
        &self,
        station: &str,
        pump_id: &str,
        date: &str,
    ) -> Result<Option<FuelRecord>>;
    /// Distinct record dates for a station, newest first.
    fn get_record_dates(&self, station: &str) -> Result<Vec<String>>;
    fn get_latest_record_for_product(
        &self,
        station: &str,
        product_type: &str,
    ) -> Result<Option<FuelRecord>>;

    async fn upsert_record(&self, record: NewFuelRecord) -> Result<FuelRecord>;
    /// Commits today's row and its forward propagation in one transaction.
    async fn commit_reading(
        &self,
        today: NewFuelRecord,
        propagation: Propagation,
    ) -> Result<FuelRecord>;
    async fn update_stock(&self, id: &str, opening_stock: f64, closing_stock: f64) -> Result<()>;
    async fn update_closing_stock(&self, id: &str, closing_stock: f64) -> Result<()>;
    async fn delete_record(&self, id: &str) -> Result<usize>;

    async fn upsert_monthly_stock(&self, row: NewMonthlyStock) -> Result<MonthlyStock>;
}

/// Trait for stock-ledger operations
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn record_meter_reading(&self, input: MeterReadingInput) -> Result<FuelRecord>;
    async fn restock(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<RestockOutcome>;
    fn resolve_day_stock(&self, station: &str, pump_id: &str, date: NaiveDate) -> Result<DayStock>;
    fn reconciliation_excess(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        real_stock: f64,
    ) -> Result<f64>;
    async fn reconcile_month_open(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        real_stock: f64,
    ) -> Result<ReconciliationOutcome>;
    async fn seed_day(&self, station: &str, date: NaiveDate) -> Result<usize>;
    fn records_for_date(&self, station: &str, date: NaiveDate) -> Result<Vec<FuelRecordWithPump>>;
    async fn delete_record(&self, id: &str) -> Result<usize>;
    fn tank_groups(&self, station: &str, date: NaiveDate) -> Result<Vec<TankGroup>>;
}
