use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::constants::{DATE_FORMAT, DEFAULT_TANK_CAPACITY, MONTH_FORMAT, PRODUCT_TYPES};
use crate::errors::{Result, ValidationError};
use crate::expenses::ExpenseServiceTrait;
use crate::ledger::ledger_traits::LedgerRepositoryTrait;
use crate::ledger::FuelRecord;
use crate::pumps::PumpServiceTrait;
use crate::summary::summary_model::{
    DailySummary, NetSalesPage, NetSalesRecord, ProductSalesSummary, TankLevel, TrendPeriod,
    VolumeTrendPoint,
};
use crate::summary::summary_traits::SummaryServiceTrait;

const PAGE_SIZE: usize = 10;

pub struct SummaryService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    expense_service: Arc<dyn ExpenseServiceTrait>,
    pump_service: Arc<dyn PumpServiceTrait>,
}

impl SummaryService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        expense_service: Arc<dyn ExpenseServiceTrait>,
        pump_service: Arc<dyn PumpServiceTrait>,
    ) -> Self {
        SummaryService {
            ledger_repository,
            expense_service,
            pump_service,
        }
    }

    /// Groups the day's rows by product, summing volume and money. The price
    /// shown is the first priced row of the product.
    fn aggregate_products(records: &[FuelRecord]) -> Vec<ProductSalesSummary> {
        let mut by_product: BTreeMap<String, ProductSalesSummary> = BTreeMap::new();
        for record in records {
            let product = record
                .product_type
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string());
            let entry = by_product
                .entry(product.clone())
                .or_insert_with(|| ProductSalesSummary {
                    product_type: product,
                    volume: 0.0,
                    price_per_litre: 0.0,
                    total_sales: 0.0,
                });
            entry.volume += record.sales_volume;
            entry.total_sales += record.total_sales();
            if entry.price_per_litre == 0.0 {
                entry.price_per_litre = record.price_per_litre();
            }
        }
        by_product.into_values().collect()
    }
}

impl SummaryServiceTrait for SummaryService {
    fn daily_summary(&self, station_id: &str, date: NaiveDate) -> Result<DailySummary> {
        let date_str = date.format(DATE_FORMAT).to_string();
        let records = self
            .ledger_repository
            .get_records_for_date(station_id, &date_str)?;

        let products = Self::aggregate_products(&records);
        let total_sales: f64 = products.iter().map(|p| p.total_sales).sum();
        let expenses = self.expense_service.expenses_for_date(station_id, &date_str)?;
        let total_expenses = self.expense_service.total_for_date(station_id, &date_str)?;

        Ok(DailySummary {
            station_id: station_id.to_string(),
            date: date_str,
            products,
            expenses,
            total_sales,
            total_expenses,
            net_sales: total_sales - total_expenses,
        })
    }

    fn net_sales_by_date(&self, station_id: &str, page: usize) -> Result<NetSalesPage> {
        let dates = self.ledger_repository.get_record_dates(station_id)?;
        let total_pages = dates.len().div_ceil(PAGE_SIZE).max(1);
        let page = page.max(1);

        let mut records = Vec::new();
        for date in dates.iter().skip((page - 1) * PAGE_SIZE).take(PAGE_SIZE) {
            let rows = self.ledger_repository.get_records_for_date(station_id, date)?;
            let total_sales: f64 = rows.iter().map(|r| r.total_sales()).sum();
            let total_expenses = self.expense_service.total_for_date(station_id, date)?;
            records.push(NetSalesRecord {
                date: date.clone(),
                total_sales,
                total_expenses,
                net_sales: total_sales - total_expenses,
            });
        }

        Ok(NetSalesPage {
            records,
            page,
            total_pages,
        })
    }

    fn volume_trend(&self, station_id: &str, period: TrendPeriod) -> Result<Vec<VolumeTrendPoint>> {
        let (from, to, buckets) = match period {
            TrendPeriod::Daily { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| ValidationError::InvalidDate(format!("{}-{}", year, month)))?;
                let next_month = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .ok_or_else(|| ValidationError::InvalidDate(format!("{}-{}", year, month)))?;
                let last = next_month.pred_opt().unwrap_or(first);

                let labels: Vec<String> = first
                    .iter_days()
                    .take_while(|d| *d <= last)
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .collect();
                (first, last, labels)
            }
            TrendPeriod::Monthly { year } => {
                let first = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| ValidationError::InvalidDate(year.to_string()))?;
                let last = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| ValidationError::InvalidDate(year.to_string()))?;
                let labels = (1..=12).map(|m| format!("{}-{:02}", year, m)).collect();
                (first, last, labels)
            }
        };

        let records = self.ledger_repository.get_records_in_range(
            station_id,
            &from.format(DATE_FORMAT).to_string(),
            &to.format(DATE_FORMAT).to_string(),
        )?;

        let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
        for record in &records {
            let Some(product) = record.product_type.clone() else {
                continue;
            };
            let bucket = match period {
                TrendPeriod::Daily { .. } => record.record_date.clone(),
                TrendPeriod::Monthly { .. } => {
                    NaiveDate::parse_from_str(&record.record_date, DATE_FORMAT)
                        .map_err(|_| ValidationError::InvalidDate(record.record_date.clone()))?
                        .format(MONTH_FORMAT)
                        .to_string()
                }
            };
            *totals.entry((bucket, product)).or_insert(0.0) += record.sales_volume;
        }

        let mut points = Vec::with_capacity(buckets.len() * PRODUCT_TYPES.len());
        for bucket in &buckets {
            for product in PRODUCT_TYPES {
                let volume = totals
                    .get(&(bucket.clone(), product.to_string()))
                    .copied()
                    .unwrap_or(0.0);
                points.push(VolumeTrendPoint {
                    bucket: bucket.clone(),
                    product_type: product.to_string(),
                    volume,
                });
            }
        }
        Ok(points)
    }

    fn tank_levels(&self, station_id: &str) -> Result<Vec<TankLevel>> {
        let capacities = self.pump_service.get_tank_capacities(station_id)?;

        let mut levels = Vec::new();
        for product in PRODUCT_TYPES {
            let latest = self
                .ledger_repository
                .get_latest_record_for_product(station_id, product)?;
            let capacity = capacities
                .iter()
                .find(|c| c.product_type == product)
                .map(|c| c.capacity)
                .unwrap_or(DEFAULT_TANK_CAPACITY);

            let current_stock = latest.as_ref().map(|r| r.closing_stock).unwrap_or(0.0);
            let percent_full = if capacity > 0.0 {
                (current_stock / capacity * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            levels.push(TankLevel {
                product_type: product.to_string(),
                current_stock,
                capacity,
                percent_full,
                last_updated: latest.map(|r| r.record_date),
            });
        }
        Ok(levels)
    }
}
