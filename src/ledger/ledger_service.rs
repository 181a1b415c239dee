use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use dashmap::DashMap;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::constants::{DATE_FORMAT, MONTH_FORMAT};
use crate::errors::{Result, ValidationError};
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_model::{
    monetary_total, DayStock, FuelRecord, FuelRecordWithPump, InputMode, MeterReadingInput,
    NewFuelRecord, NewMonthlyStock, Propagation, PropagationUpdate, ReconciliationOutcome,
    RestockOutcome, TankGroup,
};
use crate::ledger::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::prices::PriceServiceTrait;
use crate::pumps::PumpServiceTrait;

/// In-memory tank-level stock view, updated optimistically by restocks
/// and rolled back if the store rejects the write.
#[derive(Debug, Clone, Default)]
struct TankStockSnapshot {
    opening_stock: f64,
    sales_volume: f64,
    closing_stock: f64,
}

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    pump_service: Arc<dyn PumpServiceTrait>,
    price_service: Arc<dyn PriceServiceTrait>,
    tank_cache: DashMap<String, TankStockSnapshot>,
}

fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn prev_day(date: NaiveDate) -> Result<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| ValidationError::InvalidDate(format!("No day before {}", date)).into())
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| ValidationError::InvalidDate(format!("No day after {}", date)).into())
}

fn cache_key(station: &str, tank_id: &str, date: &str) -> String {
    format!("{}:{}:{}", station, tank_id, date)
}

fn carry_forward(record: &FuelRecord) -> DayStock {
    DayStock {
        opening_stock: record.closing_stock,
        sales_volume: 0.0,
        closing_stock: record.closing_stock,
        opening_meter: record.meter_closing(),
        closing_meter: record.meter_closing(),
    }
}

impl LedgerService {
    pub fn new(
        repository: Arc<dyn LedgerRepositoryTrait>,
        pump_service: Arc<dyn PumpServiceTrait>,
        price_service: Arc<dyn PriceServiceTrait>,
    ) -> Self {
        LedgerService {
            repository,
            pump_service,
            price_service,
            tank_cache: DashMap::new(),
        }
    }

    /// Applies a new opening stock to one pump for the given date: the
    /// same-day row when one exists, otherwise the most recent prior row's
    /// closing stock. Returns false when the pump has no history to anchor on.
    async fn apply_opening_stock(
        &self,
        station: &str,
        pump_id: &str,
        date: &str,
        new_opening: f64,
    ) -> Result<bool> {
        if let Some(record) = self.repository.get_record(station, pump_id, date)? {
            let closing = (new_opening - record.sales_volume).max(0.0);
            self.repository
                .update_stock(&record.id, new_opening, closing)
                .await?;
            return Ok(true);
        }

        // No same-day row: rewrite the most recent prior row's closing stock
        // so the rollover chain picks the new level up, without fabricating
        // a meter record for a day that has no reading yet.
        if let Some(last) = self
            .repository
            .get_most_recent_before(station, pump_id, date)?
        {
            self.repository
                .update_closing_stock(&last.id, new_opening)
                .await?;
            return Ok(true);
        }

        Ok(false)
    }

    fn rollback_tank_cache(&self, key: &str, snapshot: &Option<TankStockSnapshot>) {
        match snapshot {
            Some(previous) => {
                self.tank_cache.insert(key.to_string(), previous.clone());
            }
            None => {
                self.tank_cache.remove(key);
            }
        }
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn record_meter_reading(&self, input: MeterReadingInput) -> Result<FuelRecord> {
        if input.meter_closing < input.meter_opening {
            return Err(LedgerError::InvalidReading.into());
        }

        let sales_volume = (input.meter_closing - input.meter_opening).max(0.0);
        let pump = self.pump_service.get_pump(&input.pump_id)?;
        let price = self
            .price_service
            .latest_price(&pump.product_type, input.date)?
            .unwrap_or(0.0);
        let total_sales = monetary_total(sales_volume, price);

        let date_str = fmt_date(input.date);
        let today = self
            .repository
            .get_record(&input.station_code, &input.pump_id, &date_str)?;

        // Opening stock is pinned once established for the date; manual edits
        // never re-derive it from the previous day.
        let opening_stock = match &today {
            Some(record) => record.opening_stock,
            None => {
                let yesterday = fmt_date(prev_day(input.date)?);
                self.repository
                    .get_record(&input.station_code, &input.pump_id, &yesterday)?
                    .map(|r| r.closing_stock)
                    .unwrap_or(0.0)
            }
        };
        let closing_stock = (opening_stock - sales_volume).max(0.0);

        debug!(
            "Meter reading pump {} on {}: volume {:.2}L, opening stock {:.2}L, closing stock {:.2}L",
            input.pump_id, date_str, sales_volume, opening_stock, closing_stock
        );

        let record = NewFuelRecord {
            id: None,
            station_code: input.station_code.clone(),
            pump_id: input.pump_id.clone(),
            product_type: Some(pump.product_type.clone()),
            record_date: date_str,
            meter_opening: Some(input.meter_opening),
            meter_closing: Some(input.meter_closing),
            sales_volume,
            price_per_litre: Some(price),
            total_sales: Some(total_sales),
            opening_stock,
            closing_stock,
            input_mode: InputMode::Manual.as_str().to_string(),
            created_at: None,
        };

        let tomorrow_str = fmt_date(next_day(input.date)?);
        let propagation = match self.repository.get_record(
            &input.station_code,
            &input.pump_id,
            &tomorrow_str,
        )? {
            Some(tomorrow) => {
                // Re-anchor tomorrow and recompute its derived fields so an
                // already-entered reading is not left against a stale opening.
                let (next_sales, next_total) =
                    if tomorrow.input_mode() == InputMode::Manual && tomorrow.sales_volume > 0.0 {
                        let volume = (tomorrow.meter_closing() - input.meter_closing).max(0.0);
                        (
                            volume,
                            Some(monetary_total(volume, tomorrow.price_per_litre())),
                        )
                    } else {
                        (0.0, tomorrow.total_sales)
                    };

                Propagation::Update(PropagationUpdate {
                    id: tomorrow.id.clone(),
                    opening_stock: closing_stock,
                    meter_opening: input.meter_closing,
                    sales_volume: next_sales,
                    total_sales: next_total,
                    closing_stock: (closing_stock - next_sales).max(0.0),
                })
            }
            None => Propagation::Create(NewFuelRecord {
                id: None,
                station_code: input.station_code.clone(),
                pump_id: input.pump_id.clone(),
                product_type: Some(pump.product_type.clone()),
                record_date: tomorrow_str,
                meter_opening: Some(input.meter_closing),
                meter_closing: Some(0.0),
                sales_volume: 0.0,
                price_per_litre: Some(0.0),
                total_sales: Some(0.0),
                opening_stock: closing_stock,
                closing_stock,
                input_mode: InputMode::Auto.as_str().to_string(),
                created_at: None,
            }),
        };

        self.repository.commit_reading(record, propagation).await
    }

    async fn restock(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<RestockOutcome> {
        if !(amount > 0.0) {
            return Err(LedgerError::InvalidRestockAmount.into());
        }

        let pumps = self.pump_service.get_pumps_for_tank(tank_id)?;
        if pumps.is_empty() {
            return Err(LedgerError::NotFound(format!("No pumps attached to tank {}", tank_id)).into());
        }

        let date_str = fmt_date(date);
        let current = self.resolve_day_stock(station, &pumps[0].id, date)?;
        let new_opening = current.opening_stock + amount;

        // Optimistic update of the tank view; reverted if the store fails.
        let key = cache_key(station, tank_id, &date_str);
        let snapshot = self.tank_cache.get(&key).map(|entry| entry.value().clone());
        self.tank_cache.insert(
            key.clone(),
            TankStockSnapshot {
                opening_stock: new_opening,
                sales_volume: current.sales_volume,
                closing_stock: (new_opening - current.sales_volume).max(0.0),
            },
        );

        let mut updated_pumps = Vec::new();
        let mut skipped_pumps = Vec::new();
        for pump in &pumps {
            match self
                .apply_opening_stock(station, &pump.id, &date_str, new_opening)
                .await
            {
                Ok(true) => updated_pumps.push(pump.id.clone()),
                Ok(false) => {
                    warn!(
                        "Restock of tank {} skipped pump {}: no record to anchor on",
                        tank_id, pump.id
                    );
                    skipped_pumps.push(pump.id.clone());
                }
                Err(e) => {
                    self.rollback_tank_cache(&key, &snapshot);
                    return Err(e);
                }
            }
        }

        if updated_pumps.is_empty() {
            self.rollback_tank_cache(&key, &snapshot);
            return Err(LedgerError::NoHistoryToRestock(tank_id.to_string()).into());
        }

        info!(
            "Restocked tank {} with {:.2}L on {} ({} pumps updated, {} skipped)",
            tank_id,
            amount,
            date_str,
            updated_pumps.len(),
            skipped_pumps.len()
        );

        Ok(RestockOutcome {
            tank_id: tank_id.to_string(),
            amount,
            new_opening_stock: new_opening,
            updated_pumps,
            skipped_pumps,
        })
    }

    fn resolve_day_stock(&self, station: &str, pump_id: &str, date: NaiveDate) -> Result<DayStock> {
        let date_str = fmt_date(date);

        // Today's own record wins.
        if let Some(record) = self.repository.get_record(station, pump_id, &date_str)? {
            return Ok(DayStock {
                opening_stock: record.opening_stock,
                sales_volume: record.sales_volume,
                closing_stock: record.closing_stock,
                opening_meter: record.meter_opening(),
                closing_meter: record.meter_closing(),
            });
        }

        // Otherwise carry yesterday's close forward.
        let yesterday = fmt_date(prev_day(date)?);
        if let Some(record) = self.repository.get_record(station, pump_id, &yesterday)? {
            return Ok(carry_forward(&record));
        }

        // Any gap: most recent record strictly before the date.
        if let Some(record) = self
            .repository
            .get_most_recent_before(station, pump_id, &date_str)?
        {
            return Ok(carry_forward(&record));
        }

        Ok(DayStock::default())
    }

    fn reconciliation_excess(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        real_stock: f64,
    ) -> Result<f64> {
        let pumps = self.pump_service.get_pumps_for_tank(tank_id)?;
        if pumps.is_empty() {
            return Err(LedgerError::NotFound(format!("No pumps attached to tank {}", tank_id)).into());
        }
        let current = self.resolve_day_stock(station, &pumps[0].id, date)?;
        Ok(real_stock - current.opening_stock)
    }

    async fn reconcile_month_open(
        &self,
        station: &str,
        tank_id: &str,
        date: NaiveDate,
        real_stock: f64,
    ) -> Result<ReconciliationOutcome> {
        if date.day() != 1 {
            return Err(LedgerError::NotMonthStart(date).into());
        }

        let pumps = self.pump_service.get_pumps_for_tank(tank_id)?;
        if pumps.is_empty() {
            return Err(LedgerError::NotFound(format!("No pumps attached to tank {}", tank_id)).into());
        }

        let date_str = fmt_date(date);
        let current = self.resolve_day_stock(station, &pumps[0].id, date)?;
        let excess = real_stock - current.opening_stock;

        let mut updated_pumps = Vec::new();
        let mut skipped_pumps = Vec::new();
        for pump in &pumps {
            if self
                .apply_opening_stock(station, &pump.id, &date_str, real_stock)
                .await?
            {
                updated_pumps.push(pump.id.clone());
            } else {
                warn!(
                    "Reconciliation of tank {} skipped pump {}: no record to anchor on",
                    tank_id, pump.id
                );
                skipped_pumps.push(pump.id.clone());
            }
        }

        if updated_pumps.is_empty() {
            return Err(LedgerError::NoHistoryToReconcile(tank_id.to_string()).into());
        }

        self.repository
            .upsert_monthly_stock(NewMonthlyStock {
                id: None,
                station_id: station.to_string(),
                product_type: pumps[0].product_type.clone(),
                month_year: date.format(MONTH_FORMAT).to_string(),
                opening_stock: current.opening_stock,
                actual_closing_stock: Some(real_stock),
                excess: Some(excess),
                created_at: None,
            })
            .await?;

        self.tank_cache.insert(
            cache_key(station, tank_id, &date_str),
            TankStockSnapshot {
                opening_stock: real_stock,
                sales_volume: current.sales_volume,
                closing_stock: (real_stock - current.sales_volume).max(0.0),
            },
        );

        info!(
            "Reconciled tank {} on {}: recorded {:.2}L, measured {:.2}L, excess {:+.2}L",
            tank_id, date_str, current.opening_stock, real_stock, excess
        );

        Ok(ReconciliationOutcome {
            tank_id: tank_id.to_string(),
            date,
            real_stock,
            excess,
            updated_pumps,
            skipped_pumps,
        })
    }

    async fn seed_day(&self, station: &str, date: NaiveDate) -> Result<usize> {
        let pumps = self.pump_service.get_pumps_for_station(station)?;
        let date_str = fmt_date(date);

        let mut created = 0;
        for pump in pumps {
            if self
                .repository
                .get_record(station, &pump.id, &date_str)?
                .is_some()
            {
                continue;
            }

            let opening_stock = self
                .repository
                .get_most_recent_before(station, &pump.id, &date_str)?
                .map(|r| r.closing_stock)
                .unwrap_or(0.0);

            self.repository
                .upsert_record(NewFuelRecord {
                    id: None,
                    station_code: station.to_string(),
                    pump_id: pump.id.clone(),
                    product_type: Some(pump.product_type.clone()),
                    record_date: date_str.clone(),
                    meter_opening: Some(0.0),
                    meter_closing: Some(0.0),
                    sales_volume: 0.0,
                    price_per_litre: Some(0.0),
                    total_sales: Some(0.0),
                    opening_stock,
                    closing_stock: opening_stock,
                    input_mode: InputMode::Auto.as_str().to_string(),
                    created_at: None,
                })
                .await?;
            created += 1;
        }

        if created > 0 {
            info!("Seeded {} placeholder records for {} on {}", created, station, date_str);
        }
        Ok(created)
    }

    fn records_for_date(&self, station: &str, date: NaiveDate) -> Result<Vec<FuelRecordWithPump>> {
        let records = self
            .repository
            .get_records_for_date(station, &fmt_date(date))?;
        let pumps = self.pump_service.get_pumps_for_station(station)?;

        let mut rows: Vec<FuelRecordWithPump> = records
            .into_iter()
            .map(|record| {
                let pump_number = pumps
                    .iter()
                    .find(|p| p.id == record.pump_id)
                    .map(|p| p.pump_number)
                    .unwrap_or(0);
                FuelRecordWithPump {
                    record,
                    pump_number,
                }
            })
            .collect();
        rows.sort_by_key(|row| row.pump_number);
        Ok(rows)
    }

    async fn delete_record(&self, id: &str) -> Result<usize> {
        let deleted = self.repository.delete_record(id).await?;
        // No cascade: neighboring days are left as-is and the next edit
        // re-anchors through the fallback resolution.
        info!("Deleted fuel record {} ({} rows)", id, deleted);
        Ok(deleted)
    }

    fn tank_groups(&self, station: &str, date: NaiveDate) -> Result<Vec<TankGroup>> {
        let pumps = self.pump_service.get_pumps_for_station(station)?;
        let date_str = fmt_date(date);

        let mut by_tank: BTreeMap<String, Vec<_>> = BTreeMap::new();
        for pump in pumps {
            by_tank.entry(pump.tank_id.clone()).or_default().push(pump);
        }

        let mut groups = Vec::with_capacity(by_tank.len());
        for (tank_id, tank_pumps) in by_tank {
            let stock = self.resolve_day_stock(station, &tank_pumps[0].id, date)?;

            // Stock level is shared across the tank; sales are the tank total.
            let mut sales_volume = 0.0;
            for pump in &tank_pumps {
                if let Some(record) = self.repository.get_record(station, &pump.id, &date_str)? {
                    sales_volume += record.sales_volume;
                }
            }
            let closing_stock = (stock.opening_stock - sales_volume).max(0.0);

            self.tank_cache.insert(
                cache_key(station, &tank_id, &date_str),
                TankStockSnapshot {
                    opening_stock: stock.opening_stock,
                    sales_volume,
                    closing_stock,
                },
            );

            groups.push(TankGroup {
                tank_id,
                product_type: tank_pumps[0].product_type.clone(),
                max_capacity: tank_pumps[0].capacity,
                pumps: tank_pumps,
                opening_stock: stock.opening_stock,
                closing_stock,
                sales_volume,
            });
        }

        Ok(groups)
    }
}
