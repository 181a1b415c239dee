use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::ledger::ledger_model::{
    FuelRecord, MonthlyStock, NewFuelRecord, NewMonthlyStock, Propagation,
};
use crate::ledger::ledger_traits::LedgerRepositoryTrait;
use crate::schema::{fuel_records, monthly_stock};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct LedgerRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        LedgerRepository { pool, writer }
    }
}

/// Upsert keyed on the (station, pump, date) natural key.
fn upsert_fuel_record(conn: &mut SqliteConnection, record: NewFuelRecord) -> Result<FuelRecord> {
    let existing: Option<FuelRecord> = fuel_records::table
        .filter(fuel_records::station_code.eq(&record.station_code))
        .filter(fuel_records::pump_id.eq(&record.pump_id))
        .filter(fuel_records::record_date.eq(&record.record_date))
        .first::<FuelRecord>(conn)
        .optional()?;

    if let Some(existing_record) = existing {
        diesel::update(fuel_records::table.find(&existing_record.id))
            .set((
                fuel_records::product_type.eq(&record.product_type),
                fuel_records::meter_opening.eq(record.meter_opening),
                fuel_records::meter_closing.eq(record.meter_closing),
                fuel_records::sales_volume.eq(record.sales_volume),
                fuel_records::price_per_litre.eq(record.price_per_litre),
                fuel_records::total_sales.eq(record.total_sales),
                fuel_records::opening_stock.eq(record.opening_stock),
                fuel_records::closing_stock.eq(record.closing_stock),
                fuel_records::input_mode.eq(&record.input_mode),
            ))
            .execute(conn)?;

        Ok(fuel_records::table
            .find(&existing_record.id)
            .first::<FuelRecord>(conn)?)
    } else {
        let new_record = NewFuelRecord {
            id: Some(Uuid::new_v4().to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
            ..record
        };

        diesel::insert_into(fuel_records::table)
            .values(&new_record)
            .execute(conn)?;

        Ok(fuel_records::table
            .find(new_record.id.as_deref().unwrap_or_default())
            .first::<FuelRecord>(conn)?)
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    fn get_record(&self, station: &str, pump_id: &str, date: &str) -> Result<Option<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let result = fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::pump_id.eq(pump_id))
            .filter(fuel_records::record_date.eq(date))
            .first::<FuelRecord>(&mut conn)
            .optional()?;
        Ok(result)
    }

    fn get_records_for_date(&self, station: &str, date: &str) -> Result<Vec<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::record_date.eq(date))
            .load::<FuelRecord>(&mut conn)?)
    }

    fn get_records_in_range(&self, station: &str, from: &str, to: &str) -> Result<Vec<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::record_date.ge(from))
            .filter(fuel_records::record_date.le(to))
            .order(fuel_records::record_date.asc())
            .load::<FuelRecord>(&mut conn)?)
    }

    fn get_pump_records_in_range(
        &self,
        station: &str,
        pump_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::pump_id.eq(pump_id))
            .filter(fuel_records::record_date.ge(from))
            .filter(fuel_records::record_date.le(to))
            .order(fuel_records::record_date.asc())
            .load::<FuelRecord>(&mut conn)?)
    }

    fn get_most_recent_before(
        &self,
        station: &str,
        pump_id: &str,
        date: &str,
    ) -> Result<Option<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let result = fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::pump_id.eq(pump_id))
            .filter(fuel_records::record_date.lt(date))
            .order(fuel_records::record_date.desc())
            .first::<FuelRecord>(&mut conn)
            .optional()?;
        Ok(result)
    }

    fn get_record_dates(&self, station: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .select(fuel_records::record_date)
            .distinct()
            .order(fuel_records::record_date.desc())
            .load::<String>(&mut conn)?)
    }

    fn get_latest_record_for_product(
        &self,
        station: &str,
        product_type: &str,
    ) -> Result<Option<FuelRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let result = fuel_records::table
            .filter(fuel_records::station_code.eq(station))
            .filter(fuel_records::product_type.eq(product_type))
            .order(fuel_records::record_date.desc())
            .first::<FuelRecord>(&mut conn)
            .optional()?;
        Ok(result)
    }

    async fn upsert_record(&self, record: NewFuelRecord) -> Result<FuelRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| upsert_fuel_record(conn, record))
            .await
    }

    async fn commit_reading(
        &self,
        today: NewFuelRecord,
        propagation: Propagation,
    ) -> Result<FuelRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FuelRecord> {
                let saved = upsert_fuel_record(conn, today)?;

                match propagation {
                    Propagation::Update(update) => {
                        diesel::update(fuel_records::table.find(&update.id))
                            .set((
                                fuel_records::opening_stock.eq(update.opening_stock),
                                fuel_records::meter_opening.eq(Some(update.meter_opening)),
                                fuel_records::sales_volume.eq(update.sales_volume),
                                fuel_records::total_sales.eq(update.total_sales),
                                fuel_records::closing_stock.eq(update.closing_stock),
                            ))
                            .execute(conn)?;
                    }
                    Propagation::Create(placeholder) => {
                        upsert_fuel_record(conn, placeholder)?;
                    }
                }

                Ok(saved)
            })
            .await
    }

    async fn update_stock(&self, id: &str, opening_stock: f64, closing_stock: f64) -> Result<()> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(fuel_records::table.find(id_owned))
                    .set((
                        fuel_records::opening_stock.eq(opening_stock),
                        fuel_records::closing_stock.eq(closing_stock),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn update_closing_stock(&self, id: &str, closing_stock: f64) -> Result<()> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(fuel_records::table.find(id_owned))
                    .set(fuel_records::closing_stock.eq(closing_stock))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn delete_record(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(fuel_records::table.find(id_owned)).execute(conn)?)
            })
            .await
    }

    async fn upsert_monthly_stock(&self, row: NewMonthlyStock) -> Result<MonthlyStock> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MonthlyStock> {
                let existing: Option<MonthlyStock> = monthly_stock::table
                    .filter(monthly_stock::station_id.eq(&row.station_id))
                    .filter(monthly_stock::product_type.eq(&row.product_type))
                    .filter(monthly_stock::month_year.eq(&row.month_year))
                    .first::<MonthlyStock>(conn)
                    .optional()?;

                if let Some(existing_row) = existing {
                    diesel::update(monthly_stock::table.find(&existing_row.id))
                        .set((
                            monthly_stock::opening_stock.eq(row.opening_stock),
                            monthly_stock::actual_closing_stock.eq(row.actual_closing_stock),
                            monthly_stock::excess.eq(row.excess),
                        ))
                        .execute(conn)?;

                    Ok(monthly_stock::table
                        .find(&existing_row.id)
                        .first::<MonthlyStock>(conn)?)
                } else {
                    let new_row = NewMonthlyStock {
                        id: Some(Uuid::new_v4().to_string()),
                        created_at: Some(Utc::now().to_rfc3339()),
                        ..row
                    };

                    diesel::insert_into(monthly_stock::table)
                        .values(&new_row)
                        .execute(conn)?;

                    Ok(monthly_stock::table
                        .find(new_row.id.as_deref().unwrap_or_default())
                        .first::<MonthlyStock>(conn)?)
                }
            })
            .await
    }
}
