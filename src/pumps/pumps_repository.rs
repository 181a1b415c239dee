use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::pumps::pumps_model::{NewPump, NewTankCapacity, Pump, TankCapacity};
use crate::pumps::pumps_traits::PumpRepositoryTrait;
use crate::schema::{pumps, tank_capacities};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct PumpRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PumpRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PumpRepository { pool, writer }
    }
}

#[async_trait]
impl PumpRepositoryTrait for PumpRepository {
    fn get_pump(&self, pump_id: &str) -> Result<Pump> {
        let mut conn = get_connection(&self.pool)?;
        Ok(pumps::table.find(pump_id).first::<Pump>(&mut conn)?)
    }

    fn get_pumps_for_station(&self, station_id: &str) -> Result<Vec<Pump>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(pumps::table
            .filter(pumps::station_id.eq(station_id))
            .order(pumps::pump_number.asc())
            .load::<Pump>(&mut conn)?)
    }

    fn get_pumps_for_tank(&self, tank_id: &str) -> Result<Vec<Pump>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(pumps::table
            .filter(pumps::tank_id.eq(tank_id))
            .order(pumps::pump_number.asc())
            .load::<Pump>(&mut conn)?)
    }

    async fn create_pump(&self, new_pump: NewPump) -> Result<Pump> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Pump> {
                let new_pump = NewPump {
                    id: Some(new_pump.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
                    created_at: Some(Utc::now().to_rfc3339()),
                    ..new_pump
                };

                diesel::insert_into(pumps::table)
                    .values(&new_pump)
                    .execute(conn)?;

                Ok(pumps::table
                    .find(new_pump.id.as_deref().unwrap_or_default())
                    .first::<Pump>(conn)?)
            })
            .await
    }

    async fn set_tank_capacity(&self, tank_id: &str, capacity: f64) -> Result<usize> {
        let tank_id_owned = tank_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::update(pumps::table.filter(pumps::tank_id.eq(tank_id_owned)))
                        .set(pumps::capacity.eq(capacity))
                        .execute(conn)?,
                )
            })
            .await
    }

    fn get_tank_capacities(&self, station_code: &str) -> Result<Vec<TankCapacity>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(tank_capacities::table
            .filter(tank_capacities::station_code.eq(station_code))
            .load::<TankCapacity>(&mut conn)?)
    }

    async fn upsert_tank_capacity(&self, capacity: NewTankCapacity) -> Result<TankCapacity> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TankCapacity> {
                let now = Utc::now().to_rfc3339();

                let existing: Option<TankCapacity> = tank_capacities::table
                    .filter(tank_capacities::station_code.eq(&capacity.station_code))
                    .filter(tank_capacities::product_type.eq(&capacity.product_type))
                    .first::<TankCapacity>(conn)
                    .optional()?;

                if let Some(existing_row) = existing {
                    diesel::update(tank_capacities::table.find(&existing_row.id))
                        .set((
                            tank_capacities::capacity.eq(capacity.capacity),
                            tank_capacities::updated_at.eq(&now),
                        ))
                        .execute(conn)?;

                    Ok(tank_capacities::table
                        .find(&existing_row.id)
                        .first::<TankCapacity>(conn)?)
                } else {
                    let new_row = NewTankCapacity {
                        id: Some(Uuid::new_v4().to_string()),
                        created_at: Some(now.clone()),
                        updated_at: Some(now),
                        ..capacity
                    };

                    diesel::insert_into(tank_capacities::table)
                        .values(&new_row)
                        .execute(conn)?;

                    Ok(tank_capacities::table
                        .find(new_row.id.as_deref().unwrap_or_default())
                        .first::<TankCapacity>(conn)?)
                }
            })
            .await
    }
}
