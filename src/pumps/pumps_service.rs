use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::errors::Result;
use crate::pumps::pumps_model::{NewPump, NewTankCapacity, Pump, TankCapacity};
use crate::pumps::pumps_traits::{PumpRepositoryTrait, PumpServiceTrait};

/// Static directory of pumps, tanks and their capacities
pub struct PumpService {
    repository: Arc<dyn PumpRepositoryTrait>,
}

impl PumpService {
    pub fn new(repository: Arc<dyn PumpRepositoryTrait>) -> Self {
        PumpService { repository }
    }
}

#[async_trait]
impl PumpServiceTrait for PumpService {
    fn get_pump(&self, pump_id: &str) -> Result<Pump> {
        self.repository.get_pump(pump_id)
    }

    fn get_pumps_for_station(&self, station_id: &str) -> Result<Vec<Pump>> {
        self.repository.get_pumps_for_station(station_id)
    }

    fn get_pumps_for_tank(&self, tank_id: &str) -> Result<Vec<Pump>> {
        self.repository.get_pumps_for_tank(tank_id)
    }

    async fn create_pump(&self, new_pump: NewPump) -> Result<Pump> {
        self.repository.create_pump(new_pump).await
    }

    async fn set_tank_capacity(&self, tank_id: &str, capacity: f64) -> Result<usize> {
        let updated = self.repository.set_tank_capacity(tank_id, capacity).await?;
        info!(
            "Updated capacity of tank {} to {:.0}L across {} pumps",
            tank_id, capacity, updated
        );
        Ok(updated)
    }

    fn get_tank_capacities(&self, station_code: &str) -> Result<Vec<TankCapacity>> {
        self.repository.get_tank_capacities(station_code)
    }

    async fn upsert_tank_capacity(&self, capacity: NewTankCapacity) -> Result<TankCapacity> {
        self.repository.upsert_tank_capacity(capacity).await
    }
}
