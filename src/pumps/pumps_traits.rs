use crate::errors::Result;
use crate::pumps::pumps_model::{NewPump, NewTankCapacity, Pump, TankCapacity};
use async_trait::async_trait;

/// Trait for pump/tank directory repository operations
#[async_trait]
pub trait PumpRepositoryTrait: Send + Sync {
    fn get_pump(&self, pump_id: &str) -> Result<Pump>;
    fn get_pumps_for_station(&self, station_id: &str) -> Result<Vec<Pump>>;
    fn get_pumps_for_tank(&self, tank_id: &str) -> Result<Vec<Pump>>;
    async fn create_pump(&self, new_pump: NewPump) -> Result<Pump>;
    async fn set_tank_capacity(&self, tank_id: &str, capacity: f64) -> Result<usize>;

    fn get_tank_capacities(&self, station_code: &str) -> Result<Vec<TankCapacity>>;
    async fn upsert_tank_capacity(&self, capacity: NewTankCapacity) -> Result<TankCapacity>;
}

/// Trait for pump/tank directory operations
#[async_trait]
pub trait PumpServiceTrait: Send + Sync {
    fn get_pump(&self, pump_id: &str) -> Result<Pump>;
    fn get_pumps_for_station(&self, station_id: &str) -> Result<Vec<Pump>>;
    fn get_pumps_for_tank(&self, tank_id: &str) -> Result<Vec<Pump>>;
    async fn create_pump(&self, new_pump: NewPump) -> Result<Pump>;
    async fn set_tank_capacity(&self, tank_id: &str, capacity: f64) -> Result<usize>;

    fn get_tank_capacities(&self, station_code: &str) -> Result<Vec<TankCapacity>>;
    async fn upsert_tank_capacity(&self, capacity: NewTankCapacity) -> Result<TankCapacity>;
}
