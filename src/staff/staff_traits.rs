use async_trait::async_trait;

use crate::errors::Result;
use crate::staff::staff_model::{NewStaff, Staff};

/// Trait for staff repository operations
#[async_trait]
pub trait StaffRepositoryTrait: Send + Sync {
    fn get_staff_member(&self, staff_id: &str) -> Result<Staff>;
    fn get_staff_for_station(&self, station_id: &str) -> Result<Vec<Staff>>;
    async fn upsert_staff(&self, member: NewStaff) -> Result<Staff>;
    async fn delete_staff(&self, staff_id: &str) -> Result<usize>;
}

/// Trait for staff service operations
#[async_trait]
pub trait StaffServiceTrait: Send + Sync {
    fn get_staff_member(&self, staff_id: &str) -> Result<Staff>;

    /// Staff of a station, most recently employed first.
    fn get_staff_for_station(&self, station_id: &str) -> Result<Vec<Staff>>;

    async fn upsert_staff(&self, member: NewStaff) -> Result<Staff>;
    async fn delete_staff(&self, staff_id: &str) -> Result<usize>;
}
