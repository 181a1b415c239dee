use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::errors::{Result, ValidationError};
use crate::staff::staff_model::{NewStaff, Staff};
use crate::staff::staff_traits::{StaffRepositoryTrait, StaffServiceTrait};

pub struct StaffService {
    repository: Arc<dyn StaffRepositoryTrait>,
}

impl StaffService {
    pub fn new(repository: Arc<dyn StaffRepositoryTrait>) -> Self {
        StaffService { repository }
    }
}

#[async_trait]
impl StaffServiceTrait for StaffService {
    fn get_staff_member(&self, staff_id: &str) -> Result<Staff> {
        self.repository.get_staff_member(staff_id)
    }

    fn get_staff_for_station(&self, station_id: &str) -> Result<Vec<Staff>> {
        self.repository.get_staff_for_station(station_id)
    }

    async fn upsert_staff(&self, member: NewStaff) -> Result<Staff> {
        if member.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if member.position.trim().is_empty() {
            return Err(ValidationError::MissingField("position".to_string()).into());
        }
        if let Some(social) = member.social_media.as_deref() {
            serde_json::from_str::<serde_json::Value>(social)?;
        }

        let saved = self.repository.upsert_staff(member).await?;
        info!("Saved staff member {} ({})", saved.name, saved.position);
        Ok(saved)
    }

    async fn delete_staff(&self, staff_id: &str) -> Result<usize> {
        self.repository.delete_staff(staff_id).await
    }
}
