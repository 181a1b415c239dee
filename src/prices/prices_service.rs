use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::constants::DATE_FORMAT;
use crate::errors::{Result, ValidationError};
use crate::prices::prices_model::{NewProductPrice, ProductPrice};
use crate::prices::prices_traits::{PriceRepositoryTrait, PriceServiceTrait};

pub struct PriceService {
    repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceService {
    pub fn new(repository: Arc<dyn PriceRepositoryTrait>) -> Self {
        PriceService { repository }
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    fn latest_price(&self, product_type: &str, as_of: NaiveDate) -> Result<Option<f64>> {
        let as_of_str = as_of.format(DATE_FORMAT).to_string();
        Ok(self
            .repository
            .get_price_as_of(product_type, &as_of_str)?
            .map(|price| price.price_per_litre))
    }

    fn latest_prices(&self) -> Result<Vec<ProductPrice>> {
        self.repository.get_latest_prices()
    }

    fn price_history(&self, product_type: &str) -> Result<Vec<ProductPrice>> {
        self.repository.get_price_history(product_type)
    }

    async fn set_price(&self, new_price: NewProductPrice) -> Result<ProductPrice> {
        if new_price.price_per_litre <= 0.0 {
            return Err(ValidationError::InvalidInput(
                "Price per litre must be positive".to_string(),
            )
            .into());
        }
        NaiveDate::parse_from_str(&new_price.effective_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(new_price.effective_date.clone()))?;

        let saved = self.repository.insert_price(new_price).await?;
        info!(
            "Set {} price to {:.2}/L effective {}",
            saved.product_type, saved.price_per_litre, saved.effective_date
        );
        Ok(saved)
    }
}
