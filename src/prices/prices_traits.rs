use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::prices::prices_model::{NewProductPrice, ProductPrice};

/// Trait for product price repository operations
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    fn get_price_as_of(&self, product_type: &str, as_of: &str) -> Result<Option<ProductPrice>>;
    fn get_latest_prices(&self) -> Result<Vec<ProductPrice>>;
    fn get_price_history(&self, product_type: &str) -> Result<Vec<ProductPrice>>;
    async fn insert_price(&self, new_price: NewProductPrice) -> Result<ProductPrice>;
}

/// Trait for product price service operations
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Price per litre in force for the product on the given date, if any
    /// price has ever been set on or before it.
    fn latest_price(&self, product_type: &str, as_of: NaiveDate) -> Result<Option<f64>>;

    /// The current price of every product, one entry per product type.
    fn latest_prices(&self) -> Result<Vec<ProductPrice>>;

    fn price_history(&self, product_type: &str) -> Result<Vec<ProductPrice>>;

    /// Appends a new price entry. Past entries are never rewritten, so
    /// historical totals stay reproducible.
    async fn set_price(&self, new_price: NewProductPrice) -> Result<ProductPrice>;
}
