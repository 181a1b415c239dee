use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::prices::prices_model::{NewProductPrice, ProductPrice};
use crate::prices::prices_traits::PriceRepositoryTrait;
use crate::schema::product_prices;

pub struct PriceRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PriceRepository { pool, writer }
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    fn get_price_as_of(&self, product_type: &str, as_of: &str) -> Result<Option<ProductPrice>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(product_prices::table
            .filter(product_prices::product_type.eq(product_type))
            .filter(product_prices::effective_date.le(as_of))
            .order(product_prices::effective_date.desc())
            .first::<ProductPrice>(&mut conn)
            .optional()?)
    }

    fn get_latest_prices(&self) -> Result<Vec<ProductPrice>> {
        let mut conn = get_connection(&self.pool)?;
        let all = product_prices::table
            .order((
                product_prices::product_type.asc(),
                product_prices::effective_date.desc(),
            ))
            .load::<ProductPrice>(&mut conn)?;

        // Keep the first row per product; rows arrive newest first within
        // each product group.
        let mut latest: Vec<ProductPrice> = Vec::new();
        for price in all {
            if latest.last().map(|p: &ProductPrice| p.product_type.as_str())
                != Some(price.product_type.as_str())
            {
                latest.push(price);
            }
        }
        Ok(latest)
    }

    fn get_price_history(&self, product_type: &str) -> Result<Vec<ProductPrice>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(product_prices::table
            .filter(product_prices::product_type.eq(product_type))
            .order(product_prices::effective_date.desc())
            .load::<ProductPrice>(&mut conn)?)
    }

    async fn insert_price(&self, new_price: NewProductPrice) -> Result<ProductPrice> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ProductPrice> {
                let new_price = NewProductPrice {
                    id: Some(new_price.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
                    created_at: Some(Utc::now().to_rfc3339()),
                    ..new_price
                };

                Ok(diesel::insert_into(product_prices::table)
                    .values(&new_price)
                    .get_result::<ProductPrice>(conn)?)
            })
            .await
    }
}
