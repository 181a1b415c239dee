use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, NewExpense};
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::schema::expenses;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_expenses_for_date(&self, station_id: &str, date: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::station_id.eq(station_id))
            .filter(expenses::expense_date.eq(date))
            .order(expenses::created_at.asc())
            .load::<Expense>(&mut conn)?)
    }

    fn get_expenses_in_range(
        &self,
        station_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::station_id.eq(station_id))
            .filter(expenses::expense_date.ge(start_date))
            .filter(expenses::expense_date.le(end_date))
            .order(expenses::expense_date.asc())
            .load::<Expense>(&mut conn)?)
    }

    fn total_for_date(&self, station_id: &str, date: &str) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = expenses::table
            .filter(expenses::station_id.eq(station_id))
            .filter(expenses::expense_date.eq(date))
            .select(sum(expenses::amount))
            .first(&mut conn)?;
        Ok(total.unwrap_or(0.0))
    }

    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let new_expense = NewExpense {
                    id: Some(new_expense.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
                    created_at: Some(Utc::now().to_rfc3339()),
                    ..new_expense
                };

                Ok(diesel::insert_into(expenses::table)
                    .values(&new_expense)
                    .get_result::<Expense>(conn)?)
            })
            .await
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(expenses::table.find(expense_id)).execute(conn)?)
            })
            .await
    }
}
