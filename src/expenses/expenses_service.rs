use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::constants::DATE_FORMAT;
use crate::errors::{Result, ValidationError};
use crate::expenses::expenses_model::{
    Expense, FuelCollectionDetails, NewExpense, FUEL_COLLECTION_CATEGORY,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::ledger::monetary_total;

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>) -> Self {
        ExpenseService { repository }
    }

    fn validate(new_expense: &NewExpense) -> Result<()> {
        if new_expense.amount <= 0.0 {
            return Err(ValidationError::InvalidInput(
                "Expense amount must be positive".to_string(),
            )
            .into());
        }
        if new_expense.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        NaiveDate::parse_from_str(&new_expense.expense_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(new_expense.expense_date.clone()))?;
        Ok(())
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn expenses_for_date(&self, station_id: &str, date: &str) -> Result<Vec<Expense>> {
        self.repository.get_expenses_for_date(station_id, date)
    }

    fn total_for_date(&self, station_id: &str, date: &str) -> Result<f64> {
        self.repository.total_for_date(station_id, date)
    }

    async fn add_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        Self::validate(&new_expense)?;
        self.repository.insert_expense(new_expense).await
    }

    async fn add_fuel_collection(
        &self,
        station_id: &str,
        expense_date: &str,
        details: FuelCollectionDetails,
    ) -> Result<Expense> {
        if details.litres <= 0.0 || details.price_per_litre <= 0.0 {
            return Err(ValidationError::InvalidInput(
                "Fuel collection litres and price must be positive".to_string(),
            )
            .into());
        }

        let amount = monetary_total(details.litres, details.price_per_litre);
        let new_expense = NewExpense {
            id: None,
            station_id: station_id.to_string(),
            expense_date: expense_date.to_string(),
            category: Some(FUEL_COLLECTION_CATEGORY.to_string()),
            description: serde_json::to_string(&details)?,
            amount,
            created_at: None,
        };
        Self::validate(&new_expense)?;

        let saved = self.repository.insert_expense(new_expense).await?;
        info!(
            "Recorded fuel collection of {:.1}L {} for station {}",
            details.litres, details.product_type, station_id
        );
        Ok(saved)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        self.repository.delete_expense(expense_id).await
    }
}
