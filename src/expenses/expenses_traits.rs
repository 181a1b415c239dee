use async_trait::async_trait;

use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, FuelCollectionDetails, NewExpense};

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_expenses_for_date(&self, station_id: &str, date: &str) -> Result<Vec<Expense>>;
    fn get_expenses_in_range(
        &self,
        station_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Expense>>;
    fn total_for_date(&self, station_id: &str, date: &str) -> Result<f64>;
    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn expenses_for_date(&self, station_id: &str, date: &str) -> Result<Vec<Expense>>;

    /// Sum of expense amounts recorded against the station on the date.
    fn total_for_date(&self, station_id: &str, date: &str) -> Result<f64>;

    async fn add_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    /// Records a fuel delivery paid on collection. The amount is derived
    /// from litres and price, and the structured details travel in the
    /// description as JSON.
    async fn add_fuel_collection(
        &self,
        station_id: &str,
        expense_date: &str,
        details: FuelCollectionDetails,
    ) -> Result<Expense>;

    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;
}
