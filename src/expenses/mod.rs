pub mod expenses_model;
pub mod expenses_repository;
pub mod expenses_service;
pub mod expenses_traits;

pub use expenses_model::{Expense, FuelCollectionDetails, NewExpense, FUEL_COLLECTION_CATEGORY};
pub use expenses_repository::ExpenseRepository;
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
