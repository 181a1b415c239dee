pub mod ledger_errors;
pub mod ledger_model;
pub mod ledger_repository;
pub mod ledger_service;
pub mod ledger_traits;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_errors::LedgerError;
pub use ledger_model::{
    monetary_total, DayStock, FuelRecord, FuelRecordWithPump, InputMode, MeterReadingInput,
    MonthlyStock, NewFuelRecord, NewMonthlyStock, Propagation, PropagationUpdate,
    ReconciliationOutcome, RestockOutcome, TankGroup,
};
pub use ledger_repository::LedgerRepository;
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
