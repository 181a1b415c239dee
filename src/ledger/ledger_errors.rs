use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for stock-ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Closing meter reading cannot be less than opening reading")]
    InvalidReading,
    #[error("Restock amount must be greater than zero")]
    InvalidRestockAmount,
    #[error("No previous record found to anchor a restock for tank {0}")]
    NoHistoryToRestock(String),
    #[error("No previous record found to anchor a reconciliation for tank {0}")]
    NoHistoryToReconcile(String),
    #[error("Stock reconciliation is only accepted on the first day of a month, got {0}")]
    NotMonthStart(chrono::NaiveDate),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for LedgerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => LedgerError::NotFound("Record not found".to_string()),
            _ => LedgerError::InvalidData(err.to_string()),
        }
    }
}

impl From<LedgerError> for String {
    fn from(error: LedgerError) -> Self {
        error.to_string()
    }
}
