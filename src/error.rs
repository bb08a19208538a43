use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayrollError>;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("rules parse error: {0}")]
    RulesParseError(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    RulesError(String),
    #[error("validation error: {field} must be non-negative, got {value}")]
    ValidationError { field: &'static str, value: Decimal },
    #[error("batch error: {0}")]
    BatchError(String),
}
