use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Schema mismatch: table {table} has no column {column}")]
    SchemaMismatch { table: String, column: String },

    #[error("Invalid value in {table}.{column} (row {row}): {value:?}")]
    InvalidValue {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;
