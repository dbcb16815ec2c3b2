use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Column '{column}' holds unparseable value '{value}'")]
    UnparseableField { column: String, value: String },

    #[error("Unrecognized timestamp text: '{0}'")]
    UnrecognizedTimestamp(String),

    #[error("Timestamp {0} cannot be converted to an instant")]
    TimestampOutOfRange(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required data: {0}")]
    MissingData(String),
}
