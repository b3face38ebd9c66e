use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlashError>;

#[derive(Error, Debug)]
pub enum FlashError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Station {station} not found")]
    StationNotFound { station: String },

    #[error("Data unavailable for station {station}: {reason}")]
    DataUnavailable { station: String, reason: String },

    #[error("No valid {field} values in window '{window}'")]
    InsufficientHistory { field: String, window: String },

    #[error("Missing {field} reading on {date}")]
    MissingValue { field: String, date: NaiveDate },

    #[error("Date {0} is not present in the loaded series")]
    DateNotInSeries(NaiveDate),
}

impl FlashError {
    pub fn data_unavailable(station: &str, reason: impl Into<String>) -> Self {
        FlashError::DataUnavailable {
            station: station.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors the pipeline degrades around instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FlashError::InsufficientHistory { .. } | FlashError::MissingValue { .. }
        )
    }
}
