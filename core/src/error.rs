use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid date range: end {end} precedes start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Duplicate anchor city '{city}'")]
    DuplicateAnchor { city: String },

    #[error("Anchor '{city}' has out-of-range coordinates ({lat}, {lon})")]
    CoordinateOutOfRange { city: String, lat: f64, lon: f64 },

    #[error("{context} weights sum to {sum}, expected 1.0")]
    BadWeights { context: &'static str, sum: f64 },

    #[error("Jitter bound must be non-negative, got {bound}")]
    NegativeJitter { bound: f64 },

    #[error("Incident count range is empty: {lo}..={hi}")]
    EmptyCountRange { lo: u32, hi: u32 },

    #[error("Recency window must cover at least one day, got {days}")]
    EmptyRecencyWindow { days: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DataResult<T> = Result<T, DataError>;
