//! Error types

use thiserror::Error;

/// Why a pair of form values could not become [`crate::LifeParameters`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("birth date is empty")]
    MissingBirthDate,

    #[error("birth date {0:?} is not a YYYY-MM-DD calendar date")]
    InvalidBirthDate(String),

    #[error("life expectancy is empty")]
    MissingLifeExpectancy,

    #[error("life expectancy {0:?} is not an integer")]
    InvalidLifeExpectancy(String),

    #[error("life expectancy must be positive, got {0}")]
    NonPositiveLifeExpectancy(i64),

    #[error("{years} years after {birth_date} is outside the supported calendar")]
    OutOfRange { birth_date: String, years: u32 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON for the app settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of [`crate::Session::submit`]. The session is unchanged when this
/// is returned.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
