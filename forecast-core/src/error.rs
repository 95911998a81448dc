use thiserror::Error;

/// The forecast document could not be turned into a [`crate::Forecast`] at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed forecast document: {0}")]
    Malformed(String),
}

/// A single timeslot field that failed validation.
///
/// These never abort a decode; the offending slot carries the error instead of a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldParseError {
    #[error("temperature value is missing")]
    MissingTemperature,

    #[error("temperature value '{0}' is not a finite number")]
    InvalidTemperature(String),
}
