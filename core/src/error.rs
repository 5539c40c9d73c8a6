use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Non-finite value in '{field}': {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid length-of-stay band: lower {lower} > upper {upper}")]
    InvalidLosRange { lower: f64, upper: f64 },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Reject NaN and infinities before they reach a comparison or a report.
pub fn ensure_finite(field: &'static str, value: f64) -> EngineResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { field, value })
    }
}
