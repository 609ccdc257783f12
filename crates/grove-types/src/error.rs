use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid {axis}: {value} is outside [-{limit}, {limit}]")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("invalid jitter radius: {0}")]
    InvalidJitter(f64),
}
