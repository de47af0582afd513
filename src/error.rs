// src/error.rs

use thiserror::Error;

/// Errors raised outside the step loop: bad configuration, bad schedule
/// parameters and export failures. `reset` and `step` never fail.
#[derive(Error, Debug)]
pub enum SimError {
    /// The simulator configuration breaks a precondition.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A price schedule distribution could not be built.
    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
