use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// Construction asked for zero expected keys, a rate outside (0, 1), or more bits
    /// than a bit vector can hold.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
