use thiserror::Error;

use tp_network::NetworkError;
use tp_transit::TransitError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Transit(#[from] TransitError),
}

pub type DataResult<T> = Result<T, DataError>;
