use thiserror::Error;

use tp_network::NetworkError;

#[derive(Debug, Error)]
pub enum TransitError {
    #[error("station {0:?} is not part of the transit network")]
    UnknownStation(String),

    #[error("invalid transit route {route}: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("scheduling horizon must have at least one time slot")]
    EmptyHorizon,

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type TransitResult<T> = Result<T, TransitError>;
