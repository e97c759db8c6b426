use thiserror::Error;

use tp_core::RoadId;

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("budget must be finite and non-negative, got {0}")]
    InvalidBudget(f64),

    #[error("invalid maintenance item for {road}: {reason}")]
    InvalidCost { road: RoadId, reason: String },
}

pub type MaintenanceResult<T> = Result<T, MaintenanceError>;
