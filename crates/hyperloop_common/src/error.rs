//! Error types for the pod simulation core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// A selector referenced a pod the fleet does not hold. Selectors are
    /// always populated from the fleet, so this means UI and state are out
    /// of sync.
    #[error("Pod '{0}' is not part of this fleet")]
    UnknownPod(String),

    #[error("Pod '{0}' appears more than once")]
    DuplicatePod(String),

    #[error("Unknown status filter: {0}")]
    InvalidStatus(String),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("Unknown weather condition: {0}")]
    InvalidCondition(String),
}

impl FleetError {
    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            FleetError::UnknownPod(_) => "unknown_pod",
            FleetError::DuplicatePod(_) => "duplicate_pod",
            FleetError::InvalidStatus(_) => "invalid_status",
            FleetError::InvalidSortKey(_) => "invalid_sort_key",
            FleetError::InvalidCondition(_) => "invalid_condition",
        }
    }

    /// True for errors caused by malformed selector input rather than by
    /// a desync between the caller and the fleet.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            FleetError::InvalidStatus(_)
                | FleetError::InvalidSortKey(_)
                | FleetError::InvalidCondition(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;
