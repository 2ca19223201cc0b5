use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum MeetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid plate set: {0}")]
    InvalidPlateSet(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, MeetError>;

impl MeetError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Reasons the greedy decomposition cannot load a bar. A layout that only
/// overflows the sleeve is not an error, see `LayoutStatus::SleeveFull`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlateLoadError {
    #[error("Target weight {target} is below the bar weight {bar_weight}")]
    BelowBarWeight { target: f64, bar_weight: f64 },

    #[error("Plate combination not possible ({remainder} left over per side)")]
    InfeasibleCombination { remainder: f64 },

    #[error("{count} plates of {plate} per side is more than a layout can count")]
    TooManyPlates { plate: f64, count: f64 },
}
