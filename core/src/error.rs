use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Operator '{operator_id}' has available_until before available_from")]
    OperatorWindowInverted { operator_id: String },

    #[error("Work item '{item_id}' has non-positive duration ({minutes} min)")]
    NonPositiveDuration { item_id: String, minutes: i64 },

    #[error("Capacity window '{window_id}' has end before start")]
    CapacityWindowInverted { window_id: String },

    #[error("Requested time range has end before start")]
    TimeRangeInverted,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
