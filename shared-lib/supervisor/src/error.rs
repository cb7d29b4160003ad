use thiserror::Error;

/// Terminal outcome of a supervision group that did not shut down cleanly.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The first unit to fail, by completion order.
    #[error("unit `{unit}` failed: {source}")]
    UnitFailed {
        unit: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SupervisorError {
    /// Name of the unit that caused the failure.
    pub fn unit(&self) -> &str {
        match self {
            SupervisorError::UnitFailed { unit, .. } => unit,
        }
    }
}
