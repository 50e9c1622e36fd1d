use crate::foundation::core::ElementId;

/// Crate-wide result alias.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors surfaced by the motion engine.
///
/// None of these are fatal to a mounted page: tick callbacks isolate them, log, and carry on.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// An animation references an element that no longer exists.
    #[error("missing target: element {0} is not attached")]
    MissingTarget(ElementId),

    /// Bounds for an element could not be computed this frame.
    #[error("layout measurement error: element {element}: {reason}")]
    LayoutMeasurement {
        /// Element that failed to measure.
        element: ElementId,
        /// Host-provided reason.
        reason: String,
    },

    /// Invalid engine input (thresholds, ranges, durations).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::LayoutMeasurement`].
    pub fn layout(element: ElementId, reason: impl Into<String>) -> Self {
        Self::LayoutMeasurement {
            element,
            reason: reason.into(),
        }
    }

    /// Build a [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` when the error means the element is gone for good and should be dropped.
    pub fn is_missing_target(&self) -> bool {
        matches!(self, Self::MissingTarget(_))
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
