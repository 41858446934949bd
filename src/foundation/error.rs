/// Result alias used across the crate.
pub type ChaseResult<T> = Result<T, ChaseError>;

/// Errors surfaced by scene construction, configuration loading and frame sinks.
///
/// Per-frame evaluation never fails once a scene is built; every fallible operation happens at
/// construction or at an IO boundary.
#[derive(thiserror::Error, Debug)]
pub enum ChaseError {
    /// Invalid build-time input (too few control points, bad durations, ...). Not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Config or snapshot (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, typically IO from a sink.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChaseError {
    /// Build a [`ChaseError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ChaseError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this is a build-time configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for ChaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
