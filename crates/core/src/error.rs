use chrono::{DateTime, Utc};
use thiserror::Error;

/// Convenient result alias for the fire spread engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level engine error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a fuel model fails validation at catalog load.
    #[error("invalid fuel model {code}: {reason}")]
    InvalidFuelModel { code: String, reason: String },

    /// Raised when a catalog contains the same fuel code twice.
    #[error("duplicate fuel code encountered: {code}")]
    DuplicateFuelCode { code: String },

    /// Raised when a fuel code is not present in the catalog.
    #[error("unknown fuel code: {code}")]
    UnknownFuelCode { code: String },

    /// Raised when a simulation parameter is out of range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Raised when an ignition is submitted for a time the clock has already passed.
    #[error("ignition at {ignition_time} is earlier than simulation time {current_time}")]
    StaleIgnition {
        ignition_time: DateTime<Utc>,
        current_time: DateTime<Utc>,
    },

    /// Raised under the fail-step policy when a vertex has a zero-length tangent.
    #[error("degenerate tangent at vertex {vertex} ({x}, {y})")]
    DegenerateTangent { vertex: usize, x: f64, y: f64 },

    /// Raised when the geometry collaborator cannot produce a valid perimeter set.
    #[error("perimeter consolidation failed: {reason}")]
    ConsolidationFailed { reason: String },

    /// Wrapper for JSON (de)serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether repeating the same step could succeed
    ///
    /// Consolidation failures leave the committed state untouched, so the caller
    /// may retry or change inputs and step again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConsolidationFailed { .. })
    }

    pub(crate) fn invalid_fuel(code: &str, reason: impl Into<String>) -> Self {
        Error::InvalidFuelModel {
            code: code.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_consolidation_is_retryable() {
        assert!(Error::ConsolidationFailed {
            reason: "self-intersection".to_string()
        }
        .is_retryable());
        assert!(!Error::UnknownFuelCode {
            code: "99".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = Error::invalid_fuel("7", "fuel bed depth must be positive");
        assert_eq!(
            err.to_string(),
            "invalid fuel model 7: fuel bed depth must be positive"
        );
    }
}
