//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeGuardError`] via `From`. Malformed sensor input never produces an
//! error: it is clamped or defaulted at decode time.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HomeGuardError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Persistence is unreachable or failed. The caller may retry.
    #[error("storage unavailable")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HomeGuardError {
    /// Whether re-running the same invocation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Operator input that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown sensor channel: {0}")]
    UnknownChannel(String),

    #[error("unknown actuator: {0}")]
    UnknownActuator(String),

    #[error("unknown operating mode: {0}")]
    UnknownMode(String),

    #[error("malformed identifier: {0}")]
    MalformedId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mark_storage_errors_as_retryable() {
        let err = HomeGuardError::Storage(Box::new(std::io::Error::other("disk gone")));
        assert!(err.is_retryable());
    }

    #[test]
    fn should_not_mark_validation_errors_as_retryable() {
        let err: HomeGuardError = ValidationError::UnknownMode("turbo".to_string()).into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Notification",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Notification abc not found");
    }
}
