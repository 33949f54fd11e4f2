//! Error taxonomy for log replay.
//!
//! The replay engine assumes a well-formed, causally ordered log. Any
//! violation is treated as evidence that the log or its producer is broken,
//! so every variant here is fatal: nothing is recovered locally or retried,
//! and no partial report is produced once replay has aborted.

use thiserror::Error;

/// Error type for replay operations.
///
/// # Propagation Policy
///
/// All variants abort the replay immediately. Partial or inconsistent
/// projection state is considered worse than stopping, so callers should
/// surface the error and skip report rendering entirely.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The event source is missing, unopenable, or undecodable.
    ///
    /// Raised before any dispatch when the source itself cannot be used
    /// (no path supplied, file not found, malformed record).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An event's payload lacks a field required by its type.
    ///
    /// A malformed event makes all derived state suspect, so replay stops
    /// at the first occurrence.
    #[error("event '{event_type}' is missing required payload field '{field}'")]
    SchemaViolation {
        /// Type tag of the offending event.
        event_type: String,
        /// Name of the missing payload field.
        field: String,
    },

    /// An event references an entity id that no earlier event created.
    ///
    /// Examples: an answer for a question that was never asked, or for a
    /// player who never joined the referenced game. The log is assumed to
    /// be append-only and causally ordered; this variant means it is not.
    #[error("ordering violation in '{event_type}': {detail}")]
    OrderViolation {
        /// Type tag of the offending event.
        event_type: String,
        /// Description of the entity reference that could not be resolved.
        detail: String,
    },
}

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_violation_names_type_and_field() {
        let err = ReplayError::SchemaViolation {
            event_type: "PlayerHasRegistered".to_string(),
            field: "player_id".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("PlayerHasRegistered"));
        assert!(message.contains("player_id"));
    }

    #[test]
    fn order_violation_includes_detail() {
        let err = ReplayError::OrderViolation {
            event_type: "AnswerWasGiven".to_string(),
            detail: "question 'q-9' was never asked".to_string(),
        };
        assert!(err.to_string().contains("question 'q-9' was never asked"));
    }
}
