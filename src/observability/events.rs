//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema resolved (built-in or file)
    SchemaLoaded,
    /// Input records read
    InputRead,
    /// Batch validation begins
    BatchStart,
    /// One record failed validation
    RecordRejected,
    /// Batch validation complete
    BatchComplete,
    /// Record violated the key-set contract (FATAL)
    RecordShapeViolation,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::InputRead => "INPUT_READ",
            Event::BatchStart => "BATCH_BEGIN",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::BatchComplete => "BATCH_COMPLETE",
            Event::RecordShapeViolation => "RECORD_SHAPE_VIOLATION",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RecordShapeViolation)
    }

    /// Rejections are data problems, logged as warnings
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::RecordRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BatchStart.as_str(), "BATCH_BEGIN");
        assert_eq!(Event::BatchComplete.to_string(), "BATCH_COMPLETE");
    }

    #[test]
    fn test_event_classification() {
        assert!(Event::RecordShapeViolation.is_fatal());
        assert!(!Event::RecordRejected.is_fatal());
        assert!(Event::RecordRejected.is_warning());
    }
}
