//! Batch summary report
//!
//! Failing records are listed by 1-based line number with their
//! (field, reason) pairs; an all-valid batch reduces to a single success
//! indicator.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::schema::{NormalizedRecord, ValidationError, ValidationOutcome};

/// One field error in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub field: String,
    pub code: &'static str,
    pub reason: String,
}

impl From<&ValidationError> for ErrorEntry {
    fn from(err: &ValidationError) -> Self {
        Self {
            field: err.field().to_string(),
            code: err.code().code(),
            reason: err.reason(),
        }
    }
}

/// One failing record in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    /// 1-based position in the input
    pub line: usize,
    pub errors: Vec<ErrorEntry>,
}

/// One normalized record with its 1-based input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEntry {
    pub line: usize,
    pub record: NormalizedRecord,
}

/// Reduced view of a batch's outcomes
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub all_valid: bool,
    pub failures: Vec<FailureEntry>,
    /// Present only when requested; one entry per valid record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<Vec<NormalizedEntry>>,
}

impl BatchReport {
    pub fn from_outcomes(batch_id: Uuid, outcomes: &[ValidationOutcome], emit_normalized: bool) -> Self {
        let failures: Vec<FailureEntry> = outcomes
            .iter()
            .filter_map(ValidationOutcome::failure)
            .map(|failure| FailureEntry {
                line: failure.index + 1,
                errors: failure.errors.iter().map(ErrorEntry::from).collect(),
            })
            .collect();

        let normalized = emit_normalized.then(|| {
            outcomes
                .iter()
                .enumerate()
                .filter_map(|(index, outcome)| {
                    outcome.record().map(|record| NormalizedEntry {
                        line: index + 1,
                        record: record.clone(),
                    })
                })
                .collect()
        });

        let invalid = failures.len();
        Self {
            batch_id,
            total: outcomes.len(),
            valid: outcomes.len() - invalid,
            invalid,
            all_valid: invalid == 0,
            failures,
            normalized,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_valid {
            return write!(f, "All {} records validated successfully.", self.total);
        }
        writeln!(f, "Errors found in {} of {} records:", self.invalid, self.total)?;
        for failure in &self.failures {
            let errors = failure
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.reason))
                .collect::<Vec<_>>()
                .join("; ");
            writeln!(f, "Line {}: {}", failure.line, errors)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RecordFailure, TypedValue, ValidationError};

    fn passing(name: &str) -> ValidationOutcome {
        ValidationOutcome::Valid(NormalizedRecord::new(vec![(
            "AdSet_name".into(),
            TypedValue::Text(name.into()),
        )]))
    }

    fn failing(index: usize) -> ValidationOutcome {
        ValidationOutcome::Invalid(RecordFailure {
            index,
            errors: vec![
                ValidationError::missing_field("Fase"),
                ValidationError::constraint("Impressions", "greater than or equal to 0", "-5"),
            ],
        })
    }

    #[test]
    fn test_empty_batch_is_all_valid() {
        let report = BatchReport::from_outcomes(Uuid::nil(), &[], false);
        assert!(report.all_valid);
        assert_eq!(report.total, 0);
        assert_eq!(report.to_string(), "All 0 records validated successfully.");
    }

    #[test]
    fn test_failures_use_one_based_lines() {
        let report = BatchReport::from_outcomes(Uuid::nil(), &[failing(0), failing(4)], false);
        assert!(!report.all_valid);
        assert_eq!(report.invalid, 2);
        let lines: Vec<_> = report.failures.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 5]);
        assert_eq!(report.failures[0].errors[0].code, "ADROW_MISSING_REQUIRED_FIELD");

        let text = report.to_string();
        assert!(text.contains("Line 1: Fase: field is required; Impressions: must be"));
        assert!(text.contains("Line 5:"));
    }

    #[test]
    fn test_normalized_only_when_requested() {
        let report = BatchReport::from_outcomes(Uuid::nil(), &[failing(0)], false);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("normalized").is_none());

        let report = BatchReport::from_outcomes(Uuid::nil(), &[failing(0)], true);
        assert_eq!(report.normalized.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_normalized_keep_input_lines() {
        let outcomes = [passing("AS1"), failing(1), passing("AS3")];
        let report = BatchReport::from_outcomes(Uuid::nil(), &outcomes, true);
        let normalized = report.normalized.as_ref().unwrap();
        let lines: Vec<_> = normalized.iter().map(|entry| entry.line).collect();
        assert_eq!(lines, vec![1, 3]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["normalized"][1]["line"], 3);
        assert_eq!(json["normalized"][1]["record"]["AdSet_name"], "AS3");
    }
}
