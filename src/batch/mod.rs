//! Batch validation
//!
//! Records are independent: one record's failure never halts or skips the
//! rest, and outcomes always come back in input order, one per record.

mod report;

pub use report::{BatchReport, ErrorEntry, FailureEntry, NormalizedEntry};

use std::thread;

use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::{rewrites, RawRecord, ValidationOutcome, Validator};

/// Validates every record in order.
pub fn validate_batch<'r, I>(validator: &Validator<'_>, records: I) -> Vec<ValidationOutcome>
where
    I: IntoIterator<Item = &'r RawRecord>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| validator.validate_at(index, raw))
        .collect()
}

/// Validates records on up to `workers` scoped threads.
///
/// Each worker takes a contiguous chunk; outcomes are reassembled in input
/// order with their original positions.
pub fn validate_parallel(
    validator: &Validator<'_>,
    records: &[RawRecord],
    workers: usize,
) -> Vec<ValidationOutcome> {
    let workers = workers.max(1);
    if workers == 1 || records.len() < 2 {
        return validate_batch(validator, records);
    }

    let chunk_size = records.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let offset = chunk_index * chunk_size;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, raw)| validator.validate_at(offset + i, raw))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(outcomes) => outcomes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Runs batches with logging and metrics.
pub struct BatchRunner<'a> {
    validator: Validator<'a>,
    metrics: &'a MetricsRegistry,
    parallelism: usize,
}

impl<'a> BatchRunner<'a> {
    pub fn new(validator: Validator<'a>, metrics: &'a MetricsRegistry) -> Self {
        Self {
            validator,
            metrics,
            parallelism: 1,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// Validates `records`, returning the batch id and per-record outcomes.
    pub fn run(&self, records: &[RawRecord]) -> (Uuid, Vec<ValidationOutcome>) {
        let batch_id = Uuid::new_v4();
        let batch_str = batch_id.to_string();
        let total = records.len().to_string();

        log_event_with_fields(
            Event::BatchStart,
            &[
                ("batch_id", batch_str.as_str()),
                ("records", total.as_str()),
                ("schema", self.validator.schema().schema_id.as_str()),
            ],
        );

        let outcomes = validate_parallel(&self.validator, records, self.parallelism);

        let schema = self.validator.schema();
        for (raw, outcome) in records.iter().zip(&outcomes) {
            self.metrics.add_normalized(rewrites(schema, raw).len());
            match outcome {
                ValidationOutcome::Valid(_) => self.metrics.record_accepted(),
                ValidationOutcome::Invalid(failure) => {
                    self.metrics.record_rejected(failure.errors.len());
                    let line = (failure.index + 1).to_string();
                    let errors = failure
                        .errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    log_event_with_fields(
                        Event::RecordRejected,
                        &[
                            ("batch_id", batch_str.as_str()),
                            ("line", line.as_str()),
                            ("errors", errors.as_str()),
                        ],
                    );
                }
            }
        }
        self.metrics.increment_batches();

        let rejected = outcomes.iter().filter(|o| !o.is_valid()).count().to_string();
        log_event_with_fields(
            Event::BatchComplete,
            &[
                ("batch_id", batch_str.as_str()),
                ("records", total.as_str()),
                ("rejected", rejected.as_str()),
            ],
        );

        (batch_id, outcomes)
    }
}
