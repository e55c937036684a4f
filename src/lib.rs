//! adrow - strict validation of advertising-campaign records
//!
//! Applies a declarative schema to raw rows: normalization first, then
//! per-field type and constraint checks, collecting every error per row.

pub mod batch;
pub mod cli;
pub mod observability;
pub mod schema;
