//! Schema and validation engine
//!
//! A schema is an explicit table of field declarations plus normalization
//! rules, built once and never mutated. Validation is a pure function of
//! (schema, raw record).
//!
//! # Design Principles
//!
//! - Normalization runs strictly before type checks
//! - Every field is checked; all errors for a record are collected
//! - Malformed data is a value, never a panic or an abort
//! - Deterministic: same record, same outcome

pub mod anuncio;
mod errors;
mod loader;
mod normalize;
mod types;
mod validator;
mod value;

pub use errors::{SchemaError, SchemaResult, ValidationError, ViolationCode};
pub use loader::{SchemaLoader, SchemaSource};
pub use normalize::{normalize, rewrites};
pub use types::{Bound, FieldKind, FieldSpec, NormalizationRule, Schema};
pub use validator::{RecordFailure, ValidationOutcome, Validator};
pub use value::{NormalizedRecord, RawRecord, RawValue, TypedValue};
