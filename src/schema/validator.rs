//! Record validator
//!
//! Validation semantics:
//! - Normalization runs first, on a copy of the record
//! - Every schema field is checked; one field's error never hides another's
//! - Errors are reported in schema declaration order
//! - A record with no errors converts to a `NormalizedRecord`
//!
//! Malformed data never aborts validation. A key missing from the record
//! is treated as absent; drivers that promise the full key set can enforce
//! it separately with `check_shape`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::errors::{SchemaError, SchemaResult, ValidationError};
use super::normalize::normalize;
use super::types::{FieldKind, FieldSpec, Schema};
use super::value::{NormalizedRecord, RawRecord, RawValue, TypedValue};

/// Result of validating one record at a known position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(NormalizedRecord),
    Invalid(RecordFailure),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn record(&self) -> Option<&NormalizedRecord> {
        match self {
            ValidationOutcome::Valid(record) => Some(record),
            ValidationOutcome::Invalid(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RecordFailure> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(failure) => Some(failure),
        }
    }
}

/// Errors for one record, with its 0-based input position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub index: usize,
    /// Never empty; schema declaration order
    pub errors: Vec<ValidationError>,
}

/// Applies a schema to raw records. Holds no state besides the schema.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    schema: &'a Schema,
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Validates one record, collecting every field error.
    pub fn validate(&self, raw: &RawRecord) -> Result<NormalizedRecord, Vec<ValidationError>> {
        let normalized = normalize(self.schema, raw);

        let mut values = Vec::with_capacity(self.schema.fields().len());
        let mut errors = Vec::new();

        for spec in self.schema.fields() {
            match validate_field(spec, normalized.get(&spec.name)) {
                Ok(value) => values.push((spec.name.clone(), value)),
                Err(err) => errors.push(err),
            }
        }

        if errors.is_empty() {
            Ok(NormalizedRecord::new(values))
        } else {
            Err(errors)
        }
    }

    /// Validates the record at `index` of a batch.
    pub fn validate_at(&self, index: usize, raw: &RawRecord) -> ValidationOutcome {
        match self.validate(raw) {
            Ok(record) => ValidationOutcome::Valid(record),
            Err(errors) => ValidationOutcome::Invalid(RecordFailure { index, errors }),
        }
    }

    /// Checks that the record carries exactly the schema's key set.
    ///
    /// This is the caller contract, not data validation: null values pass,
    /// missing or undeclared keys do not.
    pub fn check_shape(&self, raw: &RawRecord) -> SchemaResult<()> {
        let missing: Vec<String> = self
            .schema
            .field_names()
            .filter(|name| !raw.contains(name))
            .map(String::from)
            .collect();
        let undeclared: Vec<String> = raw
            .keys()
            .filter(|key| self.schema.field(key).is_none())
            .map(String::from)
            .collect();

        if missing.is_empty() && undeclared.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::RecordShape {
                missing,
                undeclared,
            })
        }
    }
}

fn validate_field(spec: &FieldSpec, value: Option<&RawValue>) -> Result<TypedValue, ValidationError> {
    let value = match value {
        None | Some(RawValue::Null) => {
            return if spec.required {
                Err(ValidationError::missing_field(&spec.name))
            } else {
                Ok(TypedValue::Absent)
            };
        }
        Some(value) => value,
    };

    let mismatch = || ValidationError::type_mismatch(&spec.name, spec.kind.type_name(), value.describe());

    match spec.kind {
        FieldKind::Integer => {
            let n = parse_integer(value).ok_or_else(mismatch)?;
            check_bound(spec, Decimal::from(n))?;
            Ok(TypedValue::Integer(n))
        }
        FieldKind::Decimal => {
            let d = parse_decimal(value).ok_or_else(mismatch)?;
            check_bound(spec, d)?;
            Ok(TypedValue::Decimal(d))
        }
        FieldKind::String => match value {
            RawValue::Text(s) => Ok(TypedValue::Text(s.clone())),
            _ => Err(mismatch()),
        },
        FieldKind::Date => parse_date(value).map(TypedValue::Date).ok_or_else(mismatch),
        FieldKind::Enum => match value {
            RawValue::Text(s) if spec.allows(s) => Ok(TypedValue::Enum(s.clone())),
            RawValue::Text(s) => Err(ValidationError::not_allowed(&spec.name, &spec.allowed, s)),
            _ => Err(mismatch()),
        },
    }
}

fn check_bound(spec: &FieldSpec, value: Decimal) -> Result<(), ValidationError> {
    match spec.bound {
        Some(bound) if !bound.admits(value) => Err(ValidationError::constraint(
            &spec.name,
            bound.describe(),
            value.to_string(),
        )),
        _ => Ok(()),
    }
}

/// Integers, integral floats and decimals, and integer text.
fn parse_integer(value: &RawValue) -> Option<i64> {
    match value {
        RawValue::Int(i) => Some(*i),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => value.as_number()?.to_i64(),
        RawValue::Decimal(d) if d.fract().is_zero() => d.to_i64(),
        RawValue::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_decimal(value: &RawValue) -> Option<Decimal> {
    match value {
        RawValue::Int(_) | RawValue::Float(_) | RawValue::Decimal(_) | RawValue::Text(_) => {
            value.as_number()
        }
        _ => None,
    }
}

fn parse_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Text(s) => NaiveDate::from_str(s.trim()).ok(),
        _ => None,
    }
}
