//! Schema and validation error types
//!
//! Validation error codes (data errors, always recoverable):
//! - ADROW_MISSING_REQUIRED_FIELD
//! - ADROW_TYPE_MISMATCH
//! - ADROW_CONSTRAINT_VIOLATION
//!
//! `SchemaError` covers structural problems: an unsound schema declaration,
//! a schema file that cannot be read, or a record whose key set does not
//! match the schema.

use std::fmt;

use thiserror::Error;

/// Data-error codes attached to every `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    /// Required field absent or null
    MissingRequiredField,
    /// Value cannot be parsed as the field's kind
    TypeMismatch,
    /// Value parsed but violates a bound or the allowed set
    ConstraintViolation,
}

impl ViolationCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationCode::MissingRequiredField => "ADROW_MISSING_REQUIRED_FIELD",
            ViolationCode::TypeMismatch => "ADROW_TYPE_MISMATCH",
            ViolationCode::ConstraintViolation => "ADROW_CONSTRAINT_VIOLATION",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ViolationCode,
    /// Field name as declared in the schema
    field: String,
    /// Expected kind or condition
    expected: String,
    /// What was found instead
    actual: String,
}

impl ValidationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            code: ViolationCode::MissingRequiredField,
            field: field.into(),
            expected: "a value".into(),
            actual: "null".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code: ViolationCode::TypeMismatch,
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn constraint(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code: ViolationCode::ConstraintViolation,
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Enum membership failure listing every allowed value.
    pub fn not_allowed(field: impl Into<String>, allowed: &[String], actual: &str) -> Self {
        let listed = allowed
            .iter()
            .map(|v| format!("'{}'", v))
            .collect::<Vec<_>>()
            .join(", ");
        Self::constraint(field, format!("one of {}", listed), format!("'{}'", actual))
    }

    pub fn code(&self) -> ViolationCode {
        self.code
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Human-readable reason, without the field name
    pub fn reason(&self) -> String {
        match self.code {
            ViolationCode::MissingRequiredField => "field is required".to_string(),
            ViolationCode::TypeMismatch => {
                format!("wrong type: expected {}, got {}", self.expected, self.actual)
            }
            ViolationCode::ConstraintViolation => {
                format!("must be {}, got {}", self.expected, self.actual)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason())
    }
}

impl std::error::Error for ValidationError {}

/// Structural errors: unsound schemas and record shape mismatches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema id must not be empty")]
    EmptySchemaId,

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("enum field '{0}' declares no allowed values")]
    EnumWithoutValues(String),

    #[error("field '{0}' declares allowed values but is not an enum")]
    AllowedValuesOnNonEnum(String),

    #[error("field '{0}' declares a numeric bound but is not numeric")]
    BoundOnNonNumeric(String),

    #[error("normalization rule references undeclared field '{0}'")]
    UnknownRuleField(String),

    #[error("normalization rule on '{field}' is incompatible: {reason}")]
    IncompatibleRule { field: String, reason: String },

    #[error("malformed schema '{origin}': {reason}")]
    Malformed { origin: String, reason: String },

    #[error("record shape mismatch: missing {missing:?}, undeclared {undeclared:?}")]
    RecordShape {
        missing: Vec<String>,
        undeclared: Vec<String>,
    },
}

impl SchemaError {
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Malformed { .. } => "ADROW_SCHEMA_MALFORMED",
            SchemaError::RecordShape { .. } => "ADROW_RECORD_SHAPE",
            _ => "ADROW_SCHEMA_INVALID",
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes() {
        assert_eq!(ViolationCode::MissingRequiredField.code(), "ADROW_MISSING_REQUIRED_FIELD");
        assert_eq!(ViolationCode::TypeMismatch.code(), "ADROW_TYPE_MISMATCH");
        assert_eq!(ViolationCode::ConstraintViolation.code(), "ADROW_CONSTRAINT_VIOLATION");
    }

    #[test]
    fn test_missing_field_reason() {
        let err = ValidationError::missing_field("Fase");
        assert_eq!(err.reason(), "field is required");
        assert_eq!(err.to_string(), "Fase: field is required");
    }

    #[test]
    fn test_type_mismatch_names_expected_kind() {
        let err = ValidationError::type_mismatch("Impressions", "integer", "text 'abc'");
        let display = err.to_string();
        assert!(display.contains("Impressions"));
        assert!(display.contains("integer"));
        assert!(display.contains("abc"));
    }

    #[test]
    fn test_not_allowed_lists_values() {
        let allowed = vec!["Dia útil".to_string(), "Final de Semana".to_string()];
        let err = ValidationError::not_allowed("Tipo_Dia", &allowed, "Feriado");
        assert_eq!(err.code(), ViolationCode::ConstraintViolation);
        assert_eq!(
            err.reason(),
            "must be one of 'Dia útil', 'Final de Semana', got 'Feriado'"
        );
    }

    #[test]
    fn test_schema_error_codes() {
        assert_eq!(SchemaError::malformed("x", "y").code(), "ADROW_SCHEMA_MALFORMED");
        assert_eq!(SchemaError::EmptySchemaId.code(), "ADROW_SCHEMA_INVALID");
        let shape = SchemaError::RecordShape {
            missing: vec!["Fase".into()],
            undeclared: vec![],
        };
        assert_eq!(shape.code(), "ADROW_RECORD_SHAPE");
        assert!(shape.to_string().contains("Fase"));
    }
}
