//! Schema type definitions
//!
//! Supported kinds:
//! - integer: 64-bit signed integer
//! - decimal: exact decimal number
//! - string: UTF-8 text
//! - date: calendar date, `YYYY-MM-DD`
//! - enum: text restricted to a declared set

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Supported field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Decimal,
    String,
    Date,
    Enum,
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::String => "string",
            FieldKind::Date => "date",
            FieldKind::Enum => "enum",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

/// Lower bound on a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Bound {
    /// value >= limit
    AtLeast(Decimal),
    /// value > limit
    GreaterThan(Decimal),
}

impl Bound {
    pub fn admits(&self, value: Decimal) -> bool {
        match self {
            Bound::AtLeast(limit) => value >= *limit,
            Bound::GreaterThan(limit) => value > *limit,
        }
    }

    /// Condition text, e.g. "greater than 0"
    pub fn describe(&self) -> String {
        match self {
            Bound::AtLeast(limit) => format!("greater than or equal to {}", limit),
            Bound::GreaterThan(limit) => format!("greater than {}", limit),
        }
    }
}

/// Declaration of one record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Optional fields resolve to the absent marker instead of erroring
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound: Option<Bound>,
    /// Allowed literals, enum kind only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            bound: None,
            allowed: Vec::new(),
            description: None,
        }
    }

    /// Create a required field of the given kind
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, true)
    }

    /// Create an optional field of the given kind
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, false)
    }

    /// Create a required enum field restricted to `allowed`
    pub fn required_enum(name: impl Into<String>, allowed: &[&str]) -> Self {
        let mut spec = Self::new(name, FieldKind::Enum, true);
        spec.allowed = allowed.iter().map(|v| v.to_string()).collect();
        spec
    }

    pub fn with_bound(mut self, bound: Bound) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn allows(&self, value: &str) -> bool {
        self.allowed.iter().any(|v| v == value)
    }
}

/// Pre-validation rewrite of one field's raw value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum NormalizationRule {
    /// Null or NaN becomes the absent marker
    MissingToAbsent { field: String },
    /// Numeric zero becomes `minimum`
    ZeroToMinimum { field: String, minimum: Decimal },
}

impl NormalizationRule {
    pub fn field(&self) -> &str {
        match self {
            NormalizationRule::MissingToAbsent { field } => field,
            NormalizationRule::ZeroToMinimum { field, .. } => field,
        }
    }
}

/// Complete schema: ordered fields plus normalization rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub schema_id: String,
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declaration order is reporting order
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub normalization: Vec<NormalizationRule>,
}

impl Schema {
    pub fn new(
        schema_id: impl Into<String>,
        schema_version: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            schema_version: schema_version.into(),
            description: None,
            fields,
            normalization: Vec::new(),
        }
    }

    pub fn with_normalization(mut self, rules: Vec<NormalizationRule>) -> Self {
        self.normalization = rules;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn normalization(&self) -> &[NormalizationRule] {
        &self.normalization
    }

    /// Checks the declaration itself (not a record).
    pub fn validate_structure(&self) -> SchemaResult<()> {
        if self.schema_id.trim().is_empty() {
            return Err(SchemaError::EmptySchemaId);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            match field.kind {
                FieldKind::Enum if field.allowed.is_empty() => {
                    return Err(SchemaError::EnumWithoutValues(field.name.clone()));
                }
                FieldKind::Enum => {}
                _ if !field.allowed.is_empty() => {
                    return Err(SchemaError::AllowedValuesOnNonEnum(field.name.clone()));
                }
                _ => {}
            }
            if field.bound.is_some() && !field.kind.is_numeric() {
                return Err(SchemaError::BoundOnNonNumeric(field.name.clone()));
            }
        }

        for rule in &self.normalization {
            self.check_rule(rule)?;
        }

        Ok(())
    }

    fn check_rule(&self, rule: &NormalizationRule) -> SchemaResult<()> {
        let field = self
            .field(rule.field())
            .ok_or_else(|| SchemaError::UnknownRuleField(rule.field().to_string()))?;

        let incompatible = |reason: &str| SchemaError::IncompatibleRule {
            field: field.name.clone(),
            reason: reason.to_string(),
        };

        match rule {
            NormalizationRule::MissingToAbsent { .. } => {
                if field.required {
                    return Err(incompatible("field is required"));
                }
            }
            NormalizationRule::ZeroToMinimum { minimum, .. } => {
                if !field.kind.is_numeric() {
                    return Err(incompatible("field is not numeric"));
                }
                if field.bound.is_some_and(|b| !b.admits(*minimum)) {
                    return Err(incompatible("minimum violates the field bound"));
                }
            }
        }

        Ok(())
    }
}
