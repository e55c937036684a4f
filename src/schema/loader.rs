//! Schema loader for JSON schema files
//!
//! A schema file holds one serialized `Schema`. Loading fails on unreadable
//! files, invalid JSON, and declarations that fail `validate_structure`.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Reads schema declarations from disk or from text.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads and checks a schema file.
    pub fn load_file(path: &Path) -> SchemaResult<Schema> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::malformed(&origin, format!("Failed to read file: {}", e)))?;
        Self::parse(&content, &origin)
    }

    /// Parses and checks a schema held in memory. `origin` names the
    /// source in error messages.
    pub fn parse(content: &str, origin: &str) -> SchemaResult<Schema> {
        let schema: Schema = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(origin, format!("Invalid JSON: {}", e)))?;

        schema.validate_structure()?;

        Ok(schema)
    }

    /// Loads `path` when given, the built-in campaign-ad schema otherwise.
    pub fn load_or_default(path: Option<&Path>) -> SchemaResult<SchemaSource> {
        match path {
            Some(path) => Ok(SchemaSource::File(Self::load_file(path)?)),
            None => Ok(SchemaSource::Builtin(Schema::anuncio())),
        }
    }
}

/// A schema that is either built in or owned after loading.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    Builtin(&'static Schema),
    File(Schema),
}

impl SchemaSource {
    pub fn schema(&self) -> &Schema {
        match self {
            SchemaSource::Builtin(schema) => schema,
            SchemaSource::File(schema) => schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Bound, FieldKind, NormalizationRule};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "schema_id": "clicks",
        "schema_version": "2",
        "fields": [
            {"name": "id", "kind": "integer", "required": true,
             "bound": {"op": "at_least", "value": "0"}},
            {"name": "channel", "kind": "enum", "required": true,
             "allowed": ["web", "app"]},
            {"name": "clicks", "kind": "integer", "required": false}
        ],
        "normalization": [
            {"rule": "missing_to_absent", "field": "clicks"}
        ]
    }"#;

    #[test]
    fn test_parse_schema() {
        let schema = SchemaLoader::parse(SAMPLE, "<test>").unwrap();
        assert_eq!(schema.schema_id, "clicks");
        assert_eq!(schema.fields().len(), 3);
        let id = schema.field("id").unwrap();
        assert_eq!(id.kind, FieldKind::Integer);
        assert_eq!(id.bound, Some(Bound::AtLeast(Decimal::ZERO)));
        assert_eq!(schema.field("channel").unwrap().allowed, vec!["web", "app"]);
        assert_eq!(
            schema.normalization(),
            &[NormalizationRule::MissingToAbsent { field: "clicks".into() }]
        );
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = SchemaLoader::parse("{not json", "<test>").unwrap_err();
        assert_eq!(err.code(), "ADROW_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_unsound_schema_rejected() {
        let content = r#"{
            "schema_id": "s", "schema_version": "1",
            "fields": [{"name": "k", "kind": "enum", "required": true}]
        }"#;
        assert_eq!(
            SchemaLoader::parse(content, "<test>").unwrap_err(),
            SchemaError::EnumWithoutValues("k".into())
        );
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let source = SchemaLoader::load_or_default(Some(file.path())).unwrap();
        assert_eq!(source.schema().schema_id, "clicks");
    }

    #[test]
    fn test_missing_file_is_malformed() {
        let err = SchemaLoader::load_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_default_is_builtin() {
        let source = SchemaLoader::load_or_default(None).unwrap();
        assert_eq!(source.schema().schema_id, "anuncio");
    }

    #[test]
    fn test_builtin_schema_round_trips_through_json() {
        let text = serde_json::to_string(Schema::anuncio()).unwrap();
        let parsed = SchemaLoader::parse(&text, "<builtin>").unwrap();
        assert_eq!(&parsed, Schema::anuncio());
    }
}
