//! CLI command implementations
//!
//! `validate` resolves config and schema, reads the whole input, validates
//! it as one batch and writes one JSON report. Data errors land in the
//! report; only contract problems (unreadable input, non-object lines,
//! shape violations in strict mode) abort the run.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde_json::json;

use crate::batch::{BatchReport, BatchRunner};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::schema::{Schema, SchemaLoader, Validator};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_records, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let result = run_command(cli.command);

    if let Err(ref e) = result {
        // The report was already written for invalid batches
        if e.code() != &CliErrorCode::InvalidRecords {
            let _ = write_error(e.code_str(), e.message());
        }
    }

    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate {
            input,
            config,
            schema,
        } => validate(input.as_deref(), config.as_deref(), schema.as_deref()),
        Command::Schema { schema } => print_schema(schema.as_deref()),
    }
}

/// Validate a JSON-lines file (or stdin) and print the report
pub fn validate(
    input: Option<&Path>,
    config_path: Option<&Path>,
    schema_path: Option<&Path>,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("parallelism", config.parallelism.to_string().as_str()),
            ("strict_shape", if config.strict_shape { "true" } else { "false" }),
        ],
    );

    let source = SchemaLoader::load_or_default(schema_path)?;

    let (report, metrics) = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CliError::io_error(format!("Failed to open {}: {}", path.display(), e))
            })?;
            validate_reader(BufReader::new(file), &config, source.schema())?
        }
        None => validate_reader(io::stdin().lock(), &config, source.schema())?,
    };

    write_response(&json!({
        "report": report,
        "metrics": metrics,
    }))?;

    if config.fail_on_invalid && !report.all_valid {
        return Err(CliError::invalid_records(report.invalid, report.total));
    }

    Ok(())
}

/// Validate every record from `reader` as one batch.
pub fn validate_reader<R: BufRead>(
    reader: R,
    config: &Config,
    schema: &Schema,
) -> CliResult<(BatchReport, MetricsSnapshot)> {
    log_event_with_fields(
        Event::SchemaLoaded,
        &[
            ("fields", schema.fields().len().to_string().as_str()),
            ("schema_id", schema.schema_id.as_str()),
            ("schema_version", schema.schema_version.as_str()),
        ],
    );

    let records = read_records(reader, config.max_records)?;
    log_event_with_fields(
        Event::InputRead,
        &[("records", records.len().to_string().as_str())],
    );

    let validator = Validator::new(schema);

    if config.strict_shape {
        for (i, record) in records.iter().enumerate() {
            if let Err(e) = validator.check_shape(record) {
                let line = (i + 1).to_string();
                log_event_with_fields(
                    Event::RecordShapeViolation,
                    &[("line", line.as_str()), ("reason", e.to_string().as_str())],
                );
                return Err(CliError::record_shape(i + 1, &e));
            }
        }
    }

    let metrics = MetricsRegistry::new();
    let (batch_id, outcomes) = BatchRunner::new(validator, &metrics)
        .with_parallelism(config.parallelism)
        .run(&records);

    let report = BatchReport::from_outcomes(batch_id, &outcomes, config.emit_normalized);
    Ok((report, metrics.snapshot()))
}

/// Print the active schema
pub fn print_schema(schema_path: Option<&Path>) -> CliResult<()> {
    let source = SchemaLoader::load_or_default(schema_path)?;
    write_response(source.schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Cursor;

    fn row(impressions: i64, tipo: &str) -> String {
        json!({
            "Organizador": 1,
            "Ano_Mes": "2024 | Março",
            "Dia_da_Semana": "Sexta-Feira",
            "Tipo_Dia": "Dia útil",
            "Objetivo": "Leads",
            "Date": "2024-03-01",
            "AdSet_name": "AS1",
            "Amount_spent": 0,
            "Link_clicks": null,
            "Impressions": impressions,
            "Conversions": null,
            "Segmentação": "LookALike",
            "Tipo_de_Anúncio": tipo,
            "Fase": "1º Lançamento"
        })
        .to_string()
    }

    #[test]
    fn test_validate_reader_reports_failures() {
        let input = format!("{}\n{}\n{}\n", row(100, "Video"), row(-5, "Banner"), row(7, "Estático"));
        let (report, metrics) =
            validate_reader(Cursor::new(input), &Config::default(), Schema::anuncio()).unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.invalid, 1);
        assert_eq!(report.failures[0].line, 2);
        let fields: Vec<_> = report.failures[0].errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Impressions", "Tipo_de_Anúncio"]);
        assert_eq!(metrics.records_rejected, 1);
        assert_eq!(metrics.field_errors, 2);
    }

    #[test]
    fn test_emit_normalized() {
        let config = Config {
            emit_normalized: true,
            ..Config::default()
        };
        let (report, _) =
            validate_reader(Cursor::new(row(100, "Video")), &config, Schema::anuncio()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["normalized"][0]["line"], 1);
        let normalized = &json["normalized"][0]["record"];
        assert_eq!(normalized["Amount_spent"], Value::from("0.01"));
        assert_eq!(normalized["Link_clicks"], Value::Null);
        assert_eq!(normalized["Date"], Value::from("2024-03-01"));
    }

    #[test]
    fn test_strict_shape_rejects_missing_keys() {
        let config = Config {
            strict_shape: true,
            ..Config::default()
        };
        let input = format!("{}\n{{\"Organizador\": 1}}\n", row(1, "Video"));
        let err = validate_reader(Cursor::new(input), &config, Schema::anuncio()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SchemaError);
        assert!(err.message().starts_with("line 2"));
    }

    #[test]
    fn test_lenient_shape_reports_missing_keys_as_data_errors() {
        let (report, _) = validate_reader(
            Cursor::new("{\"Organizador\": 1}\n"),
            &Config::default(),
            Schema::anuncio(),
        )
        .unwrap();
        assert_eq!(report.invalid, 1);
        // every required field except Organizador
        assert_eq!(report.failures[0].errors.len(), 11);
    }
}
