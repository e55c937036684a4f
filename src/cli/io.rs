//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per line; blank lines are skipped
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::schema::RawRecord;

use super::errors::{CliError, CliResult};

/// Read JSON-lines records, stopping with an error past `max_records`.
pub fn read_records<R: BufRead>(reader: R, max_records: u64) -> CliResult<Vec<RawRecord>> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if records.len() as u64 >= max_records {
            return Err(CliError::too_many_records(max_records));
        }

        let value: serde_json::Value = serde_json::from_str(&line)
            .map_err(|e| CliError::malformed_input(i + 1, e.to_string()))?;
        let record = RawRecord::from_json(value)
            .ok_or_else(|| CliError::malformed_input(i + 1, "expected a JSON object"))?;
        records.push(record);
    }

    Ok(records)
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&response)
}

fn write_line(value: &serde_json::Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawValue;
    use std::io::Cursor;

    #[test]
    fn test_read_records_skips_blank_lines() {
        let input = "{\"a\": 1}\n\n   \n{\"a\": null}\n";
        let records = read_records(Cursor::new(input), 10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&RawValue::Int(1)));
        assert_eq!(records[1].get("a"), Some(&RawValue::Null));
    }

    #[test]
    fn test_non_object_line_is_malformed() {
        let input = "{\"a\": 1}\n[1, 2]\n";
        let err = read_records(Cursor::new(input), 10).unwrap_err();
        assert_eq!(err.code_str(), "ADROW_CLI_MALFORMED_INPUT");
        assert!(err.message().starts_with("line 2"));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = read_records(Cursor::new("{oops\n"), 10).unwrap_err();
        assert_eq!(err.code_str(), "ADROW_CLI_MALFORMED_INPUT");
    }

    #[test]
    fn test_max_records_enforced() {
        let input = "{}\n{}\n{}\n";
        assert!(read_records(Cursor::new(input), 3).is_ok());
        let err = read_records(Cursor::new(input), 2).unwrap_err();
        assert_eq!(err.code_str(), "ADROW_CLI_TOO_MANY_RECORDS");
    }
}
