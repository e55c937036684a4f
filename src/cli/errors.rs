//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/input file)
    IoError,
    /// Input line is not a JSON object
    MalformedInput,
    /// Schema could not be loaded, or a record broke the key-set contract
    SchemaError,
    /// Input exceeds the configured record cap
    TooManyRecords,
    /// Batch contained invalid records and the config asks to fail
    InvalidRecords,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ADROW_CLI_CONFIG_ERROR",
            Self::IoError => "ADROW_CLI_IO_ERROR",
            Self::MalformedInput => "ADROW_CLI_MALFORMED_INPUT",
            Self::SchemaError => "ADROW_CLI_SCHEMA_ERROR",
            Self::TooManyRecords => "ADROW_CLI_TOO_MANY_RECORDS",
            Self::InvalidRecords => "ADROW_CLI_INVALID_RECORDS",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// `line` is 1-based
    pub fn malformed_input(line: usize, msg: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::MalformedInput,
            format!("line {}: {}", line, msg.into()),
        )
    }

    /// Key-set contract violation at 1-based `line`
    pub fn record_shape(line: usize, err: &SchemaError) -> Self {
        Self::new(
            CliErrorCode::SchemaError,
            format!("line {}: {}: {}", line, err.code(), err),
        )
    }

    pub fn too_many_records(max: u64) -> Self {
        Self::new(
            CliErrorCode::TooManyRecords,
            format!("input exceeds max_records ({})", max),
        )
    }

    pub fn invalid_records(invalid: usize, total: usize) -> Self {
        Self::new(
            CliErrorCode::InvalidRecords,
            format!("{} of {} records failed validation", invalid, total),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
