//! CLI-specific error types and exit code mapping

use relog_core::error::RelogError;
use relog_parser::ParserError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Malformed events were found (strict ingest, or `check`).
    #[error("format error: {0}")]
    Format(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from relog-core.
    #[error("{0}")]
    Core(#[from] RelogError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 3    | Malformed events were found     |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Format(_) => 3,
            Self::Io(_) => 10,
            Self::Core(err) => match err {
                RelogError::Config(_) => 2,
                RelogError::Format(_) => 3,
                RelogError::Io(_) | RelogError::Stream(_) => 10,
                RelogError::Sink(_) => 1,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<ParserError> for CliError {
    fn from(e: ParserError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relog_core::error::{ConfigError, FormatError, StreamError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_format_error() {
        let err = CliError::Format("2 malformed events".to_owned());
        assert_eq!(err.exit_code(), 3, "format error should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::Core(
            ConfigError::ParseFailed {
                reason: "bad".to_owned(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_core_format_error() {
        let err = CliError::Core(
            FormatError::UnknownLevel {
                token: "NOTICE".to_owned(),
                line: 7,
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_core_stream_error() {
        let err = CliError::Core(
            StreamError::Read {
                line: 3,
                source: std::io::Error::other("disk gone"),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_parser_error_converts_through_core() {
        let err: CliError = ParserError::UnknownLevel {
            token: "LOUD".to_owned(),
            line: 1,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("LOUD"));
    }

    #[test]
    fn test_error_display_messages() {
        let err = CliError::Config("missing field".to_owned());
        assert_eq!(err.to_string(), "configuration error: missing field");

        let err = CliError::Command("no such section".to_owned());
        assert_eq!(err.to_string(), "no such section");
    }
}
