//! `relog config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use relog_core::config::RelogConfig;
use relog_parser::ParserConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
///
/// `config` is the effective configuration (file, env overrides, CLI flags);
/// `validate` re-reads `config_path` itself so file errors are reported.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    config: &RelogConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, config, section, writer),
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// Besides the core checks this compiles the header pattern and checks
/// its named captures.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails.
fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let errors = match validate_file(config_path) {
        Ok(()) => Vec::new(),
        Err(e) => vec![e.to_string()],
    };

    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

fn validate_file(config_path: &Path) -> Result<(), CliError> {
    let config = RelogConfig::load(config_path)?;
    ParserConfig::from_core(&config.parser).validate()?;
    Ok(())
}

/// Display the effective configuration, optionally a single section.
///
/// # Errors
///
/// Returns `CliError::Command` if the section name is unknown.
fn execute_show(
    config_path: &Path,
    config: &RelogConfig,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = config_path.display().to_string();

    let report = match section.as_deref() {
        None => ConfigReport::new(source, None, config)?,
        Some("general") => ConfigReport::new(source, Some("general"), &config.general)?,
        Some("parser") => ConfigReport::new(source, Some("parser"), &config.parser)?,
        Some("sink") => ConfigReport::new(source, Some("sink"), &config.sink)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, parser, sink)",
                other
            )));
        }
    };

    writer.render(&report)?;

    Ok(())
}

/// Configuration display report.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Configuration values
    pub config: serde_json::Value,
    /// Serialized TOML (text rendering only)
    #[serde(skip)]
    pub config_toml: String,
}

impl ConfigReport {
    fn new<T: Serialize>(
        source: String,
        section: Option<&str>,
        value: &T,
    ) -> Result<Self, CliError> {
        let config_toml = toml::to_string_pretty(value)
            .map_err(|e| CliError::Command(format!("failed to render config: {}", e)))?;
        Ok(Self {
            source,
            section: section.map(str::to_owned),
            config: serde_json::to_value(value)?,
            config_toml,
        })
    }
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.section {
            Some(section) => writeln!(w, "Configuration [{}] (source: {})", section, self.source)?,
            None => writeln!(w, "Configuration (source: {})", self.source)?,
        }
        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Config Validation: {}", self.source)?;
        if self.valid {
            writeln!(w, "  Result: VALID")?;
        } else {
            writeln!(w, "  Result: INVALID")?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_report_full_config_text() {
        let config = RelogConfig::default();
        let report = ConfigReport::new("relog.toml".to_owned(), None, &config).expect("report");

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Configuration (source: relog.toml)"));
        assert!(output.contains("[parser]"));
        assert!(output.contains("utc_offset = \"-03:00\""));
    }

    #[test]
    fn test_config_report_section_json() {
        let config = RelogConfig::default();
        let report = ConfigReport::new("relog.toml".to_owned(), Some("sink"), &config.sink)
            .expect("report");

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["section"], "sink");
        assert_eq!(json["config"]["kind"], "stdout");
        assert!(json.get("config_toml").is_none(), "config_toml should be skipped");
    }

    #[test]
    fn test_show_unknown_section_is_command_error() {
        let writer = OutputWriter::new(crate::cli::OutputFormat::Json);
        let err = execute_show(
            Path::new("relog.toml"),
            &RelogConfig::default(),
            Some("storage".to_owned()),
            &writer,
        )
        .expect_err("unknown section should fail");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("storage"));
    }

    #[test]
    fn test_validate_file_accepts_valid_config() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("relog.toml");
        fs::write(
            &path,
            "[general]\nlog_level = \"debug\"\n\n[parser]\nutc_offset = \"+09:00\"\n",
        )
        .expect("write config");
        assert!(validate_file(&path).is_ok());
    }

    #[test]
    fn test_validate_file_rejects_pattern_without_captures() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("relog.toml");
        fs::write(&path, "[parser]\nheader_pattern = \"^(?P<level>\\\\w+)\"\n")
            .expect("write config");
        let err = validate_file(&path).expect_err("pattern lacks captures");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_validate_file_missing_file() {
        let err = validate_file(Path::new("/nonexistent/relog.toml"))
            .expect_err("missing file should fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_validation_report_invalid_text() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["invalid config value for 'sink.kind'".to_owned()],
        };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("INVALID"));
        assert!(output.contains("sink.kind"));
    }
}
