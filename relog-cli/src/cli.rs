//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O happen here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// relog -- rebuild multi-line text log events and backfill them as JSON documents.
///
/// Use `relog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "relog", version, about, long_about = None)]
pub struct Cli {
    /// Path to the relog.toml configuration file.
    #[arg(short, long, default_value = "relog.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for reports.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Backfill a log file as JSON lines.
    Ingest(IngestArgs),

    /// Parse a log file without writing documents and report counts.
    Check(CheckArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- ingest ----

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Log file to read.
    pub file: PathBuf,

    /// Write documents to this file instead of the configured sink.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Tag added to every document (overrides `sink.tag`).
    #[arg(long)]
    pub tag: Option<String>,

    /// Abort on the first malformed event.
    #[arg(long)]
    pub strict: bool,
}

// ---- check ----

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Log file to read.
    pub file: PathBuf,
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file.
    Validate,

    /// Show the effective configuration.
    Show {
        /// Show only a specific section (general, parser, sink).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_ingest_defaults() {
        let cli = Cli::try_parse_from(["relog", "ingest", "app.log"]).expect("parse succeeded");
        assert_eq!(cli.config, PathBuf::from("relog.toml"));
        assert!(cli.log_level.is_none());
        assert!(matches!(cli.output, OutputFormat::Text));
        match cli.command {
            Commands::Ingest(args) => {
                assert_eq!(args.file, PathBuf::from("app.log"));
                assert!(args.out.is_none(), "out should default to None");
                assert!(args.tag.is_none(), "tag should default to None");
                assert!(!args.strict, "strict should default to false");
            }
            _ => panic!("expected Ingest command"),
        }
    }

    #[test]
    fn test_cli_parse_ingest_all_flags() {
        let cli = Cli::try_parse_from([
            "relog", "ingest", "app.log", "--out", "/tmp/out.jsonl", "--tag", "replay", "--strict",
        ])
        .expect("parse succeeded");
        match cli.command {
            Commands::Ingest(args) => {
                assert_eq!(args.out, Some(PathBuf::from("/tmp/out.jsonl")));
                assert_eq!(args.tag.as_deref(), Some("replay"));
                assert!(args.strict);
            }
            _ => panic!("expected Ingest command"),
        }
    }

    #[test]
    fn test_cli_parse_ingest_requires_file() {
        let result = Cli::try_parse_from(["relog", "ingest"]);
        assert!(result.is_err(), "ingest without a file should fail");
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["relog", "check", "app.log"]).expect("parse succeeded");
        match cli.command {
            Commands::Check(args) => assert_eq!(args.file, PathBuf::from("app.log")),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let cli = Cli::try_parse_from(["relog", "config", "validate"]).expect("parse succeeded");
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.action, ConfigAction::Validate)),
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["relog", "config", "show", "--section", "parser"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Config(ConfigArgs {
                action: ConfigAction::Show { section },
            }) => assert_eq!(section.as_deref(), Some("parser")),
            _ => panic!("expected Config Show command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "relog",
            "-c",
            "/etc/relog.toml",
            "check",
            "app.log",
            "--log-level",
            "debug",
            "--output",
            "json",
        ])
        .expect("parse succeeded");
        assert_eq!(cli.config, PathBuf::from("/etc/relog.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_invalid_output_format() {
        let result = Cli::try_parse_from(["relog", "--output", "yaml", "check", "app.log"]);
        assert!(result.is_err(), "unknown output format should fail");
    }
}
