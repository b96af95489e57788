//! `relog check` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use relog_core::config::RelogConfig;
use relog_parser::{Backfill, DocumentBuilder, ParserConfig, TextEventSource};

use crate::cli::CheckArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `check` command.
///
/// Reads the whole file and builds every document without writing any.
/// Malformed events are always skipped so the report counts all of them.
///
/// # Errors
///
/// Returns `CliError::Format` (exit code 3) when at least one event was malformed.
pub fn execute(args: CheckArgs, config: &RelogConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let parser_config = ParserConfig::from_core(&config.parser);
    parser_config.validate()?;

    info!(file = %args.file.display(), "checking log file");

    let input = super::open_input(&args.file)?;
    let mut source = TextEventSource::new(input, &parser_config)?;
    let summary = Backfill::new(DocumentBuilder::new())
        .skip_malformed(true)
        .check(&mut source)?;

    let report = CheckReport {
        source: args.file.display().to_string(),
        lines_read: source.lines_read(),
        events: summary.events,
        format_errors: summary.format_errors,
    };
    writer.render(&report)?;

    if report.format_errors > 0 {
        return Err(CliError::Format(format!(
            "{} malformed event(s) in {}",
            report.format_errors, report.source
        )));
    }

    Ok(())
}

/// Dry-run report.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub source: String,
    pub lines_read: u64,
    pub events: u64,
    pub format_errors: u64,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Check: {}", self.source)?;
        writeln!(w, "  Lines read:     {}", self.lines_read)?;
        writeln!(w, "  Events:         {}", self.events)?;
        writeln!(w, "  Format errors:  {}", self.format_errors)?;
        let result = if self.format_errors == 0 { "OK" } else { "MALFORMED" };
        writeln!(w, "  Result:         {}", result)?;
        Ok(())
    }
}
