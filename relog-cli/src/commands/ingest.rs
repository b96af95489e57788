//! `relog ingest` command handler

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use relog_core::config::{RelogConfig, SinkConfig};
use relog_parser::{
    Backfill, BackfillSummary, DocumentBuilder, JsonLinesSink, ParserConfig, TextEventSource,
};

use crate::cli::IngestArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ingest` command.
///
/// Documents go to `--out`, or to `sink.path` when `sink.kind = "file"`,
/// otherwise to stdout. The report goes to stderr when stdout carries documents.
///
/// # Errors
///
/// * `CliError::Format` when a malformed event aborts the run (`--strict` or `skip_malformed = false`)
/// * `CliError::Io` when the input cannot be opened or the output cannot be created
/// * `CliError::Command` when some documents could not be written
pub fn execute(
    args: IngestArgs,
    config: &RelogConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut parser_config = ParserConfig::from_core(&config.parser);
    if args.strict {
        parser_config.skip_malformed = false;
    }
    parser_config.validate()?;

    let input = super::open_input(&args.file)?;
    let out_path = output_path(args.out, &config.sink);
    let tag = args.tag.or_else(|| config.sink.tag.clone());

    info!(
        file = %args.file.display(),
        out = %destination(out_path.as_deref()),
        strict = !parser_config.skip_malformed,
        "starting ingest"
    );

    let (sink_name, out) = match &out_path {
        Some(path) => (
            "file",
            Box::new(BufWriter::new(File::create(path)?)) as Box<dyn Write>,
        ),
        None => (
            "stdout",
            Box::new(BufWriter::new(std::io::stdout().lock())) as Box<dyn Write>,
        ),
    };
    let mut sink = JsonLinesSink::new(sink_name, out).with_tag(tag.clone());
    let mut source = TextEventSource::new(input, &parser_config)?;

    let summary = Backfill::new(DocumentBuilder::new())
        .skip_malformed(parser_config.skip_malformed)
        .run(&mut source, &mut sink)
        .map_err(|err| {
            if err.is_recoverable() {
                CliError::Format(err.to_string())
            } else {
                CliError::Core(err)
            }
        })?;
    drop(sink);

    let report = IngestReport {
        source: args.file.display().to_string(),
        destination: destination(out_path.as_deref()),
        tag,
        lines_read: source.lines_read(),
        summary,
    };

    if out_path.is_some() {
        writer.render(&report)?;
    } else {
        writer.render_stderr(&report)?;
    }

    if summary.sink_failures > 0 {
        return Err(CliError::Command(format!(
            "{} document(s) could not be written",
            summary.sink_failures
        )));
    }

    Ok(())
}

/// `--out` wins over the configured file sink.
fn output_path(out: Option<PathBuf>, sink: &SinkConfig) -> Option<PathBuf> {
    out.or_else(|| {
        sink.path
            .as_deref()
            .filter(|_| sink.kind == "file")
            .map(PathBuf::from)
    })
}

fn destination(path: Option<&Path>) -> String {
    path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string())
}

/// Ingest summary report.
#[derive(Debug, Serialize)]
pub struct IngestReport {
    /// Input file path
    pub source: String,
    /// Output file path or `stdout`
    pub destination: String,
    /// Tag added to every document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Raw lines read from the input
    pub lines_read: u64,
    #[serde(flatten)]
    pub summary: BackfillSummary,
}

impl Render for IngestReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Ingest: {} -> {}", self.source, self.destination)?;
        if let Some(tag) = &self.tag {
            writeln!(w, "  Tag:            {}", tag)?;
        }
        writeln!(w, "  Lines read:     {}", self.lines_read)?;
        writeln!(w, "  Events:         {}", self.summary.events)?;
        writeln!(w, "  Documents:      {}", self.summary.documents_written)?;
        writeln!(w, "  Format errors:  {}", self.summary.format_errors)?;
        writeln!(w, "  Sink failures:  {}", self.summary.sink_failures)?;
        Ok(())
    }
}
