//! Command handlers -- one module per subcommand

pub mod check;
pub mod config;
pub mod ingest;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::CliError;

/// Open a log file for reading, keeping the path in the error message.
fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    Ok(BufReader::new(file))
}
