//! File and stdout handling for CLI
//!
//! - Scripts are read whole as UTF-8
//! - Reports go to a file next to the input unless `-` selects stdout
//! - `check` answers with a single JSON object on stdout

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Suffix appended to the input file stem for the default report path
pub const OUTPUT_SUFFIX: &str = "_output_file.txt";

/// Read a script file
pub fn read_script(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read script {}: {}", path.display(), e))
    })
}

/// Report path used when `--output` is not given
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "script".to_string());
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Open the report destination
pub fn open_output(input: &Path, output: Option<&Path>) -> CliResult<Box<dyn Write>> {
    let path = match output {
        Some(path) if path == Path::new("-") => return Ok(Box::new(io::stdout().lock())),
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    let file = File::create(&path).map_err(|e| {
        CliError::io_error(format!("Failed to create output {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
