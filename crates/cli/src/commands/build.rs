//! `amalgam build` — Assemble the single-file distribution.

use super::{ConfigSource, build_assembler};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn run(
    source: &ConfigSource,
    output: Option<PathBuf>,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let assembler = build_assembler(&config)?;

    // Nothing is written unless the whole document assembled.
    let assembly = assembler.assemble(&config.entries)?;

    match output.or(config.output) {
        Some(path) => {
            write_output(&path, &assembly.document)?;
            tracing::info!(
                path = %path.display(),
                bytes = assembly.report.output_bytes,
                "Wrote amalgamation"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(assembly.document.as_bytes())?;
            stdout.flush()?;
        }
    }

    if report {
        eprintln!("{}", serde_json::to_string_pretty(&assembly.report)?);
    }

    Ok(())
}

fn write_output(path: &Path, document: &str) -> amalgam_core::Result<()> {
    let to_error = |e: std::io::Error| amalgam_core::Error::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }

    std::fs::write(path, document).map_err(to_error)
}
