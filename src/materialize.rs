//! Materializer: turn one template into one destination file.
//!
//! Both operations run the Write Policy first and do nothing else on
//! `Skip`; in particular the template is not read. Destination parent
//! directories must already exist. They are created by the setup driver and
//! not checked here; a missing parent fails the write with a
//! `FilesystemError`.

use crate::error::{AutoserverError, Result};
use crate::fs::{atomic_write, atomic_write_file};
use crate::policy::{WriteDecision, decide};
use crate::symbols::SymbolTable;
use crate::template::render_template;
use std::fs;
use std::path::Path;

/// Render a parameterized template into `destination`.
///
/// # Errors
///
/// * `ConfigurationError` - template missing/unreadable, or a placeholder
///   could not be resolved (the destination is left untouched)
/// * `FilesystemError` - the destination could not be written
pub fn render(
    template_source: &Path,
    destination: &Path,
    symbols: &SymbolTable,
    overwrite: bool,
) -> Result<WriteDecision> {
    let decision = decide(destination, overwrite);
    if !decision.proceeds() {
        return Ok(decision);
    }

    let template = read_template(template_source)?;
    let output = render_template(&template, symbols).map_err(|e| {
        AutoserverError::ConfigurationError(format!(
            "template '{}': {}",
            template_source.display(),
            e
        ))
    })?;

    atomic_write_file(destination, &output)?;
    tracing::debug!(
        template = %template_source.display(),
        destination = %destination.display(),
        bytes = output.len(),
        "rendered template"
    );

    Ok(decision)
}

/// Copy a static template byte-for-byte into `destination`.
///
/// # Errors
///
/// * `ConfigurationError` - template missing or unreadable
/// * `FilesystemError` - the destination could not be written
pub fn copy(template_source: &Path, destination: &Path, overwrite: bool) -> Result<WriteDecision> {
    let decision = decide(destination, overwrite);
    if !decision.proceeds() {
        return Ok(decision);
    }

    let content = fs::read(template_source).map_err(|e| missing_template(template_source, e))?;
    atomic_write(destination, &content)?;
    tracing::debug!(
        template = %template_source.display(),
        destination = %destination.display(),
        bytes = content.len(),
        "copied template"
    );

    Ok(decision)
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| missing_template(path, e))
}

fn missing_template(path: &Path, err: std::io::Error) -> AutoserverError {
    AutoserverError::ConfigurationError(format!(
        "cannot read template '{}': {}",
        path.display(),
        err
    ))
}
