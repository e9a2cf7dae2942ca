use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub const RUN_STARTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Full report text: two header lines, then each side's block followed by a
/// blank line.
pub fn render_report(
    started_at: DateTime<Local>,
    root_a: &Path,
    root_b: &Path,
    block_a: &str,
    block_b: &str,
) -> String {
    format!(
        "# Results for {}\n# Reconciled '{}' '{}'\n{}\n{}\n",
        started_at.format(RUN_STARTED_FORMAT),
        root_a.display(),
        root_b.display(),
        block_a,
        block_b,
    )
}

/// Replace the file at `path` with `contents`.
///
/// The text goes to a temporary file next to the target which is then renamed
/// over it, so readers see either the previous report or the complete new one.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let to_error = |source| Error::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(to_error)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(to_error)?;
    temp.write_all(contents.as_bytes()).map_err(to_error)?;
    temp.as_file().sync_all().map_err(to_error)?;
    temp.persist(path).map_err(|err| to_error(err.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
