//! Explicit report persistence, invoked by the caller after a report is
//! computed. Report functions themselves stay side-effect free.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Write an already-serialized report to `path`.
pub fn write_report(path: &Path, payload: &str) -> Result<()> {
    fs::write(path, payload).with_context(|| format!("writing report to {}", path.display()))?;
    info!("report written to {}", path.display());
    Ok(())
}
