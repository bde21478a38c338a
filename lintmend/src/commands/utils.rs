use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read an analyzer report from `path`, or from stdin for `None` / `-`.
pub(crate) fn read_report(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read report {}", p.display())),
        _ => {
            let mut report = String::new();
            std::io::stdin()
                .read_to_string(&mut report)
                .context("failed to read report from stdin")?;
            Ok(report)
        }
    }
}

/// Name the report uses for `file`: the explicit override, or the path as given.
pub(crate) fn report_name(file: &Path, explicit: Option<&str>) -> String {
    explicit.map_or_else(|| file.to_string_lossy().into_owned(), str::to_owned)
}
