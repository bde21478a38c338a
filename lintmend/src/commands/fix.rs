//! Fix command: apply a report's diagnostics to one file.

use crate::buffer::SourceBuffer;
use crate::constants::{DEFAULT_MODULE_ROOT, DEFAULT_OUTPUT_SUFFIX, DEFAULT_SOURCE_EXTENSION};
use crate::diagnostics::parse_report;
use crate::fix::{
    BoundaryMode, FileSymbolLookup, FixAction, FixDispatcher, FixOutcome, WildcardResolver,
};
use crate::output::{print_advisories, print_fix_summary};
use crate::utils::normalize_display_path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the fix command
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// File name as it appears in the report
    pub report_name: String,
    /// Explicit output path
    pub output: Option<PathBuf>,
    /// Overwrite the input file
    pub in_place: bool,
    /// Print instead of writing
    pub dry_run: bool,
    /// JSON output
    pub json: bool,
    /// Root for wildcard-imported modules
    pub module_root: PathBuf,
    /// Source file extension
    pub source_extension: String,
    /// Suffix for the default output path
    pub output_suffix: String,
    /// Usage boundary checks
    pub boundary: BoundaryMode,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            report_name: String::new(),
            output: None,
            in_place: false,
            dry_run: false,
            json: false,
            module_root: PathBuf::from(DEFAULT_MODULE_ROOT),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_owned(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_owned(),
            boundary: BoundaryMode::default(),
        }
    }
}

/// Summary of a fix run
#[derive(Debug, Serialize)]
pub struct FixReport {
    /// File that was fixed
    pub file: String,
    /// Where the fixed source was written (`None` in dry-run mode)
    pub output: Option<String>,
    /// Diagnostics that changed the file
    pub applied: usize,
    /// Diagnostics resolved as a side effect of another fix
    pub skipped: usize,
    /// Diagnostics without an automatic fix
    pub advisories: usize,
    /// Per-diagnostic outcomes, in report order
    pub outcomes: Vec<FixOutcome>,
    /// Fixed source, only in dry-run mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_source: Option<String>,
}

impl FixReport {
    fn new(file: &Path, outcomes: Vec<FixOutcome>) -> Self {
        let count = |pred: fn(&FixAction) -> bool| outcomes.iter().filter(|o| pred(&o.action)).count();
        Self {
            file: normalize_display_path(file),
            output: None,
            applied: count(FixAction::is_applied),
            skipped: count(|a| matches!(a, FixAction::Skipped)),
            advisories: count(|a| matches!(a, FixAction::Advisory)),
            outcomes,
            fixed_source: None,
        }
    }
}

/// Fix `file` using the diagnostics in `report`.
///
/// The file is written exactly once, after every diagnostic has been
/// processed. A failing wildcard-import resolution aborts the run before
/// anything is written.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, a diagnostic
/// points outside the file, or a wildcard import cannot be resolved.
pub fn run_fix<W: Write>(
    file: &Path,
    report: &str,
    options: &FixOptions,
    mut writer: W,
) -> Result<FixReport> {
    let buffer = SourceBuffer::load(file)?;
    let diagnostics = parse_report(report, &options.report_name);

    let lookup =
        FileSymbolLookup::new(&options.module_root).with_extension(&options.source_extension);
    let resolver = WildcardResolver::new(lookup).with_boundary(options.boundary);
    let mut dispatcher = FixDispatcher::new(buffer, resolver);

    let outcomes = dispatcher
        .apply_all(&diagnostics)
        .with_context(|| format!("failed to fix {}", normalize_display_path(file)))?;
    let mut report = FixReport::new(file, outcomes);

    if options.dry_run {
        report.fixed_source = Some(dispatcher.buffer().contents());
    } else {
        let target = if options.in_place {
            Some(file)
        } else {
            options.output.as_deref()
        };
        let written = dispatcher.persist(target, &options.output_suffix)?;
        report.output = Some(normalize_display_path(&written));
    }

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(report);
    }

    if options.dry_run {
        writeln!(
            writer,
            "{}",
            format!("[DRY-RUN] Fixed source for {}:", report.file).yellow()
        )?;
        if let Some(source) = &report.fixed_source {
            write!(writer, "{source}")?;
        }
    }
    print_advisories(&mut writer, &report.outcomes)?;
    print_fix_summary(&mut writer, &report)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &Path, name: &str) -> FixOptions {
        FixOptions {
            report_name: name.to_owned(),
            module_root: dir.to_path_buf(),
            ..FixOptions::default()
        }
    }

    #[test]
    fn test_run_fix_writes_default_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sample.py");
        fs::write(&file, "x = 1   \ny = 2").unwrap();
        let report = "\
sample.py:1:5: C0303: Trailing whitespace (trailing-whitespace)
sample.py:2:0: C0304: Final newline missing (missing-final-newline)
";

        let mut buffer = Vec::new();
        let result = run_fix(&file, report, &options(dir.path(), "sample.py"), &mut buffer).unwrap();

        assert_eq!(result.applied, 2);
        let fixed = fs::read_to_string(dir.path().join("sample_new.py")).unwrap();
        assert_eq!(fixed, "x = 1\ny = 2\n");
        // The input is untouched.
        assert_eq!(fs::read_to_string(&file).unwrap(), "x = 1   \ny = 2");
        assert!(String::from_utf8(buffer).unwrap().contains("Fixed:"));
    }

    #[test]
    fn test_run_fix_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1  \n").unwrap();
        let opts = FixOptions {
            dry_run: true,
            ..options(dir.path(), "a.py")
        };

        let mut buffer = Vec::new();
        let result = run_fix(&file, "a.py:1:5: C0303: x (trailing-whitespace)", &opts, &mut buffer)
            .unwrap();

        assert!(result.output.is_none());
        assert_eq!(result.fixed_source.as_deref(), Some("x = 1\n"));
        assert!(!dir.path().join("a_new.py").exists());
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.contains("[DRY-RUN]"));
    }

    #[test]
    fn test_run_fix_in_place() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1").unwrap();
        let opts = FixOptions {
            in_place: true,
            ..options(dir.path(), "a.py")
        };

        run_fix(&file, "a.py:1:0: C0304: x (missing-final-newline)", &opts, Vec::new()).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_run_fix_resolver_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "from missing import *\nx = 1  \n").unwrap();
        let report = "\
a.py:2:5: C0303: Trailing whitespace (trailing-whitespace)
a.py:1:0: W0401: Wildcard import missing (wildcard-import)
";

        let err = run_fix(&file, report, &options(dir.path(), "a.py"), Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
        assert!(!dir.path().join("a_new.py").exists());
    }

    #[test]
    fn test_run_fix_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "import os\n").unwrap();
        let opts = FixOptions {
            json: true,
            ..options(dir.path(), "a.py")
        };

        let mut buffer = Vec::new();
        run_fix(&file, "a.py:1:0: W0611: Unused import os (unused-import)", &opts, &mut buffer)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["advisories"], 1);
        assert_eq!(value["outcomes"][0]["category"], "unused-import");
        assert_eq!(value["outcomes"][0]["action"], "advisory");
    }
}
