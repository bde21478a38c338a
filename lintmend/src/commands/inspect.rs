//! Read-only commands: list parsed diagnostics or a module's exported symbols.

use crate::diagnostics::parse_report;
use crate::fix::{FileSymbolLookup, SymbolLookup};
use crate::output::{print_diagnostics, print_symbols};

use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Print the diagnostics `report` holds for `report_name`.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_diagnostics<W: Write>(
    report: &str,
    report_name: &str,
    json: bool,
    mut writer: W,
) -> Result<usize> {
    let diagnostics = parse_report(report, report_name);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&diagnostics)?)?;
    } else {
        print_diagnostics(&mut writer, report_name, &diagnostics)?;
    }
    Ok(diagnostics.len())
}

/// Print the symbols a wildcard import of `module` would bring into scope.
///
/// # Errors
///
/// Returns an error if the module cannot be found or read, or writing fails.
pub fn run_symbols<W: Write>(
    module: &str,
    module_root: &Path,
    source_extension: &str,
    json: bool,
    mut writer: W,
) -> Result<usize> {
    let lookup = FileSymbolLookup::new(module_root).with_extension(source_extension);
    let symbols = lookup.exported_symbols(module)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&symbols)?)?;
    } else {
        print_symbols(&mut writer, module, &symbols)?;
    }
    Ok(symbols.len())
}
