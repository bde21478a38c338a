use crate::commands::FixReport;
use crate::diagnostics::Diagnostic;
use crate::fix::{ExportedSymbol, FixAction, FixOutcome};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::Write;

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print one advisory line per diagnostic that has no automatic fix.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_advisories(writer: &mut impl Write, outcomes: &[FixOutcome]) -> std::io::Result<()> {
    for outcome in outcomes
        .iter()
        .filter(|o| matches!(o.action, FixAction::Advisory))
    {
        writeln!(
            writer,
            "  {} {} at line {} (no automatic fix)",
            "Advisory:".yellow(),
            outcome.diagnostic.category,
            outcome.diagnostic.line + 1
        )?;
    }
    Ok(())
}

/// Print the result line of a fix run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fix_summary(writer: &mut impl Write, report: &FixReport) -> std::io::Result<()> {
    let destination = match &report.output {
        Some(output) => format!("{} -> {}", report.file, output),
        None => report.file.clone(),
    };
    let advisories = if report.advisories == 0 {
        report.advisories.to_string().green()
    } else {
        report.advisories.to_string().yellow().bold()
    };
    writeln!(
        writer,
        "  {} {}  Applied: {}  Skipped: {}  Advisories: {}",
        "Fixed:".green(),
        destination,
        report.applied.to_string().green(),
        report.skipped.to_string().dimmed(),
        advisories,
    )?;
    Ok(())
}

/// Print parsed diagnostics as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_diagnostics(
    writer: &mut impl Write,
    file: &str,
    diagnostics: &[Diagnostic],
) -> std::io::Result<()> {
    if diagnostics.is_empty() {
        writeln!(writer, "No diagnostics for {file} in report.")?;
        return Ok(());
    }

    writeln!(writer, "\n{}", format!("Diagnostics for {file}").bold().underline())?;

    let mut table = create_table(vec!["Line", "Column", "Category", "Fix"]);
    for d in diagnostics {
        let (fix, color) = if d.category.is_supported() {
            ("auto", Color::Green)
        } else {
            ("advisory", Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(d.line + 1),
            Cell::new(d.column).add_attribute(Attribute::Dim),
            Cell::new(d.category.as_str()).add_attribute(Attribute::Bold),
            Cell::new(fix).fg(color),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print a module's exported symbols as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_symbols(
    writer: &mut impl Write,
    module: &str,
    symbols: &[ExportedSymbol],
) -> std::io::Result<()> {
    if symbols.is_empty() {
        writeln!(writer, "Module {module} exports no classes or functions.")?;
        return Ok(());
    }

    writeln!(writer, "\n{}", format!("Symbols exported by {module}").bold().underline())?;

    let mut table = create_table(vec!["Kind", "Name", "Qualified"]);
    for s in symbols {
        table.add_row(vec![
            Cell::new(s.kind).add_attribute(Attribute::Dim),
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{module}.{}", s.name)),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}
