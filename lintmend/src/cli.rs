use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.lintmend.toml):
  Create this file in your project root to set defaults.
  The same keys are read from [tool.lintmend] in pyproject.toml.

  [lintmend]
  output_suffix = \"_new\"      # Inserted before the extension of the output file
  source_extension = \"py\"     # Extension of target and module files
  module_root = \".\"           # Where `from pkg.mod import *` is looked up
  strict_boundaries = false   # Also require a boundary after rewritten names

REPORT FORMAT:
  One finding per line: <file>:<line>:<col>: <message> (<category>)
  e.g. pylint's default text output. Other lines are ignored.
";

/// Where the analyzer report comes from.
#[derive(Args, Debug, Default, Clone)]
pub struct ReportArgs {
    /// Analyzer report file. Reads stdin when omitted or "-".
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// File name as it appears in the report (defaults to FILE as given).
    #[arg(long)]
    pub report_name: Option<String>,
}

/// Options controlling where the fixed source goes.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Write the fixed source to this path.
    #[arg(short, long, conflicts_with_all = ["in_place", "dry_run"])]
    pub output: Option<PathBuf>,

    /// Overwrite the input file.
    #[arg(long, conflicts_with = "dry_run")]
    pub in_place: bool,

    /// Print the fixed source instead of writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Options for wildcard-import resolution.
#[derive(Args, Debug, Default, Clone)]
pub struct ResolveArgs {
    /// Directory that wildcard-imported modules are resolved against.
    #[arg(long)]
    pub module_root: Option<PathBuf>,

    /// Only rewrite usages with an identifier boundary on both sides.
    #[arg(long)]
    pub strict_boundaries: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lintmend - apply mechanical fixes to Python sources from analyzer reports",
    long_about = None,
    after_help = CONFIG_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    /// Optional subcommand; without one the FILE is fixed.
    pub command: Option<Commands>,

    /// Python file to fix.
    pub file: Option<PathBuf>,

    /// Report source.
    #[command(flatten)]
    pub report: ReportArgs,

    /// Output destination.
    #[command(flatten)]
    pub output: OutputArgs,

    /// Resolver options.
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Print a JSON summary instead of colored text.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
/// Inspection subcommands.
pub enum Commands {
    /// List the diagnostics parsed from a report
    Diagnostics {
        /// File the report refers to.
        file: PathBuf,

        /// Report source.
        #[command(flatten)]
        report: ReportArgs,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the symbols a wildcard import of MODULE would bring in
    Symbols {
        /// Dotted module path, e.g. `pkg.errors`.
        module: String,

        /// Directory the module is resolved against.
        #[arg(long)]
        module_root: Option<PathBuf>,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
}
