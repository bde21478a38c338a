//! Commands module - CLI subcommand implementations.

mod fix;
mod inspect;
mod utils;

pub use fix::{run_fix, FixOptions, FixReport};
pub use inspect::{run_diagnostics, run_symbols};
pub(crate) use utils::{read_report, report_name};
