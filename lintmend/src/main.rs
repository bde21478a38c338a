//! Main binary entry point for the lintmend remediation tool.
//!
//! This binary delegates to the shared `entry_point::run_with_args()` function
//! so that it behaves exactly like `lintmend-cli`.

use anyhow::Result;

fn main() -> Result<()> {
    let code = lintmend::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
