use crate::cli::{Cli, Commands};
use crate::commands::{read_report, report_name, run_diagnostics, run_fix, run_symbols, FixOptions};
use crate::config::Config;
use crate::fix::BoundaryMode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only errors are logged, or everything
/// from this crate with `--verbose`. Installing twice is a no-op.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "lintmend=debug" } else { "error" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run lintmend with the given arguments, writing output to stdout.
///
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run lintmend with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// Failures of the requested operation are reported on stderr and turned into
/// exit code 1.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["lintmend".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    init_tracing(cli_var.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli_var.command, "starting");

    match cli_var.command {
        Some(Commands::Diagnostics { file, report, json }) => {
            let name = report_name(&file, report.report_name.as_deref());
            let outcome = read_report(report.report.as_deref())
                .and_then(|text| run_diagnostics(&text, &name, json, &mut *writer));
            Ok(report_failure(outcome))
        }
        Some(Commands::Symbols {
            module,
            module_root,
            json,
        }) => {
            let config = Config::load();
            let root = module_root.unwrap_or_else(|| config.module_root());
            let outcome = run_symbols(
                &module,
                &root,
                config.lintmend.source_extension(),
                json,
                &mut *writer,
            );
            Ok(report_failure(outcome))
        }
        None => {
            let Some(file) = cli_var.file else {
                eprintln!(
                    "{} no input file given. Run with --help for usage.",
                    "Error:".red().bold()
                );
                return Ok(1);
            };
            if !file.is_file() {
                eprintln!(
                    "{} The file '{}' does not exist.",
                    "Error:".red().bold(),
                    file.display()
                );
                return Ok(1);
            }

            let config = Config::load_from_path(&file);
            if let Some(path) = &config.config_file_path {
                debug!(path = %path.display(), "using configuration file");
            }

            let strict = cli_var.resolve.strict_boundaries
                || config.lintmend.strict_boundaries.unwrap_or(false);
            let options = FixOptions {
                report_name: report_name(&file, cli_var.report.report_name.as_deref()),
                output: cli_var.output.output,
                in_place: cli_var.output.in_place,
                dry_run: cli_var.output.dry_run,
                json: cli_var.json,
                module_root: cli_var
                    .resolve
                    .module_root
                    .unwrap_or_else(|| config.module_root()),
                source_extension: config.lintmend.source_extension().to_owned(),
                output_suffix: config.lintmend.output_suffix().to_owned(),
                boundary: if strict {
                    BoundaryMode::Both
                } else {
                    BoundaryMode::LeftOnly
                },
            };

            let outcome = read_report(cli_var.report.report.as_deref())
                .and_then(|text| run_fix(&file, &text, &options, &mut *writer));
            Ok(report_failure(outcome))
        }
    }
}

/// Print a failed command's error chain and map the outcome to an exit code.
fn report_failure<T>(outcome: Result<T>) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            1
        }
    }
}
