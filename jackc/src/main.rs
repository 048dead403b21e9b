//! jackc — command-line front end for the Jack-to-VM compiler (spec §6).
//!
//! Exactly one positional argument, no flags, no environment variables, no
//! configuration files (spec §6 is explicit about this external-interface
//! surface, unlike `faxt`'s multi-subcommand CLI). Everything past
//! argument parsing and logging setup is `jackvm_drv::compile_path`'s job.

use clap::Parser;
use jackvm_drv::DriverError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compiles a Jack source file, or every `.jack` file in a directory, to
/// VM code.
#[derive(Parser, Debug)]
#[command(name = "jackc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compile Jack source to VM code", long_about = None)]
struct Args {
    /// A `.jack` file, or a directory of `.jack` files.
    path: PathBuf,
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    let report = match jackvm_drv::compile_path(&args.path) {
        Ok(report) => report,
        Err(DriverError::NotCompilable { path }) => {
            eprintln!("error: {} is neither a .jack file nor a directory", path.display());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (path, error) in &report.failed {
        eprintln!("error: {}: {error}", path.display());
    }
    println!(
        "compiled {} file(s), {} failed",
        report.compiled.len(),
        report.failed.len()
    );

    if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
