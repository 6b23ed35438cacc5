// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use sigma_index::utils::error::{IndexError, format_error};
use sigma_index::{cli, init_logging, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Determine verbose mode early for error formatting, before config is merged
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg.starts_with("-v"));

    match run_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display_error(&e, verbose);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code for a failed run, taken from the first [`IndexError`] in the chain.
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<IndexError>())
        .map_or(1, IndexError::exit_code)
}

/// Display an error with contextual formatting.
///
/// Tries to downcast to `IndexError` for rich formatting, falls back to
/// anyhow's error chain display for other errors.
fn display_error(error: &anyhow::Error, verbose: bool) {
    if let Some(index_error) = error.downcast_ref::<IndexError>() {
        eprintln!("{}", format_error(index_error, verbose));
        if verbose && error.to_string() != index_error.to_string() {
            eprintln!("({error})");
        }
    } else {
        eprintln!("\n\u{26a0} Error: {}", error);

        let causes: Vec<_> = error.chain().skip(1).collect();
        if !causes.is_empty() {
            eprintln!("\nCaused by:");
            for (i, cause) in causes.iter().enumerate() {
                let prefix = if i == causes.len() - 1 {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251c}\u{2500}"
                };
                eprintln!("{} {}", prefix, cause);
            }
        }

        if verbose {
            let backtrace = error.backtrace();
            if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
                eprintln!("\nBacktrace:\n{}", backtrace);
            }
        }
    }
}

fn run_main() -> Result<()> {
    let args = cli::args::parse();

    // Config files + env vars, then CLI flags on top
    let config = cli::config::load(&args)?;
    let merged_config = cli::config::merge_config(&args, config);

    init_logging(merged_config.verbose, merged_config.quiet);

    let report = run(&merged_config)?;
    tracing::debug!(
        "Indexed {} of {} files into {} ({} bytes)",
        report.stats.total,
        report.files_scanned,
        report.output.display(),
        report.output_bytes
    );

    Ok(())
}
