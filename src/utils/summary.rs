// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Summary display for a completed indexing run.
//!
//! Shows the output file with its size, then the status and level
//! distributions (sorted by name) and the most common products.
//!
//! # Example
//!
//! ```ignore
//! use sigma_index::utils::summary::{RunSummary, display_run_summary};
//!
//! let summary = RunSummary {
//!     stats: &stats,
//!     output: &output_path,
//!     output_bytes: 4_414_504,
//!     top_products: 10,
//!     elapsed,
//! };
//! display_run_summary(&summary, false)?;
//! ```

use crate::index::CorpusStats;
use crate::utils::formatting::{format_duration, format_megabytes, format_number};
use anyhow::Result;
use console::{Term, style};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Everything the end-of-run summary reports.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary<'a> {
    pub stats: &'a CorpusStats,
    pub output: &'a Path,
    pub output_bytes: u64,
    /// How many products to list.
    pub top_products: usize,
    pub elapsed: Duration,
}

/// Print the summary to stdout unless `quiet` is set.
pub fn display_run_summary(summary: &RunSummary<'_>, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();
    write_summary(&mut term, summary)
}

/// Write the summary to any writer.
pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary<'_>) -> Result<()> {
    let stats = summary.stats;

    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        style("\u{2713}").green().bold(),
        style(format!(
            "Success! Extracted {} Sigma rules.",
            format_number(stats.total)
        ))
        .bold()
    )?;

    writeln!(out)?;
    writeln!(out, "{}:", style("Output").bold())?;
    writeln!(
        out,
        "{} {} ({})",
        style("\u{2514}\u{2500}").dim(),
        summary.output.display(),
        format_megabytes(summary.output_bytes)
    )?;

    write_distribution(out, "Status distribution", &stats.by_status)?;
    write_distribution(out, "Level distribution", &stats.by_level)?;

    writeln!(out)?;
    writeln!(
        out,
        "{}:",
        style(format!("Top {} products", summary.top_products)).bold()
    )?;
    for (product, count) in stats.top_products(summary.top_products) {
        writeln!(out, "  {product}: {}", format_number(count))?;
    }

    writeln!(out)?;
    writeln!(out, "Time: {}", format_duration(summary.elapsed))?;

    Ok(())
}

fn write_distribution<W: Write>(
    out: &mut W,
    heading: &str,
    counts: &BTreeMap<String, usize>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}:", style(heading).bold())?;
    for (name, count) in counts {
        writeln!(out, "  {name}: {}", format_number(*count))?;
    }
    Ok(())
}
