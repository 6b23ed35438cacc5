// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! # sigma-index
//!
//! Builds a compact, searchable JSON index from a repository of Sigma
//! detection rules. A run is a straight pipeline:
//!
//! 1. **Init** - Configuration summary
//! 2. **Acquiring** - Clone the rule repository (or use a local checkout)
//! 3. **Scanning** - Find rule files under the rules directory
//! 4. **Normalizing** - Decode each file into a [`RuleRecord`], skipping rejects
//! 5. **Writing** - Sort by title and write `rules.json`
//! 6. **Reporting** - Print status, level and product distributions
//! 7. **Cleanup** - Remove the temporary clone
//! 8. **Complete** - Pipeline completed successfully
//!
//! Everything runs on one thread. The temporary clone is owned by an
//! [`corpus::AcquiredCorpus`] and removed on every exit path, including
//! errors returned from any stage.
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/sigma-index/config.toml)
//! 2. Git root (sigma-index.toml)
//! 3. Current directory (sigma-index.toml)
//! 4. Explicit --config path
//! 5. Environment variables (SIGMA_INDEX_*)
//! 6. CLI flags (highest precedence)

pub mod cli;
pub mod corpus;
pub mod index;
pub mod normalizer;
pub mod utils;

use anyhow::{Context, Result};
use corpus::CorpusSource;
use index::CorpusStats;
use index::record::RuleRecord;
use normalizer::Normalizer;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use utils::error::IndexError;
use utils::progress::ScanProgress;
use utils::summary::{RunSummary, display_run_summary};

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    /// Where the rule corpus comes from
    pub source: CorpusSource,
    /// Rules directory, relative to the corpus root
    pub rules_dir: PathBuf,
    /// File-name glob selecting rule files
    pub pattern: String,
    /// Index file to write
    pub output: PathBuf,
    /// Files between progress lines (0 disables)
    pub progress_every: usize,
    /// Products listed in the summary
    pub top_products: usize,
    /// Verbosity level (0-2)
    pub verbose: u8,
    /// Quiet mode (suppress all non-error output)
    pub quiet: bool,
}

/// Tracks the current stage of pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Acquiring,
    Scanning,
    Normalizing,
    Writing,
    Reporting,
    Cleanup,
    Complete,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rule files found under the rules directory
    pub files_scanned: usize,
    /// Files that did not yield a record
    pub rejected: usize,
    pub output: PathBuf,
    pub output_bytes: u64,
    pub stats: CorpusStats,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` and `-q`.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error from a second initialization (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

fn enter(stage: &mut PipelineStage, next: PipelineStage) {
    *stage = next;
    tracing::debug!("Pipeline stage: {:?}", next);
}

/// Run the whole pipeline once.
///
/// A failure carries the stage it happened in as context; the underlying
/// [`IndexError`] stays reachable through `downcast_ref`.
pub fn run(config: &MergedConfig) -> Result<RunReport> {
    let mut stage = PipelineStage::Init;
    let result = run_stages(config, &mut stage);
    result.with_context(|| format!("Pipeline failed during the {stage:?} stage"))
}

fn run_stages(config: &MergedConfig, stage: &mut PipelineStage) -> Result<RunReport> {
    let started = Instant::now();

    tracing::info!("sigma-index v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: source={}, rules_dir={}, pattern={}, output={}",
        config.source.location(),
        config.rules_dir.display(),
        config.pattern,
        config.output.display()
    );

    enter(stage, PipelineStage::Acquiring);
    let corpus = corpus::acquire(&config.source)?;

    enter(stage, PipelineStage::Scanning);
    let files = corpus::discover_rules(corpus.root(), &config.rules_dir, &config.pattern)?;
    tracing::info!("Found {} YAML files to process...", files.len());

    enter(stage, PipelineStage::Normalizing);
    let records = normalize_all(&files, config);
    let rejected = files.len().saturating_sub(records.len());
    if rejected > 0 {
        tracing::info!("Skipped {} files without a usable rule", rejected);
    }

    if records.is_empty() {
        return Err(IndexError::NoRules {
            rules_dir: corpus.root().join(&config.rules_dir),
        }
        .into());
    }

    enter(stage, PipelineStage::Writing);
    let records = index::collect(records);
    tracing::info!(
        "Writing {} rules to {}...",
        records.len(),
        config.output.display()
    );
    let output_bytes = index::write_index(&records, &config.output)?;

    enter(stage, PipelineStage::Reporting);
    let stats = index::summarize(&records);
    display_run_summary(
        &RunSummary {
            stats: &stats,
            output: &config.output,
            output_bytes,
            top_products: config.top_products,
            elapsed: started.elapsed(),
        },
        config.quiet,
    )
    .context("Failed to display summary")?;

    enter(stage, PipelineStage::Cleanup);
    let temporary = corpus.is_temporary();
    corpus
        .close()
        .context("Failed to remove temporary corpus clone")?;
    if temporary {
        tracing::debug!("Removed temporary corpus clone");
    }

    enter(stage, PipelineStage::Complete);
    tracing::debug!("Pipeline completed in {:?}", started.elapsed());

    Ok(RunReport {
        files_scanned: files.len(),
        rejected,
        output: config.output.clone(),
        output_bytes,
        stats,
    })
}

/// Normalize every file in discovery order, keeping accepted records.
fn normalize_all(files: &[PathBuf], config: &MergedConfig) -> Vec<RuleRecord> {
    let normalizer = Normalizer::new();
    let progress = ScanProgress::new(files.len(), config.progress_every, config.quiet);

    let mut records = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        if let Some(record) = normalizer.normalize_file(path) {
            records.push(record);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        progress.advance(i + 1, &name);
    }
    progress.finish();

    records
}
