// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags** - Highest precedence (only when given on the command line)
//! 2. **Environment variables** - `SIGMA_INDEX_<SECTION>__<KEY>`, e.g.
//!    `SIGMA_INDEX_SOURCE__RULES_DIR=rules-emerging-threats`
//! 3. **Config files** - Lowest precedence
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/sigma-index/config.toml` (user config directory)
//! 2. `sigma-index.toml` in the enclosing git repository root
//! 3. `./sigma-index.toml` in the current directory
//! 4. Explicit `--config` path (if provided and exists)
//!
//! ## Example file
//! ```toml
//! [source]
//! repo = "https://github.com/SigmaHQ/sigma.git"
//! depth = 1
//! rules_dir = "rules"
//! pattern = "*.yml"
//!
//! [output]
//! path = "public/rules.json"
//!
//! [report]
//! progress_every = 500
//! top_products = 10
//! ```

use crate::MergedConfig;
use crate::cli::args::Args;
use crate::corpus::{CorpusSource, DEFAULT_REPO_URL};
use crate::index::OUTPUT_FILE;
use crate::utils::progress::DEFAULT_PROGRESS_INTERVAL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "sigma-index.toml";
const ENV_PREFIX: &str = "SIGMA_INDEX";

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the rule corpus comes from and which files in it are rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Local checkout to use instead of cloning `repo`.
    pub local: Option<PathBuf>,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            local: None,
            depth: default_depth(),
            rules_dir: default_rules_dir(),
            pattern: default_pattern(),
        }
    }
}

fn default_repo() -> String {
    DEFAULT_REPO_URL.to_string()
}

const fn default_depth() -> u32 {
    1
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rules")
}

fn default_pattern() -> String {
    "*.yml".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
}

/// Console reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            progress_every: default_progress_every(),
            top_products: default_top_products(),
        }
    }
}

const fn default_progress_every() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

const fn default_top_products() -> usize {
    10
}

fn discover_config_paths(explicit_path: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // User config (lowest precedence)
    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    // Git root config
    if let Some(git_root) = find_git_root() {
        let git_config = git_root.join(CONFIG_FILE);
        if git_config.exists() {
            paths.push(git_config);
        }
    }

    // Current directory config
    let current_dir_config = PathBuf::from(CONFIG_FILE);
    if current_dir_config.exists() && !paths.contains(&current_dir_config) {
        paths.push(current_dir_config);
    }

    // Explicit --config path (highest precedence)
    if explicit_path != Path::new(CONFIG_FILE) && explicit_path.exists() {
        paths.push(explicit_path.to_path_buf());
    }

    paths
}

fn find_git_root() -> Option<PathBuf> {
    git2::Repository::discover(".")
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("sigma-index").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from discovered config files and environment variables.
pub fn load(args: &Args) -> Result<Config> {
    load_from(&discover_config_paths(&args.config))
}

fn load_from(paths: &[PathBuf]) -> Result<Config> {
    let mut builder = config::Config::builder();

    for config_path in paths {
        builder = builder.add_source(config::File::from(config_path.as_path()));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let settings = builder.build().context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Default output location: `rules.json` beside the running executable.
fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(OUTPUT_FILE)))
        .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE))
}

/// Merge CLI arguments over the loaded configuration.
///
/// A local source, from either layer, takes precedence over cloning.
pub fn merge_config(args: &Args, config: Config) -> MergedConfig {
    let Config {
        source,
        output,
        report,
    } = config;

    let corpus = match args.source.clone().or(source.local) {
        Some(path) => CorpusSource::Local(path),
        None => CorpusSource::Remote {
            url: args.repo.clone().unwrap_or(source.repo),
            depth: args.depth.unwrap_or(source.depth),
        },
    };

    MergedConfig {
        source: corpus,
        rules_dir: args.rules_dir.clone().unwrap_or(source.rules_dir),
        pattern: args.pattern.clone().unwrap_or(source.pattern),
        output: args
            .output
            .clone()
            .or(output.path)
            .unwrap_or_else(default_output_path),
        progress_every: args.progress_every.unwrap_or(report.progress_every),
        top_products: args.top.unwrap_or(report.top_products),
        verbose: args.verbose,
        quiet: args.quiet,
    }
}
