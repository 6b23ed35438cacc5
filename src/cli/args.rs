// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Options left unset fall back to config files and `SIGMA_INDEX_*`
/// environment variables (see [`crate::cli::config`]), then to built-in
/// defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "sigma-index")]
#[command(about = "Build a compact, searchable JSON index from a Sigma rule repository")]
#[command(version)]
pub struct Args {
    /// Rule repository to clone [default: SigmaHQ/sigma]
    #[arg(short, long, env = "SIGMA_INDEX_REPO")]
    pub repo: Option<String>,

    /// Index an existing local checkout instead of cloning
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory inside the corpus holding the rules [default: rules]
    #[arg(long)]
    pub rules_dir: Option<PathBuf>,

    /// File-name glob selecting rule files [default: *.yml]
    #[arg(long)]
    pub pattern: Option<String>,

    /// Output file [default: rules.json next to the executable]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Clone depth; 0 fetches full history [default: 1]
    #[arg(long)]
    pub depth: Option<u32>,

    /// Log progress every N files; 0 disables [default: 500]
    #[arg(long)]
    pub progress_every: Option<usize>,

    /// Number of products listed in the summary [default: 10]
    #[arg(long)]
    pub top: Option<usize>,

    /// Config file path
    #[arg(
        short,
        long,
        default_value = "sigma-index.toml",
        env = "SIGMA_INDEX_CONFIG"
    )]
    pub config: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short)]
    pub quiet: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_repo_reads_environment() {
        let command = Args::command();
        let repo = command
            .get_arguments()
            .find(|arg| arg.get_id() == "repo")
            .unwrap();
        assert_eq!(
            repo.get_env(),
            Some(std::ffi::OsStr::new("SIGMA_INDEX_REPO"))
        );
    }

    #[test]
    fn test_unset_options_stay_none() {
        let args = Args::try_parse_from(["sigma-index"]).unwrap();
        assert!(args.repo.is_none());
        assert!(args.output.is_none());
        assert!(args.progress_every.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "sigma-index",
            "--source",
            "/srv/sigma",
            "--rules-dir",
            "rules-threat-hunting",
            "-o",
            "out/index.json",
            "--depth",
            "0",
            "--top",
            "5",
            "-vv",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.source, Some(PathBuf::from("/srv/sigma")));
        assert_eq!(args.rules_dir, Some(PathBuf::from("rules-threat-hunting")));
        assert_eq!(args.output, Some(PathBuf::from("out/index.json")));
        assert_eq!(args.depth, Some(0));
        assert_eq!(args.top, Some(5));
        assert_eq!(args.verbose, 2);
        assert!(args.quiet);
    }
}
