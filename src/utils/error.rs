// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to acquire rule corpus from {location}: {}", .source.message())]
    Acquisition {
        location: String,
        #[source]
        source: git2::Error,
    },

    #[error("Local rule corpus not found: {}", .0.display())]
    MissingCorpus(PathBuf),

    #[error("No rules found under {}", .rules_dir.display())]
    NoRules { rules_dir: PathBuf },

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IndexError {
    /// Process exit code for a run that ended with this error.
    ///
    /// Code 2 is left to clap for usage errors.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Acquisition { .. } | Self::MissingCorpus(_) => 3,
            Self::NoRules { .. } => 4,
            Self::Config(_) | Self::FileSystem(_) | Self::Serialization(_) => 1,
        }
    }

    pub fn invalid_pattern(pattern: &str, err: &globset::Error) -> Self {
        Self::Config(format!("Invalid rule file pattern '{pattern}': {err}"))
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Acquisition { .. } => Some(
                "Check the repository URL and your network connection, or pass --source with a local checkout",
            ),
            Self::MissingCorpus(_) => Some("Pass --source a directory containing the rule corpus"),
            Self::NoRules { .. } => {
                Some("Check --rules-dir and --pattern against the layout of the corpus")
            }
            Self::Config(_) | Self::FileSystem(_) | Self::Serialization(_) => None,
        }
    }
}

/// Render an error for the terminal, with a hint where one helps.
pub fn format_error(error: &IndexError, verbose: bool) -> String {
    let mut out = format!("\n\u{26a0} Error: {error}");

    if let Some(suggestion) = error.suggestion() {
        out.push_str("\nSuggestion: ");
        out.push_str(suggestion);
    }

    if verbose {
        use std::error::Error as _;

        let mut source = error.source();
        while let Some(cause) = source {
            out.push_str("\n\u{2514}\u{2500} ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
    }

    out
}
