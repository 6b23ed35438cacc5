// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Acquisition of the rule corpus and discovery of rule files within it.

pub mod git;
pub mod walker;

use crate::utils::error::IndexError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use walker::{RuleWalker, discover_rules};

/// Default corpus: the upstream Sigma rule repository.
pub const DEFAULT_REPO_URL: &str = "https://github.com/SigmaHQ/sigma.git";

/// Where the rule corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// Clone a git repository into a temporary directory.
    Remote { url: String, depth: u32 },
    /// Use an existing directory as-is.
    Local(PathBuf),
}

impl CorpusSource {
    pub fn location(&self) -> String {
        match self {
            Self::Remote { url, .. } => url.clone(),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

/// A corpus available on the local filesystem.
///
/// Cloned corpora live in a temporary directory that is deleted when this
/// value is dropped, whichever way the run ends.
#[derive(Debug)]
pub struct AcquiredCorpus {
    root: PathBuf,
    workspace: Option<TempDir>,
}

impl AcquiredCorpus {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the corpus sits in a temporary clone.
    pub const fn is_temporary(&self) -> bool {
        self.workspace.is_some()
    }

    /// Delete the temporary clone now, reporting any failure.
    pub fn close(self) -> std::io::Result<()> {
        match self.workspace {
            Some(workspace) => workspace.close(),
            None => Ok(()),
        }
    }
}

/// Make the corpus available locally. Any failure here ends the run.
pub fn acquire(source: &CorpusSource) -> Result<AcquiredCorpus, IndexError> {
    match source {
        CorpusSource::Remote { url, depth } => {
            let workspace = tempfile::Builder::new().prefix("sigma-index-").tempdir()?;
            let root = workspace.path().join("corpus");

            tracing::info!("Cloning {url}...");
            git::clone_repo(url, &root, *depth)?;

            Ok(AcquiredCorpus {
                root,
                workspace: Some(workspace),
            })
        }
        CorpusSource::Local(path) => {
            if !path.is_dir() {
                return Err(IndexError::MissingCorpus(path.clone()));
            }
            if !git::is_git_repo(path) {
                tracing::debug!("{} is not a git checkout", path.display());
            }

            Ok(AcquiredCorpus {
                root: path.clone(),
                workspace: None,
            })
        }
    }
}
