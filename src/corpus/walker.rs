// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use crate::utils::error::IndexError;
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Finds rule files below a rules directory by file-name glob.
#[derive(Debug, Clone)]
pub struct RuleWalker {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl RuleWalker {
    pub fn new<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Self, IndexError> {
        let matcher = Glob::new(pattern)
            .map_err(|e| IndexError::invalid_pattern(pattern, &e))?
            .compile_matcher();

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            matcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` names a rule file.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }

    /// All matching files, in path order.
    ///
    /// A missing root yields no files. Entries that cannot be read are
    /// logged and skipped.
    pub fn walk(&self) -> Vec<PathBuf> {
        if !self.root.is_dir() {
            tracing::warn!("Rules directory not found: {}", self.root.display());
            return Vec::new();
        }

        // Hidden files and ignore files are not filtered.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                        continue;
                    }
                    if self.matches(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error walking directory: {}", e);
                }
            }
        }

        tracing::debug!(
            "Found {} rule files under {}",
            files.len(),
            self.root.display()
        );
        files
    }
}

/// Rule files under `corpus_root/rules_dir` matching `pattern`.
pub fn discover_rules(
    corpus_root: &Path,
    rules_dir: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>, IndexError> {
    Ok(RuleWalker::new(corpus_root.join(rules_dir), pattern)?.walk())
}
