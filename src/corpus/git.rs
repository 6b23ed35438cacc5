// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use crate::utils::error::IndexError;
use git2::build::RepoBuilder;
use git2::{FetchOptions, Repository};
use std::path::Path;

/// Clone `url` into `dest`.
///
/// A `depth` of zero fetches full history; anything else makes a shallow
/// clone of that many commits.
pub fn clone_repo(url: &str, dest: &Path, depth: u32) -> Result<Repository, IndexError> {
    let mut fetch = FetchOptions::new();
    if depth > 0 {
        fetch.depth(i32::try_from(depth).unwrap_or(i32::MAX));
    }

    RepoBuilder::new()
        .fetch_options(fetch)
        .clone(url, dest)
        .map_err(|source| IndexError::Acquisition {
            location: url.to_string(),
            source,
        })
}

pub fn is_git_repo<P: AsRef<Path>>(path: P) -> bool {
    Repository::open(path).is_ok()
}
