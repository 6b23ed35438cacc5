// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Index assembly: ordering, serialization and writing of `rules.json`.

pub mod record;
pub mod stats;

use crate::utils::error::IndexError;
use record::RuleRecord;
use std::path::Path;

pub use stats::{CorpusStats, summarize};

/// Default name of the index file.
pub const OUTPUT_FILE: &str = "rules.json";

/// Order records by title, ignoring case.
///
/// The sort is stable: records with equal titles keep discovery order.
pub fn collect(mut records: Vec<RuleRecord>) -> Vec<RuleRecord> {
    records.sort_by_cached_key(|record| record.title.to_lowercase());
    records
}

/// Encode records as a compact JSON array. Non-ASCII text is written as-is.
pub fn serialize(records: &[RuleRecord]) -> Result<Vec<u8>, IndexError> {
    Ok(serde_json::to_vec(records)?)
}

/// Serialize `records` to `path` and return the size of the written file.
pub fn write_index(records: &[RuleRecord], path: &Path) -> Result<u64, IndexError> {
    let bytes = serialize(records)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| with_path(e, "create", parent))?;
    }

    std::fs::write(path, &bytes).map_err(|e| with_path(e, "write", path))?;
    let size = std::fs::metadata(path)
        .map_err(|e| with_path(e, "stat", path))?
        .len();

    tracing::debug!("Wrote {} bytes to {}", size, path.display());
    Ok(size)
}

fn with_path(err: std::io::Error, action: &str, path: &Path) -> IndexError {
    IndexError::FileSystem(std::io::Error::new(
        err.kind(),
        format!("Failed to {action} {}: {err}", path.display()),
    ))
}
