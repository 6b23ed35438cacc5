// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Origin of the log data a rule targets.
///
/// Each field is `null` in the output when the rule leaves it unset, when the
/// value is not a string, or when the rule has no usable `logsource` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSource {
    pub category: Option<String>,
    pub product: Option<String>,
    pub service: Option<String>,
}

/// One accepted rule document in the index.
///
/// Field order here is the field order of every object in `rules.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Never empty.
    pub title: String,
    pub id: String,
    /// Lower-cased; `"unknown"` when unset.
    pub status: String,
    pub description: String,
    pub author: String,
    pub date: String,
    pub modified: String,
    pub logsource: LogSource,
    /// Lower-cased string tags in document order.
    pub tags: Vec<String>,
    /// Lower-cased; `"medium"` when unset.
    pub level: String,
    /// Block-style YAML rendering of the detection section, or empty.
    pub detection: String,
    /// Base name of the source file.
    pub filename: String,
    /// The subset of `tags` that reference ATT&CK.
    pub mitre_tags: Vec<String>,
}

impl RuleRecord {
    /// Product named by the rule's logsource, if it names a non-empty one.
    pub fn product(&self) -> Option<&str> {
        self.logsource
            .product
            .as_deref()
            .filter(|product| !product.is_empty())
    }
}
