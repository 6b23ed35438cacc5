// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-document normalization of Sigma rule files into [`RuleRecord`]s.
//!
//! A rule file may hold several YAML documents; only the first is indexed.
//! Documents that do not parse, whose first document is not a mapping, or
//! that carry no usable `title` are rejected with a [`Rejection`]. Everything
//! else decodes with per-field defaults and never fails.

pub mod detection;
pub mod fields;

use crate::index::record::RuleRecord;
use detection::{DetectionFormatter, YamlBlockFormatter, render_detection};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

/// Why a document was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The text is not valid YAML.
    Parse(String),
    /// The text holds no YAML documents.
    Empty,
    /// The first document is a scalar or a list.
    NotAMapping,
    /// `title` is absent, null or otherwise falsy.
    MissingTitle,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid YAML: {message}"),
            Self::Empty => write!(f, "no YAML documents"),
            Self::NotAMapping => write!(f, "first document is not a mapping"),
            Self::MissingTitle => write!(f, "no title"),
        }
    }
}

/// Converts rule text into records using a pluggable detection formatter.
#[derive(Debug, Default, Clone)]
pub struct Normalizer<F = YamlBlockFormatter> {
    formatter: F,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: DetectionFormatter> Normalizer<F> {
    pub const fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    /// Normalize the text of one rule file.
    ///
    /// `filename` is recorded as-is in the resulting record.
    pub fn normalize(&self, text: &str, filename: &str) -> Result<RuleRecord, Rejection> {
        let Value::Mapping(rule) = first_document(text)? else {
            return Err(Rejection::NotAMapping);
        };

        let title = match rule.get("title") {
            Some(title) if fields::is_truthy(title) => fields::stringify(title),
            _ => return Err(Rejection::MissingTitle),
        };
        if title.is_empty() {
            return Err(Rejection::MissingTitle);
        }

        let tags = fields::tags(&rule);
        let mitre_tags = fields::mitre_tags(&tags);

        Ok(RuleRecord {
            title,
            id: fields::scalar_or(&rule, "id", ""),
            status: fields::lowercase_or(&rule, "status", "unknown"),
            description: fields::scalar_or(&rule, "description", ""),
            author: fields::scalar_or(&rule, "author", "Unknown"),
            date: fields::scalar_or(&rule, "date", ""),
            modified: fields::scalar_or(&rule, "modified", ""),
            logsource: fields::logsource(&rule),
            tags,
            level: fields::lowercase_or(&rule, "level", "medium"),
            detection: render_detection(rule.get("detection"), &self.formatter),
            filename: filename.to_string(),
            mitre_tags,
        })
    }

    /// Read and normalize one rule file.
    ///
    /// Read failures and rejections are logged and yield `None`; they never
    /// stop the caller from moving on to the next file.
    pub fn normalize_file(&self, path: &Path) -> Option<RuleRecord> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error reading {}: {e}", path.display());
                return None;
            }
        };

        match self.normalize(&text, &filename) {
            Ok(record) => Some(record),
            Err(Rejection::Parse(message)) => {
                tracing::warn!("YAML error in {filename}: {message}");
                None
            }
            Err(rejection) => {
                tracing::debug!("Skipping {filename}: {rejection}");
                None
            }
        }
    }
}

/// Normalize with the default block-YAML detection formatter.
pub fn normalize(text: &str, filename: &str) -> Result<RuleRecord, Rejection> {
    Normalizer::new().normalize(text, filename)
}

/// Parse every document in `text` and return the first.
///
/// A syntax error in any document rejects the whole file.
fn first_document(text: &str) -> Result<Value, Rejection> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).map_err(|e| Rejection::Parse(e.to_string()))?;
        documents.push(value);
    }

    documents.into_iter().next().ok_or(Rejection::Empty)
}
