// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use super::record::RuleRecord;
use std::collections::{BTreeMap, HashMap};

/// Frequency tables over an indexed corpus.
///
/// Built by folding records into an empty accumulator; see [`summarize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_level: BTreeMap<String, usize>,
    /// Only rules naming a non-empty product are counted here.
    pub by_product: HashMap<String, usize>,
}

impl CorpusStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record.
    pub fn add(&mut self, record: &RuleRecord) {
        self.total += 1;
        *self.by_status.entry(record.status.clone()).or_insert(0) += 1;
        *self.by_level.entry(record.level.clone()).or_insert(0) += 1;
        if let Some(product) = record.product() {
            *self.by_product.entry(product.to_string()).or_insert(0) += 1;
        }
    }

    /// The `n` most common products, most common first.
    ///
    /// The order among products with equal counts is unspecified.
    pub fn top_products(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .by_product
            .iter()
            .map(|(product, count)| (product.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

pub fn summarize(records: &[RuleRecord]) -> CorpusStats {
    records.iter().fold(CorpusStats::new(), |mut stats, record| {
        stats.add(record);
        stats
    })
}
