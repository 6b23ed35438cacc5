// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Rendering of a rule's `detection` section as display text.

use super::fields::{stringify, untag};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

/// Turns a parsed detection mapping back into readable text.
pub trait DetectionFormatter {
    fn format(&self, detection: &Mapping) -> Result<String, serde_yaml::Error>;
}

/// Block-style YAML with mapping keys sorted at every level.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlBlockFormatter;

impl DetectionFormatter for YamlBlockFormatter {
    fn format(&self, detection: &Mapping) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&sort_keys(&Value::Mapping(detection.clone())))
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Mapping(entries) => {
            let mut sorted: Vec<(&Value, &Value)> = entries.iter().collect();
            sorted.sort_by_cached_key(|(key, _)| stringify(key));
            Value::Mapping(
                sorted
                    .into_iter()
                    .map(|(key, nested)| (key.clone(), sort_keys(nested)))
                    .collect(),
            )
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(sort_keys).collect()),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: sort_keys(&tagged.value),
        })),
        scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
            scalar.clone()
        }
    }
}

/// Render the raw `detection` value, or `""` when it is absent, not a
/// non-empty mapping, or cannot be rendered.
pub fn render_detection(detection: Option<&Value>, formatter: &impl DetectionFormatter) -> String {
    let Some(Value::Mapping(entries)) = detection.map(untag) else {
        return String::new();
    };
    if entries.is_empty() {
        return String::new();
    }

    formatter.format(entries).unwrap_or_else(|e| {
        tracing::debug!("Failed to render detection block: {e}");
        String::new()
    })
}
