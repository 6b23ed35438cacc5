// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

//! Schema-with-defaults decoding of individual rule fields.
//!
//! Every reader takes the top-level rule mapping and never fails: a value of
//! the wrong shape decodes to the field's default. Three shapes cover the
//! record: scalars with a default ([`scalar_or`]), the nested `logsource`
//! object ([`logsource`]) and the filtered `tags` list ([`tags`]).

use crate::index::record::LogSource;
use serde_yaml::{Mapping, Value};

/// Tag prefix identifying ATT&CK references.
pub const MITRE_PREFIX: &str = "attack.";

/// Strip any YAML tags (`!foo value`) down to the underlying value.
pub(crate) fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Truthiness of a YAML value: null, `false`, zero and empty strings or
/// collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(entries) => !entries.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Text form of any YAML value.
///
/// Strings are returned verbatim, numbers and booleans in their YAML
/// spelling, and collections as compact JSON.
pub fn stringify(value: &Value) -> String {
    match untag(value) {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        collection @ (Value::Sequence(_) | Value::Mapping(_)) => {
            serde_json::to_string(collection).unwrap_or_default()
        }
        Value::Tagged(tagged) => stringify(&tagged.value),
    }
}

/// Read `key` as a string, falling back to `default` when absent or null.
pub fn scalar_or(rule: &Mapping, key: &str, default: &str) -> String {
    match rule.get(key).map(untag) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => stringify(value),
    }
}

/// Like [`scalar_or`], lower-cased.
pub fn lowercase_or(rule: &Mapping, key: &str, default: &str) -> String {
    scalar_or(rule, key, default).to_lowercase()
}

/// Present, non-null values are kept in their text form.
fn optional_string(source: &Mapping, key: &str) -> Option<String> {
    match source.get(key).map(untag) {
        None | Some(Value::Null) => None,
        Some(value) => Some(stringify(value)),
    }
}

pub fn logsource(rule: &Mapping) -> LogSource {
    let Some(Value::Mapping(source)) = rule.get("logsource").map(untag) else {
        return LogSource::default();
    };

    LogSource {
        category: optional_string(source, "category"),
        product: optional_string(source, "product"),
        service: optional_string(source, "service"),
    }
}

/// String tags, lower-cased, in document order. Anything that is not a
/// string is dropped.
pub fn tags(rule: &Mapping) -> Vec<String> {
    let Some(Value::Sequence(items)) = rule.get("tags").map(untag) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| untag(item).as_str())
        .map(str::to_lowercase)
        .collect()
}

pub fn mitre_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.starts_with(MITRE_PREFIX))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(yaml: &str) -> Mapping {
        match serde_yaml::from_str::<Value>(yaml).unwrap() {
            Value::Mapping(mapping) => mapping,
            other => panic!("expected a mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Bool(false)));
        assert!(!is_truthy(&Value::String(String::new())));
        assert!(!is_truthy(&serde_yaml::from_str::<Value>("0").unwrap()));
        assert!(!is_truthy(&serde_yaml::from_str::<Value>("[]").unwrap()));
        assert!(is_truthy(&Value::String("x".to_string())));
        assert!(is_truthy(&serde_yaml::from_str::<Value>("42").unwrap()));
    }

    #[test]
    fn test_scalar_defaults_apply_to_absent_and_null() {
        let r = rule("status: ~\nauthor: Jane\n");
        assert_eq!(scalar_or(&r, "status", "unknown"), "unknown");
        assert_eq!(scalar_or(&r, "id", ""), "");
        assert_eq!(scalar_or(&r, "author", "Unknown"), "Jane");
    }

    #[test]
    fn test_scalar_stringifies_non_strings() {
        let r = rule("id: 1234\ndate: 2023/01/02\nflag: true\nratio: 1.5\n");
        assert_eq!(scalar_or(&r, "id", ""), "1234");
        assert_eq!(scalar_or(&r, "date", ""), "2023/01/02");
        assert_eq!(scalar_or(&r, "flag", ""), "true");
        assert_eq!(scalar_or(&r, "ratio", ""), "1.5");
    }

    #[test]
    fn test_empty_string_is_kept_not_defaulted() {
        let r = rule("status: ''\n");
        assert_eq!(scalar_or(&r, "status", "unknown"), "");
    }

    #[test]
    fn test_collections_stringify_as_json() {
        let r = rule("author:\n  - a\n  - b\n");
        assert_eq!(scalar_or(&r, "author", "Unknown"), r#"["a","b"]"#);
    }

    #[test]
    fn test_lowercase_or() {
        let r = rule("level: CRITICAL\n");
        assert_eq!(lowercase_or(&r, "level", "medium"), "critical");
        assert_eq!(lowercase_or(&r, "status", "unknown"), "unknown");
    }

    #[test]
    fn test_logsource_non_mapping_is_all_null() {
        assert_eq!(logsource(&rule("logsource: windows\n")), LogSource::default());
        assert_eq!(logsource(&rule("title: x\n")), LogSource::default());
    }

    #[test]
    fn test_logsource_reads_fields_verbatim() {
        let r = rule("logsource:\n  product: Windows\n  category: process_creation\n");
        let source = logsource(&r);
        assert_eq!(source.product.as_deref(), Some("Windows"));
        assert_eq!(source.category.as_deref(), Some("process_creation"));
        assert_eq!(source.service, None);
    }

    #[test]
    fn test_logsource_non_string_values_are_stringified() {
        let r = rule("logsource:\n  product: 365\n  category: ~\n  service: true\n");
        let source = logsource(&r);
        assert_eq!(source.product.as_deref(), Some("365"));
        assert_eq!(source.category, None);
        assert_eq!(source.service.as_deref(), Some("true"));
    }

    #[test]
    fn test_tags_drop_non_strings_anywhere() {
        let r = rule("tags:\n  - 42\n  - Attack.T1059\n  - ~\n  - TLP:White\n  - [nested]\n");
        assert_eq!(tags(&r), vec!["attack.t1059", "tlp:white"]);
    }

    #[test]
    fn test_tags_non_list_is_empty() {
        assert!(tags(&rule("tags: attack.t1059\n")).is_empty());
        assert!(tags(&rule("title: x\n")).is_empty());
    }

    #[test]
    fn test_tags_are_idempotent() {
        let once = tags(&rule("tags: [Attack.Execution, CVE.2021-44228]\n"));
        let yaml = format!("tags: [{}]\n", once.join(", "));
        assert_eq!(tags(&rule(&yaml)), once);
    }

    #[test]
    fn test_mitre_tags_subset() {
        let all = vec![
            "attack.execution".to_string(),
            "cve.2021-44228".to_string(),
            "attack.t1059.001".to_string(),
            "detection.attack".to_string(),
        ];
        let mitre = mitre_tags(&all);
        assert_eq!(mitre, vec!["attack.execution", "attack.t1059.001"]);
        assert!(mitre.iter().all(|tag| all.contains(tag)));
    }
}
