// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diff utilities for catalogs.

use crate::catalog::{Catalog, MessageKey};
use crate::report::stats;
use crate::types::CatalogStats;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A message located by its key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MessageRef {
    pub context: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl MessageRef {
    fn new(context: &str, key: MessageKey<'_>) -> Self {
        Self {
            context: context.to_string(),
            source: key.source.to_string(),
            comment: key.comment.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogDiff {
    pub contexts_added: Vec<String>,
    pub contexts_removed: Vec<String>,
    pub messages_added: Vec<MessageRef>,
    pub messages_removed: Vec<MessageRef>,
    pub translations_changed: Vec<MessageRef>,
    /// Both catalogs come from the same source template
    pub same_template: bool,
    pub base: CatalogStats,
    pub compare: CatalogStats,
}

impl CatalogDiff {
    pub fn is_empty(&self) -> bool {
        self.contexts_added.is_empty()
            && self.contexts_removed.is_empty()
            && self.messages_added.is_empty()
            && self.messages_removed.is_empty()
            && self.translations_changed.is_empty()
    }
}

pub fn diff_catalogs(base: &Catalog, compare: &Catalog) -> CatalogDiff {
    let base_contexts: HashSet<&str> = base.contexts.iter().map(|c| c.name.as_str()).collect();
    let cmp_contexts: HashSet<&str> = compare.contexts.iter().map(|c| c.name.as_str()).collect();
    let mut contexts_added: Vec<String> = cmp_contexts
        .difference(&base_contexts)
        .map(|s| s.to_string())
        .collect();
    let mut contexts_removed: Vec<String> = base_contexts
        .difference(&cmp_contexts)
        .map(|s| s.to_string())
        .collect();
    contexts_added.sort();
    contexts_removed.sort();

    let base_index = base.index();
    let cmp_index = compare.index();
    let mut messages_added = Vec::new();
    let mut messages_removed = Vec::new();
    let mut translations_changed = Vec::new();

    for (&(context, key), msg) in &cmp_index {
        match base_index.get(&(context, key)) {
            None => messages_added.push(MessageRef::new(context, key)),
            Some(old) if old.translation != msg.translation => {
                translations_changed.push(MessageRef::new(context, key))
            }
            Some(_) => {}
        }
    }
    for &(context, key) in base_index.keys() {
        if !cmp_index.contains_key(&(context, key)) {
            messages_removed.push(MessageRef::new(context, key));
        }
    }
    messages_added.sort();
    messages_removed.sort();
    translations_changed.sort();

    let base_stats = stats::compute(base);
    let cmp_stats = stats::compute(compare);
    CatalogDiff {
        contexts_added,
        contexts_removed,
        messages_added,
        messages_removed,
        translations_changed,
        same_template: base_stats.fingerprint == cmp_stats.fingerprint,
        base: base_stats,
        compare: cmp_stats,
    }
}

pub fn format_diff(diff: &CatalogDiff, base_label: &str, compare_label: &str) -> String {
    let mut lines = Vec::new();
    lines.push("=== TSCHECK CATALOG DIFF ===".to_string());
    lines.push(format!("Base: {}", base_label));
    lines.push(format!("Compare: {}", compare_label));
    lines.push(String::new());

    lines.push(format!(
        "Source template: {}",
        if diff.same_template {
            "identical"
        } else {
            "changed"
        }
    ));
    lines.push(format!(
        "Completion: {:.1}% -> {:.1}% ({:+.1})",
        diff.base.completion,
        diff.compare.completion,
        diff.compare.completion - diff.base.completion
    ));
    for (label, base, cmp) in [
        ("Contexts", diff.base.contexts, diff.compare.contexts),
        ("Messages", diff.base.messages, diff.compare.messages),
        ("Translated", diff.base.translated, diff.compare.translated),
        ("Untranslated", diff.base.untranslated, diff.compare.untranslated),
    ] {
        lines.push(format!(
            "{}: {} -> {} ({})",
            label,
            base,
            cmp,
            fmt_delta_i64(cmp as i64 - base as i64)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Contexts: +{} -{}",
        fmt_list(&diff.contexts_added),
        fmt_list(&diff.contexts_removed)
    ));

    let added = count_by_context(&diff.messages_added);
    let removed = count_by_context(&diff.messages_removed);
    let changed = count_by_context(&diff.translations_changed);
    let mut contexts: Vec<&str> = added
        .keys()
        .chain(removed.keys())
        .chain(changed.keys())
        .copied()
        .collect();
    contexts.sort();
    contexts.dedup();
    if !contexts.is_empty() {
        lines.push("Per-context changes:".to_string());
        for context in contexts {
            lines.push(format!(
                "  {}: +{} -{} ~{}",
                context,
                added.get(context).unwrap_or(&0),
                removed.get(context).unwrap_or(&0),
                changed.get(context).unwrap_or(&0)
            ));
        }
    }

    lines.join("\n")
}

fn fmt_delta_i64(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

fn fmt_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn count_by_context(refs: &[MessageRef]) -> BTreeMap<&str, usize> {
    let mut map = BTreeMap::new();
    for r in refs {
        *map.entry(r.context.as_str()).or_insert(0) += 1;
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_formatting() {
        assert_eq!(fmt_delta_i64(3), "+3");
        assert_eq!(fmt_delta_i64(0), "0");
        assert_eq!(fmt_delta_i64(-2), "-2");
    }

    #[test]
    fn empty_list_is_dash() {
        assert_eq!(fmt_list(&[]), "-");
        assert_eq!(fmt_list(&["A".into(), "B".into()]), "A, B");
    }
}
