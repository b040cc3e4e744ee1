// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog lint engine
//!
//! Runs every enabled rule over a catalog and rolls the findings into a
//! [`LintReport`]. Retired (vanished/obsolete) messages only take part in the
//! structural rules; nobody sees their text at runtime.

pub mod placeholders;
mod rules;

use crate::catalog::{self, Catalog};
use crate::config::LintConfig;
use crate::report::stats;
use crate::types::{Finding, LintReport, LintRule};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub use rules::{ending_class, has_accelerator};

/// Lint a catalog already in memory.
pub fn check(catalog: &Catalog, config: &LintConfig) -> LintReport {
    let enabled = |rule: LintRule| config.is_enabled(rule);
    let expected_forms = config.expected_forms(&catalog.language);
    let mut findings: Vec<Finding> = Vec::new();

    if enabled(LintRule::UnknownLanguage) {
        let has_override = config.plural_override(&catalog.language).is_some();
        rules::language(catalog, has_override, &mut findings);
    }
    if enabled(LintRule::DuplicateContext) {
        rules::duplicate_contexts(catalog, &mut findings);
    }

    for ctx in &catalog.contexts {
        if config.ignores_context(&ctx.name) {
            continue;
        }
        if enabled(LintRule::EmptyContext) {
            rules::empty_context(ctx, &mut findings);
        }
        if enabled(LintRule::DuplicateMessage) {
            rules::duplicate_messages(ctx, &mut findings);
        }

        for msg in ctx.messages.iter().filter(|m| !m.translation.state.is_retired()) {
            if enabled(LintRule::NumerusFormCount) {
                rules::numerus_forms(ctx, msg, expected_forms, &mut findings);
            }
            if enabled(LintRule::Untranslated) {
                rules::untranslated(ctx, msg, &mut findings);
            }
            if enabled(LintRule::PlaceholderMismatch) {
                rules::placeholders(ctx, msg, &mut findings);
            }
            if enabled(LintRule::AcceleratorMismatch) {
                rules::accelerators(ctx, msg, &mut findings);
            }
            if enabled(LintRule::SurroundingWhitespace) {
                rules::surrounding_whitespace(ctx, msg, &mut findings);
            }
            if enabled(LintRule::EndingPunctuation) {
                rules::ending_punctuation(ctx, msg, &mut findings);
            }
        }
    }

    for finding in &mut findings {
        finding.severity = config.severity_for(finding.rule);
    }
    // Catalog-level findings (no line) first, then file order.
    findings.sort_by_key(|f| (f.line.is_some(), f.line));

    debug!(
        language = %catalog.language,
        findings = findings.len(),
        "linted catalog"
    );

    LintReport {
        file: None,
        language: catalog.language.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
        findings,
        stats: stats::compute(catalog),
    }
}

/// Load and lint one catalog file.
pub fn check_file(path: &Path, config: &LintConfig) -> Result<LintReport> {
    let catalog = catalog::load_any(path)?;
    let mut report = check(&catalog, config);
    report.file = Some(path.to_path_buf());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Context, Message, Translation, TranslationState};
    use crate::types::Severity;

    fn hu(messages: Vec<Message>) -> Catalog {
        Catalog::new("hu").with_context(Context::new("BitcoinGUI").with_messages(messages))
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        let catalog = hu(vec![
            Message::new("&Send", "&Küldés"),
            Message::numerus("%n active connection(s)", ["%n aktív kapcsolat", "%n aktív kapcsolat"]),
        ]);
        let report = check(&catalog, &LintConfig::default());
        assert!(report.findings.is_empty(), "{:?}", report.findings);
        assert_eq!(report.stats.messages, 2);
    }

    #[test]
    fn numerus_count_follows_language() {
        let catalog = hu(vec![Message::numerus("%n hour(s)", ["%n óra"])]);
        let report = check(&catalog, &LintConfig::default());
        assert_eq!(report.count_rule(LintRule::NumerusFormCount), 1);

        let zh = Catalog::new("zh_HK").with_context(
            Context::new("BitcoinGUI").with_messages(vec![Message::numerus("%n hour(s)", ["%n 小時"])]),
        );
        assert!(check(&zh, &LintConfig::default()).findings.is_empty());
    }

    #[test]
    fn retired_messages_skip_message_rules() {
        let mut msg = Message::new("Date: %1", "Dátum");
        msg.translation.state = TranslationState::Vanished;
        let report = check(&hu(vec![msg]), &LintConfig::default());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn severity_override_and_disable() {
        let catalog = hu(vec![
            Message::new("&Receive", "Fogadás"),
            Message {
                translation: Translation::unfinished(1),
                ..Message::new("Wallet", "")
            },
        ]);
        let mut config = LintConfig::default();
        config
            .severity
            .insert(LintRule::AcceleratorMismatch, Severity::Critical);
        config.disable.push(LintRule::Untranslated);

        let report = check(&catalog, &config);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].rule, LintRule::AcceleratorMismatch);
        assert_eq!(report.findings[0].severity, Severity::Critical);
    }

    #[test]
    fn ignored_contexts_are_skipped() {
        let catalog = hu(vec![Message::new("Amount: %1", "Összeg")]);
        let mut config = LintConfig::default();
        assert!(check(&catalog, &config).fails(Severity::High));
        config.ignore_contexts.push("BitcoinGUI".into());
        assert!(check(&catalog, &config).findings.is_empty());
    }

    #[test]
    fn catalog_findings_sort_first() {
        let mut msg = Message::new("Amount: %1", "Összeg");
        msg.line = Some(12);
        let catalog = Catalog::new("qq").with_context(Context::new("X").with_messages(vec![msg]));
        let report = check(&catalog, &LintConfig::default());
        assert_eq!(report.findings[0].rule, LintRule::UnknownLanguage);
        assert_eq!(report.findings[1].line, Some(12));
    }
}
