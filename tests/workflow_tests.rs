// SPDX-License-Identifier: PMPL-1.0-or-later

//! Merge, diff and runtime lookup over the wallet locale fixtures

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tscheck::catalog::{self, Catalog, TranslationState};
use tscheck::config::LintConfig;
use tscheck::lint;
use tscheck::merge::{merge, MergeOptions};
use tscheck::report::diff;
use tscheck::translator::{arg, Translator};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Source-only template built from a translated catalog.
fn template_from(catalog: &Catalog) -> Catalog {
    let mut template = catalog.clone();
    template.language = "en".to_string();
    for ctx in &mut template.contexts {
        for msg in &mut ctx.messages {
            let forms = msg.translation.forms.len().max(1);
            msg.translation = tscheck::catalog::Translation::unfinished(forms);
        }
    }
    template
}

#[test]
fn test_merge_against_own_template_keeps_everything() {
    let hu = catalog::load(&fixture("bitcoin_hu.ts")).unwrap();
    let outcome = merge(&template_from(&hu), &hu, &MergeOptions::default());
    assert_eq!(outcome.kept, 8);
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.obsoleted, 0);
    assert_eq!(catalog::to_string(&outcome.catalog), catalog::to_string(&hu));
}

#[test]
fn test_merge_new_template_message_is_lint_clean_except_untranslated() {
    let hu = catalog::load(&fixture("bitcoin_hu.ts")).unwrap();
    let mut template = template_from(&hu);
    template.contexts[1]
        .messages
        .push(tscheck::catalog::Message::numerus("%n day(s)", ["", ""]));
    template.contexts[0].messages.remove(0);

    let outcome = merge(&template, &hu, &MergeOptions::default());
    assert_eq!((outcome.kept, outcome.added, outcome.obsoleted), (7, 1, 1));

    let retired = outcome
        .catalog
        .find("AddressBookPage", "Create a new address", None)
        .unwrap();
    assert_eq!(retired.translation.state, TranslationState::Vanished);

    let report = lint::check(&outcome.catalog, &LintConfig::default());
    let rules: Vec<_> = report.findings.iter().map(|f| f.rule.name()).collect();
    assert_eq!(rules, ["untranslated"]);
    assert_eq!(report.stats.retired, 1);

    // The merged file is canonical and reloads unchanged.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bitcoin_hu.ts");
    catalog::save(&outcome.catalog, &path).unwrap();
    let reloaded = catalog::load(&path).unwrap();
    assert_eq!(
        catalog::to_string(&reloaded),
        fs::read_to_string(&path).unwrap()
    );
}

#[test]
fn test_diff_between_locales() {
    let hu = catalog::load(&fixture("bitcoin_hu.ts")).unwrap();
    let fa = catalog::load(&fixture("bitcoin_fa_IR.ts")).unwrap();
    let result = diff::diff_catalogs(&fa, &hu);

    assert_eq!(result.contexts_added, ["BitcoinGUI"]);
    assert!(result.contexts_removed.is_empty());
    assert_eq!(result.messages_added.len(), 6);
    assert_eq!(result.messages_removed.len(), 1);
    // Shared keys with different text.
    assert_eq!(result.translations_changed.len(), 2);
    assert!(!result.same_template);

    let text = diff::format_diff(&result, "fa_IR", "hu");
    assert!(text.contains("Contexts: +BitcoinGUI -"), "{}", text);
    assert!(text.contains("Messages: 3 -> 8 (+5)"), "{}", text);
    assert!(text.contains("BitcoinGUI: +5 -0 ~0"), "{}", text);
    assert!(text.contains("AddressBookPage: +1 -1 ~2"), "{}", text);
}

#[test]
fn test_diff_same_catalog_is_empty() {
    let tr = catalog::load(&fixture("bitcoin_tr.ts")).unwrap();
    let result = diff::diff_catalogs(&tr, &tr);
    assert!(result.is_empty());
    assert!(result.same_template);
}

#[test]
fn test_translator_from_locale_dir_prefers_territory() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture("bitcoin_zh_HK.ts"), dir.path().join("bitcoin_zh_HK.ts")).unwrap();
    fs::write(
        dir.path().join("bitcoin_zh.ts"),
        "<TS language=\"zh\" version=\"2.1\">\n<context>\n    <name>BitcoinGUI</name>\n    <message>\n        <source>Node</source>\n        <translation>节点</translation>\n    </message>\n    <message>\n        <source>Wallet</source>\n        <translation>钱包</translation>\n    </message>\n    </context>\n</TS>\n",
    )
    .unwrap();

    let t = Translator::from_locale_dir(dir.path(), "bitcoin", "zh_HK").unwrap();
    assert_eq!(t.translate("BitcoinGUI", "Node", None), Some("節點"));
    assert_eq!(t.translate("BitcoinGUI", "Wallet", None), Some("钱包"));
    assert_eq!(t.tr("BitcoinGUI", "Send"), "Send");
}

#[test]
fn test_translator_missing_locale_is_error() {
    let dir = TempDir::new().unwrap();
    let err = Translator::from_locale_dir(dir.path(), "bitcoin", "ta").unwrap_err();
    assert!(err.to_string().contains("bitcoin_*.ts"), "{}", err);
    assert!(Translator::from_locale_dir(dir.path(), "bitcoin", "not a tag").is_err());
}

#[test]
fn test_translator_plural_and_args() {
    let mut t = Translator::new();
    t.install(catalog::load(&fixture("bitcoin_hu.ts")).unwrap());

    assert_eq!(
        t.translate_plural(
            "BitcoinGUI",
            "%n active connection(s) to Bitcoin network",
            None,
            8
        )
        .as_deref(),
        Some("8 aktív kapcsolat a Bitcoin hálózathoz")
    );
    let template = t.tr("BitcoinGUI", "%1 and %2");
    assert_eq!(arg(&template, &["2 óra", "5 perc"]), "2 óra és 5 perc");
}
