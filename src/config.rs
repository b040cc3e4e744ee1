// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lint configuration
//!
//! Read from YAML, either passed with `--config` or discovered as
//! `.tscheck.yaml` in the working directory:
//!
//! ```yaml
//! enable: [ending-punctuation]
//! disable: [untranslated]
//! severity:
//!   accelerator-mismatch: low
//! ignore_contexts: [bitcoin-core]
//! plural_forms:
//!   fa: 1
//! fail_on: critical
//! ```

use crate::i18n::{LanguageTag, PluralRule};
use crate::types::{LintRule, Severity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".tscheck.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rules switched on in addition to the defaults
    pub enable: Vec<LintRule>,
    /// Rules switched off; wins over `enable`
    pub disable: Vec<LintRule>,
    pub severity: BTreeMap<LintRule, Severity>,
    pub ignore_contexts: Vec<String>,
    /// Plural form count per language code or full tag
    pub plural_forms: BTreeMap<String, usize>,
    /// Lowest severity that makes `check` fail
    pub fail_on: Severity,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enable: Vec::new(),
            disable: Vec::new(),
            severity: BTreeMap::new(),
            ignore_contexts: Vec::new(),
            plural_forms: BTreeMap::new(),
            fail_on: Severity::High,
        }
    }
}

impl LintConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded lint config");
        Ok(config)
    }

    /// `.tscheck.yaml` in `dir`, if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidate: PathBuf = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Explicit path, else discovery in the working directory, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::discover(Path::new("."))?.unwrap_or_default()),
        }
    }

    pub fn is_enabled(&self, rule: LintRule) -> bool {
        if self.disable.contains(&rule) {
            return false;
        }
        self.enable.contains(&rule) || rule.default_enabled()
    }

    pub fn severity_for(&self, rule: LintRule) -> Severity {
        self.severity
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity())
    }

    pub fn ignores_context(&self, name: &str) -> bool {
        self.ignore_contexts.iter().any(|c| c == name)
    }

    /// Overridden count for this tag, by full tag first then language code.
    pub fn plural_override(&self, tag: &str) -> Option<usize> {
        if let Some(count) = self.plural_forms.get(tag) {
            return Some(*count);
        }
        let parsed = LanguageTag::parse(tag)?;
        self.plural_forms.get(&parsed.language).copied()
    }

    /// Number of numerus forms a catalog in `tag` must carry.
    pub fn expected_forms(&self, tag: &str) -> Option<usize> {
        self.plural_override(tag).or_else(|| {
            LanguageTag::parse(tag)
                .and_then(|t| PluralRule::for_language(&t.language))
                .map(|rule| rule.form_count())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LintConfig::default();
        assert!(config.is_enabled(LintRule::PlaceholderMismatch));
        assert!(!config.is_enabled(LintRule::EmptyContext));
        assert_eq!(config.fail_on, Severity::High);
        assert_eq!(config.expected_forms("zh_HK"), Some(1));
        assert_eq!(config.expected_forms("hu"), Some(2));
        assert_eq!(config.expected_forms("xx"), None);
    }

    #[test]
    fn yaml_overrides() {
        let config = LintConfig::from_yaml(
            "enable: [empty-context]\n\
             disable: [untranslated, empty-context]\n\
             severity:\n  accelerator-mismatch: low\n\
             plural_forms:\n  fa: 1\n  zh_HK: 2\n\
             fail_on: critical\n",
        )
        .unwrap();
        assert!(!config.is_enabled(LintRule::EmptyContext));
        assert!(!config.is_enabled(LintRule::Untranslated));
        assert_eq!(
            config.severity_for(LintRule::AcceleratorMismatch),
            Severity::Low
        );
        assert_eq!(config.expected_forms("fa_IR"), Some(1));
        assert_eq!(config.expected_forms("zh_HK"), Some(2));
        assert_eq!(config.fail_on, Severity::Critical);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(LintConfig::from_yaml("rulez: []\n").is_err());
        assert!(LintConfig::from_yaml("disable: [no-such-rule]\n").is_err());
    }

    #[test]
    fn discover_missing_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(LintConfig::discover(dir.path()).unwrap().is_none());
        fs::write(dir.path().join(CONFIG_FILE_NAME), "fail_on: low\n").unwrap();
        let found = LintConfig::discover(dir.path()).unwrap().unwrap();
        assert_eq!(found.fail_on, Severity::Low);
    }
}
