// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core report types for tscheck
//!
//! Lint rules, findings and the per-catalog report they roll up into.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" | "note" | "info" => Some(Severity::Low),
            "medium" | "warning" | "warn" => Some(Severity::Medium),
            "high" | "error" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Lint rules, in stable id order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LintRule {
    DuplicateContext,
    DuplicateMessage,
    NumerusFormCount,
    PlaceholderMismatch,
    AcceleratorMismatch,
    SurroundingWhitespace,
    EndingPunctuation,
    Untranslated,
    UnknownLanguage,
    EmptyContext,
}

impl LintRule {
    pub fn all() -> &'static [LintRule] {
        &[
            LintRule::DuplicateContext,
            LintRule::DuplicateMessage,
            LintRule::NumerusFormCount,
            LintRule::PlaceholderMismatch,
            LintRule::AcceleratorMismatch,
            LintRule::SurroundingWhitespace,
            LintRule::EndingPunctuation,
            LintRule::Untranslated,
            LintRule::UnknownLanguage,
            LintRule::EmptyContext,
        ]
    }

    /// Stable id, also used as the SARIF rule id.
    pub fn code(&self) -> &'static str {
        match self {
            LintRule::DuplicateContext => "TS001",
            LintRule::DuplicateMessage => "TS002",
            LintRule::NumerusFormCount => "TS003",
            LintRule::PlaceholderMismatch => "TS004",
            LintRule::AcceleratorMismatch => "TS005",
            LintRule::SurroundingWhitespace => "TS006",
            LintRule::EndingPunctuation => "TS007",
            LintRule::Untranslated => "TS008",
            LintRule::UnknownLanguage => "TS009",
            LintRule::EmptyContext => "TS010",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LintRule::DuplicateContext => "duplicate-context",
            LintRule::DuplicateMessage => "duplicate-message",
            LintRule::NumerusFormCount => "numerus-form-count",
            LintRule::PlaceholderMismatch => "placeholder-mismatch",
            LintRule::AcceleratorMismatch => "accelerator-mismatch",
            LintRule::SurroundingWhitespace => "surrounding-whitespace",
            LintRule::EndingPunctuation => "ending-punctuation",
            LintRule::Untranslated => "untranslated",
            LintRule::UnknownLanguage => "unknown-language",
            LintRule::EmptyContext => "empty-context",
        }
    }

    /// Accepts either the name or the code.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.name() == value || r.code().eq_ignore_ascii_case(value))
    }

    pub fn description(&self) -> &'static str {
        match self {
            LintRule::DuplicateContext => "context name appears more than once in a catalog",
            LintRule::DuplicateMessage => "source and comment repeat within one context",
            LintRule::NumerusFormCount => {
                "numerus form count differs from the language's plural forms"
            }
            LintRule::PlaceholderMismatch => {
                "translation format specifiers differ from the source"
            }
            LintRule::AcceleratorMismatch => "keyboard accelerator (&) on one side only",
            LintRule::SurroundingWhitespace => "leading or trailing whitespace differs",
            LintRule::EndingPunctuation => "final punctuation differs",
            LintRule::Untranslated => "translation is empty",
            LintRule::UnknownLanguage => "language tag is malformed or has no plural rule",
            LintRule::EmptyContext => "context has no messages",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            LintRule::PlaceholderMismatch => Severity::Critical,
            LintRule::DuplicateContext
            | LintRule::DuplicateMessage
            | LintRule::NumerusFormCount => Severity::High,
            LintRule::AcceleratorMismatch | LintRule::UnknownLanguage => Severity::Medium,
            LintRule::SurroundingWhitespace
            | LintRule::EndingPunctuation
            | LintRule::Untranslated
            | LintRule::EmptyContext => Severity::Low,
        }
    }

    /// Ending punctuation is noisy across scripts and empty contexts are
    /// legitimate, so both are opt-in.
    pub fn default_enabled(&self) -> bool {
        !matches!(self, LintRule::EndingPunctuation | LintRule::EmptyContext)
    }
}

impl std::fmt::Display for LintRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Completion and shape figures for one catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub contexts: usize,
    pub empty_contexts: usize,
    pub messages: usize,
    pub numerus_messages: usize,
    pub translated: usize,
    pub unfinished: usize,
    pub untranslated: usize,
    /// Vanished or obsolete entries
    pub retired: usize,
    /// Translated share of non-retired messages, 0-100
    pub completion: f64,
    /// BLAKE3 over the ordered source keys
    pub fingerprint: String,
}

/// Lint result for one catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub language: String,
    pub created_at: String,
    pub findings: Vec<Finding>,
    pub stats: CatalogStats,
}

impl LintReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn count_rule(&self, rule: LintRule) -> usize {
        self.findings.iter().filter(|f| f.rule == rule).count()
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Whether any finding reaches `threshold`.
    pub fn fails(&self, threshold: Severity) -> bool {
        self.max_severity().is_some_and(|s| s >= threshold)
    }
}
