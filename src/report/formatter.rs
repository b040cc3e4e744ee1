// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal output for lint reports and catalog stats

use crate::i18n::{native_name, LanguageTag};
use crate::types::*;
use colored::*;

pub struct ReportFormatter;

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<8}", severity.to_string());
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.blue(),
    }
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &LintReport) {
        let title = match &report.file {
            Some(path) => format!("=== {} ({}) ===", path.display(), report.language),
            None => format!("=== catalog ({}) ===", report.language),
        };
        println!("\n{}", title.bold().cyan());

        if report.findings.is_empty() {
            println!("  {}", "No findings".green());
        } else {
            for finding in &report.findings {
                self.print_finding(finding);
            }
        }
        println!();
        self.print_summary(report);
    }

    fn print_finding(&self, finding: &Finding) {
        let line = finding
            .line
            .map(|l| format!("{:>5}", l))
            .unwrap_or_else(|| "    -".to_string());
        println!(
            "  {} {} {} {}",
            line.dimmed(),
            severity_label(finding.severity),
            finding.rule.code().bold(),
            finding.message
        );
        if let Some(context) = &finding.context {
            match &finding.source {
                Some(source) => println!(
                    "                 {}",
                    format!("in {}: {:?}", context, source).dimmed()
                ),
                None => println!("                 {}", format!("in {}", context).dimmed()),
            }
        }
    }

    fn print_summary(&self, report: &LintReport) {
        let mut parts = Vec::new();
        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ] {
            let count = report.count(severity);
            if count > 0 {
                parts.push(format!("{} {}", count, severity.to_string().to_lowercase()));
            }
        }
        let summary = if parts.is_empty() {
            "clean".green().to_string()
        } else {
            parts.join(", ")
        };
        println!(
            "  {} findings ({}), {} messages, {:.1}% complete",
            report.findings.len(),
            summary,
            report.stats.messages,
            report.stats.completion
        );
    }

    pub fn print_stats(&self, label: &str, language: &str, stats: &CatalogStats) {
        println!("\n{}", format!("=== {} ===", label).bold().cyan());
        println!("  Language: {}", describe_language(language));
        println!(
            "  Contexts: {} ({} empty)",
            stats.contexts, stats.empty_contexts
        );
        println!(
            "  Messages: {} ({} numerus)",
            stats.messages, stats.numerus_messages
        );
        println!("    Translated:   {}", stats.translated.to_string().green());
        println!("    Unfinished:   {}", stats.unfinished.to_string().yellow());
        println!("    Untranslated: {}", stats.untranslated.to_string().red());
        println!("    Retired:      {}", stats.retired.to_string().dimmed());

        let completion = format!("{:.1}%", stats.completion);
        let completion = if stats.completion >= 80.0 {
            completion.green()
        } else if stats.completion >= 50.0 {
            completion.yellow()
        } else {
            completion.red()
        };
        println!("  Completion: {}", completion.bold());
        println!("  Fingerprint: {}", stats.fingerprint.dimmed());
    }

    pub fn print_rules(&self) {
        println!("{}", "LINT RULES".bold().yellow());
        for rule in LintRule::all() {
            let state = if rule.default_enabled() {
                "on ".green()
            } else {
                "off".dimmed()
            };
            println!(
                "  {} {:<24} {} {} {}",
                rule.code().bold(),
                rule.name(),
                severity_label(rule.default_severity()),
                state,
                rule.description()
            );
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `fa_IR (Persian, فارسی)` style label for a catalog language attribute.
pub fn describe_language(language: &str) -> String {
    let Some(tag) = LanguageTag::parse(language) else {
        return language.to_string();
    };
    match (tag.language_name(), native_name(&tag.language)) {
        (Some(english), Some(native)) if english != native => {
            format!("{} ({}, {})", language, english, native)
        }
        (Some(english), _) => format!("{} ({})", language, english),
        _ => language.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_labels() {
        assert_eq!(describe_language("hu"), "hu (Hungarian, Magyar)");
        assert_eq!(describe_language("fa_IR"), "fa_IR (Persian, فارسی)");
        assert_eq!(describe_language("xx"), "xx");
    }
}
