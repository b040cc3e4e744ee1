// SPDX-License-Identifier: PMPL-1.0-or-later

//! SARIF 2.1.0 output for code scanning
//!
//! All linted catalogs go into a single run. Each catalog is listed as an
//! artifact tagged with its language, and each finding becomes a result
//! pointing at the catalog line of its `<message>` or `<context>`.
//! See: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::types::{LintReport, LintRule, Severity};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Debug, Serialize)]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub version: &'static str,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRun {
    pub tool: SarifTool,
    pub artifacts: Vec<SarifArtifact>,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifDriver {
    pub name: &'static str,
    pub version: &'static str,
    pub information_uri: &'static str,
    pub rules: Vec<SarifRule>,
}

/// One lint rule, with its kebab name as the SARIF `name`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: &'static str,
    pub name: &'static str,
    pub short_description: SarifText,
    pub default_configuration: SarifRuleConfiguration,
    pub properties: SarifRuleProperties,
}

#[derive(Debug, Serialize)]
pub struct SarifRuleConfiguration {
    pub enabled: bool,
    pub level: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SarifRuleProperties {
    pub tags: Vec<&'static str>,
}

/// A linted catalog file.
#[derive(Debug, Serialize)]
pub struct SarifArtifact {
    pub location: SarifArtifactLocation,
    pub properties: SarifArtifactProperties,
}

#[derive(Debug, Serialize)]
pub struct SarifArtifactProperties {
    pub language: String,
    pub messages: usize,
    pub completion: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: &'static str,
    pub level: &'static str,
    pub message: SarifText,
    pub locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SarifResultProperties>,
}

/// Catalog coordinates of a message-level finding
#[derive(Debug, Serialize)]
pub struct SarifResultProperties {
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SarifText {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<SarifRegion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
    pub index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: u32,
}

/// Critical and high findings block a release; medium is a warning.
fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

fn rule_tags(rule: LintRule) -> Vec<&'static str> {
    let kind = match rule {
        LintRule::DuplicateContext | LintRule::DuplicateMessage | LintRule::EmptyContext => {
            "structure"
        }
        LintRule::NumerusFormCount | LintRule::UnknownLanguage => "plural",
        LintRule::PlaceholderMismatch => "placeholder",
        LintRule::AcceleratorMismatch
        | LintRule::SurroundingWhitespace
        | LintRule::EndingPunctuation => "style",
        LintRule::Untranslated => "completeness",
    };
    vec!["translation", kind]
}

fn rule_descriptor(rule: LintRule) -> SarifRule {
    SarifRule {
        id: rule.code(),
        name: rule.name(),
        short_description: SarifText {
            text: rule.description().to_string(),
        },
        default_configuration: SarifRuleConfiguration {
            enabled: rule.default_enabled(),
            level: sarif_level(rule.default_severity()),
        },
        properties: SarifRuleProperties {
            tags: rule_tags(rule),
        },
    }
}

fn artifact_uri(report: &LintReport) -> String {
    match &report.file {
        Some(path) => path.to_string_lossy().replace('\\', "/"),
        None => format!("{}.ts", report.language),
    }
}

/// Convert lint reports to a SARIF log
pub fn to_sarif(reports: &[LintReport]) -> Result<SarifLog> {
    let rules: Vec<SarifRule> = reports
        .iter()
        .flat_map(|r| r.findings.iter().map(|f| f.rule))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(rule_descriptor)
        .collect();

    let mut artifacts = Vec::with_capacity(reports.len());
    let mut results = Vec::new();
    for (index, report) in reports.iter().enumerate() {
        let location = SarifArtifactLocation {
            uri: artifact_uri(report),
            index,
        };

        results.extend(report.findings.iter().map(|finding| SarifResult {
            rule_id: finding.rule.code(),
            level: sarif_level(finding.severity),
            message: SarifText {
                text: finding.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: location.clone(),
                    region: finding.line.map(|start_line| SarifRegion { start_line }),
                },
            }],
            properties: finding
                .context
                .as_ref()
                .map(|context| SarifResultProperties {
                    context: context.clone(),
                    source: finding.source.clone(),
                }),
        }));

        artifacts.push(SarifArtifact {
            location,
            properties: SarifArtifactProperties {
                language: report.language.clone(),
                messages: report.stats.messages,
                completion: report.stats.completion,
            },
        });
    }

    Ok(SarifLog {
        schema: SARIF_SCHEMA,
        version: SARIF_VERSION,
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "tscheck",
                    version: env!("CARGO_PKG_VERSION"),
                    information_uri: env!("CARGO_PKG_REPOSITORY"),
                    rules,
                },
            },
            artifacts,
            results,
        }],
    })
}

/// Serialize lint reports as a SARIF JSON string
pub fn to_sarif_json(reports: &[LintReport]) -> Result<String> {
    let log = to_sarif(reports)?;
    Ok(serde_json::to_string_pretty(&log)?)
}
