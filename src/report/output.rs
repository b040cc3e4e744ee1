// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for printed/exported lint reports

use crate::report::sarif;
use crate::types::LintReport;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Text,
    Json,
    Yaml,
    Sarif,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportOutputFormat::Text),
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            "sarif" => Some(ReportOutputFormat::Sarif),
            _ => None,
        }
    }

    /// Format actually written for `--format self -o output`. Text is only
    /// printed to the terminal, so a text report sent to a file takes the
    /// format named by the file's extension, and JSON when that names none.
    pub fn for_output(self, output: Option<&Path>) -> Self {
        match (self, output) {
            (ReportOutputFormat::Text, Some(path)) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ReportOutputFormat::parse)
                .filter(|format| *format != ReportOutputFormat::Text)
                .unwrap_or(ReportOutputFormat::Json),
            (format, _) => format,
        }
    }

    /// Serialize one or more reports. JSON and YAML emit a bare report for a
    /// single file and a list otherwise; SARIF always emits a single run.
    pub fn serialize(&self, reports: &[LintReport]) -> Result<String> {
        match self {
            ReportOutputFormat::Text => bail!("text output is printed, not serialized"),
            ReportOutputFormat::Json => match reports {
                [single] => Ok(serde_json::to_string_pretty(single)?),
                many => Ok(serde_json::to_string_pretty(many)?),
            },
            ReportOutputFormat::Yaml => match reports {
                [single] => Ok(serde_yaml::to_string(single)?),
                many => Ok(serde_yaml::to_string(many)?),
            },
            ReportOutputFormat::Sarif => sarif::to_sarif_json(reports),
        }
    }
}
