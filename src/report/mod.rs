// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lint report output: terminal, JSON/YAML, SARIF, stats and diffs

pub mod diff;
pub mod formatter;
pub mod output;
pub mod sarif;
pub mod stats;

use crate::types::LintReport;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

/// Print report to console
pub fn print_report(report: &LintReport) {
    let formatter = ReportFormatter::new();
    formatter.print(report);
}
