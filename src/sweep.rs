// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sweep: batch linting of every catalog under a directory
//!
//! Walks a directory tree, finds `*.ts` files whose root element is `<TS>`
//! (TypeScript sources are skipped), lints each one on the rayon pool, and
//! produces a summary report sorted by finding count (highest first). A file
//! that fails to parse is recorded with its error and the sweep continues.

use crate::catalog;
use crate::config::LintConfig;
use crate::lint;
use crate::types::{LintReport, Severity};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for a sweep run
pub struct SweepConfig {
    /// Directory to search for catalogs
    pub directory: PathBuf,
    /// Only show files with findings
    pub findings_only: bool,
    /// Minimum number of findings to include
    pub min_findings: usize,
    pub lint: LintConfig,
}

/// Results from linting a single catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    pub finding_count: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub messages: usize,
    pub completion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub report: Option<LintReport>,
}

impl FileResult {
    fn from_report(path: PathBuf, report: LintReport) -> Self {
        Self {
            path,
            language: report.language.clone(),
            finding_count: report.findings.len(),
            critical_count: report.count(Severity::Critical),
            high_count: report.count(Severity::High),
            medium_count: report.count(Severity::Medium),
            low_count: report.count(Severity::Low),
            messages: report.stats.messages,
            completion: report.stats.completion,
            error: None,
            report: Some(report),
        }
    }

    fn from_error(path: PathBuf, error: &anyhow::Error) -> Self {
        Self {
            path,
            language: String::new(),
            finding_count: 0,
            critical_count: 0,
            high_count: 0,
            medium_count: 0,
            low_count: 0,
            messages: 0,
            completion: 0.0,
            error: Some(format!("{:#}", error)),
            report: None,
        }
    }
}

/// Complete sweep report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub files_scanned: usize,
    pub files_with_findings: usize,
    pub files_with_errors: usize,
    pub total_findings: usize,
    pub total_critical: usize,
    pub total_high: usize,
    pub results: Vec<FileResult>,
}

impl SweepReport {
    /// Lint reports of the files that parsed, in result order.
    pub fn lint_reports(&self) -> Vec<LintReport> {
        self.results
            .iter()
            .filter_map(|r| r.report.clone())
            .collect()
    }
}

/// Find all `.ts` catalogs under the given directory
fn discover_catalogs(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut catalogs: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .collect();

    catalogs.sort();
    Ok(catalogs)
}

/// Run sweep across all catalogs in a directory
pub fn run(config: &SweepConfig) -> Result<SweepReport> {
    let catalogs = discover_catalogs(&config.directory)?;
    debug!(
        directory = %config.directory.display(),
        candidates = catalogs.len(),
        "sweeping catalogs"
    );

    // TypeScript sources share the extension.
    let mut results: Vec<FileResult> = catalogs
        .par_iter()
        .filter(|path| {
            let is_catalog = catalog::is_catalog_file(path);
            if !is_catalog {
                debug!(path = %path.display(), "not a Qt Linguist catalog, skipping");
            }
            is_catalog
        })
        .map(|path| match lint::check_file(path, &config.lint) {
            Ok(report) => FileResult::from_report(path.clone(), report),
            Err(e) => {
                warn!(path = %path.display(), "failed to load catalog: {:#}", e);
                FileResult::from_error(path.clone(), &e)
            }
        })
        .collect();

    let files_scanned = results.len();

    // Most findings first, path order within equal counts
    results.sort_by(|a, b| {
        b.finding_count
            .cmp(&a.finding_count)
            .then_with(|| a.path.cmp(&b.path))
    });

    // Apply filters; parse errors always stay visible
    if config.findings_only {
        results.retain(|r| r.finding_count > 0 || r.error.is_some());
    }
    if config.min_findings > 0 {
        results.retain(|r| r.finding_count >= config.min_findings || r.error.is_some());
    }

    let files_with_findings = results.iter().filter(|r| r.finding_count > 0).count();
    let files_with_errors = results.iter().filter(|r| r.error.is_some()).count();
    let total_findings: usize = results.iter().map(|r| r.finding_count).sum();
    let total_critical: usize = results.iter().map(|r| r.critical_count).sum();
    let total_high: usize = results.iter().map(|r| r.high_count).sum();

    Ok(SweepReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        directory: config.directory.clone(),
        files_scanned,
        files_with_findings,
        files_with_errors,
        total_findings,
        total_critical,
        total_high,
        results,
    })
}

fn display_name(report: &SweepReport, path: &Path) -> String {
    path.strip_prefix(&report.directory)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print a summary table to the terminal
pub fn print_summary(report: &SweepReport, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n=== SWEEP SUMMARY ===");
    println!(
        "Directory: {}  |  Catalogs scanned: {}  |  With findings: {}  |  Errors: {}",
        report.directory.display(),
        report.files_scanned,
        report.files_with_findings,
        report.files_with_errors
    );
    println!(
        "Total findings: {}  |  Critical: {}  |  High: {}",
        report.total_findings, report.total_critical, report.total_high
    );
    println!();

    if report.results.is_empty() {
        println!("  No catalogs with findings.");
        return;
    }

    println!(
        "  {:<40} {:<7} {:>6} {:>5} {:>5} {:>5} {:>5} {:>7}",
        "Catalog", "Lang", "Total", "Crit", "High", "Med", "Low", "Done"
    );
    println!("  {}", "-".repeat(86));

    // Show top 20 catalogs
    for result in report.results.iter().take(20) {
        let name = display_name(report, &result.path);
        if let Some(err) = &result.error {
            println!("  {:<40} ERROR: {}", name, err);
        } else {
            println!(
                "  {:<40} {:<7} {:>6} {:>5} {:>5} {:>5} {:>5} {:>6.1}%",
                name,
                result.language,
                result.finding_count,
                result.critical_count,
                result.high_count,
                result.medium_count,
                result.low_count,
                result.completion,
            );
        }
    }

    if report.results.len() > 20 {
        println!("  ... and {} more catalogs", report.results.len() - 20);
    }
    println!();
}

/// Write sweep report as JSON
pub fn write_report(report: &SweepReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
