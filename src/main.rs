// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscheck: lint, format, merge and convert Qt Linguist translation catalogs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tscheck::catalog;
use tscheck::config::LintConfig;
use tscheck::lint;
use tscheck::merge::{self, MergeOptions};
use tscheck::report::{self, diff, sarif, stats, ReportFormatter, ReportOutputFormat};
use tscheck::sweep::{self, SweepConfig};
use tscheck::translator::{self, Translator};

#[derive(Parser)]
#[command(name = "tscheck")]
#[command(version)]
#[command(about = "Lint, format, merge and convert Qt Linguist translation catalogs")]
#[command(long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Lint configuration (default: .tscheck.yaml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint one or more catalogs
    Check {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportOutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show completion figures for a catalog
    Stats {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rewrite catalogs in canonical layout
    Fmt {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Only report files that are not canonical
        #[arg(long)]
        check: bool,
    },

    /// Convert between .ts, .json and .yaml (chosen by extension)
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Update a translated catalog from a newer source template
    Merge {
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        #[arg(value_name = "EXISTING")]
        existing: PathBuf,

        /// Output file (default: overwrite EXISTING)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Discard messages the template no longer has
        #[arg(long)]
        drop_obsolete: bool,
    },

    /// Compare two catalogs
    Diff {
        #[arg(value_name = "BASE")]
        base: PathBuf,

        #[arg(value_name = "COMPARE")]
        compare: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Lint every .ts catalog under a directory
    Sweep {
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Only list catalogs with findings
        #[arg(long)]
        findings_only: bool,

        /// Minimum findings for a catalog to be listed
        #[arg(long, default_value = "0")]
        min_findings: usize,

        /// Write the report (JSON, or SARIF with --sarif) to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit SARIF instead of JSON
        #[arg(long)]
        sarif: bool,

        /// Suppress the summary table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Resolve a message the way the application would at runtime
    Lookup {
        /// Catalogs, installed in order (later ones take precedence)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        context: String,

        #[arg(long)]
        source: String,

        /// Disambiguation comment
        #[arg(long)]
        comment: Option<String>,

        /// Count for numerus messages
        #[arg(long)]
        count: Option<u64>,

        /// Values for %1, %2, ...
        #[arg(long = "arg", value_name = "VALUE")]
        args: Vec<String>,
    },

    /// List lint rules
    Rules,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = LintConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            files,
            format,
            output,
        } => {
            let reports = files
                .iter()
                .map(|file| lint::check_file(file, &config))
                .collect::<Result<Vec<_>>>()?;

            let format = format.for_output(output.as_deref());

            if format == ReportOutputFormat::Text {
                for r in &reports {
                    report::print_report(r);
                }
            } else {
                write_or_print(&format.serialize(&reports)?, output.as_deref())?;
            }

            if reports.iter().any(|r| r.fails(config.fail_on)) {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Stats { file, json } => {
            let catalog = catalog::load_any(&file)?;
            let figures = stats::compute(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&figures)?);
            } else {
                ReportFormatter::new().print_stats(
                    &file.display().to_string(),
                    &catalog.language,
                    &figures,
                );
            }
        }

        Commands::Fmt { files, check } => {
            let mut unformatted = 0;
            for file in &files {
                let original =
                    fs::read(file).with_context(|| format!("reading {}", file.display()))?;
                let parsed = catalog::load(file)?;
                let canonical = catalog::to_string(&parsed);
                if original == canonical.as_bytes() {
                    continue;
                }
                unformatted += 1;
                if check {
                    println!("{} {}", "not canonical:".yellow(), file.display());
                } else {
                    fs::write(file, &canonical)
                        .with_context(|| format!("writing {}", file.display()))?;
                    println!("{} {}", "formatted:".green(), file.display());
                }
            }
            if check && unformatted > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Convert { input, output } => {
            let catalog = catalog::load_any(&input)?;
            catalog::save_any(&catalog, &output)?;
            println!(
                "Converted {} -> {} ({} messages)",
                input.display(),
                output.display(),
                catalog.message_count()
            );
        }

        Commands::Merge {
            template,
            existing,
            output,
            drop_obsolete,
        } => {
            let template_catalog = catalog::load_any(&template)?;
            let existing_catalog = catalog::load_any(&existing)?;
            let options = MergeOptions {
                drop_obsolete,
                plural_forms: config.plural_override(&existing_catalog.language),
            };
            let outcome = merge::merge(&template_catalog, &existing_catalog, &options);
            let target = output.unwrap_or(existing);
            catalog::save_any(&outcome.catalog, &target)?;
            println!(
                "Merged into {}: {} kept, {} added, {} obsolete",
                target.display(),
                outcome.kept,
                outcome.added,
                outcome.obsoleted
            );
        }

        Commands::Diff {
            base,
            compare,
            json,
        } => {
            let base_catalog = catalog::load_any(&base)?;
            let compare_catalog = catalog::load_any(&compare)?;
            let result = diff::diff_catalogs(&base_catalog, &compare_catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{}",
                    diff::format_diff(
                        &result,
                        &base.display().to_string(),
                        &compare.display().to_string()
                    )
                );
            }
        }

        Commands::Sweep {
            directory,
            findings_only,
            min_findings,
            output,
            sarif: emit_sarif,
            quiet,
        } => {
            let sweep_config = SweepConfig {
                directory,
                findings_only,
                min_findings,
                lint: config,
            };
            let result = sweep::run(&sweep_config)?;
            sweep::print_summary(&result, quiet);

            if emit_sarif {
                let json = sarif::to_sarif_json(&result.lint_reports())?;
                write_or_print(&json, output.as_deref())?;
            } else if let Some(path) = output {
                sweep::write_report(&result, &path)?;
                eprintln!("Report saved to: {}", path.display());
            }
        }

        Commands::Lookup {
            files,
            context,
            source,
            comment,
            count,
            args,
        } => {
            let mut translator = Translator::new();
            for file in &files {
                translator.install(catalog::load_any(file)?);
            }
            let text = match count {
                Some(n) => translator
                    .translate_plural(&context, &source, comment.as_deref(), n)
                    .unwrap_or_else(|| translator::substitute_count(&source, n)),
                None => translator
                    .translate(&context, &source, comment.as_deref())
                    .unwrap_or(&source)
                    .to_string(),
            };
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            println!("{}", translator::arg(&text, &args));
        }

        Commands::Rules => {
            ReportFormatter::new().print_rules();
        }
    }

    Ok(ExitCode::SUCCESS)
}
