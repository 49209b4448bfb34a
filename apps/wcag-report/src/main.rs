//! wcag-report CLI binary entry point.
//! Loads audit results, delegates to the library pipeline and prints results.

use clap::Parser;
use std::borrow::Cow;
use std::io;
use std::path::Path;
use tracing::debug;
use wcag_report::batch::{load_audit, read_audit, run_batch};
use wcag_report::cli::{Cli, Commands};
use wcag_report::config::{self, CliOverrides, Effective};
use wcag_report::models::ErrorEnvelope;
use wcag_report::remediation::GuidanceTable;
use wcag_report::report::{build_report_with, ReportOptions};
use wcag_report::{output, utils};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn resolve_or_exit(cli: CliOverrides) -> Effective {
    match config::resolve_effective(&cli) {
        Ok(eff) => {
            if let Ok(None) = config::load_config(&eff.root) {
                debug!(root = %eff.root.display(), "no wcag-report config found; using defaults");
            }
            eff
        }
        Err(msg) => {
            eprintln!("{} {}", utils::error_prefix(), msg);
            std::process::exit(2);
        }
    }
}

fn exit_with(envelope: ErrorEnvelope, output_mode: &str) -> ! {
    output::print_error(&envelope, output_mode);
    std::process::exit(2);
}

/// Built-in table, or the configured overrides layered over it.
fn guidance_or_exit(eff: &Effective) -> Cow<'static, GuidanceTable> {
    match eff.guidance.as_ref() {
        Some(p) => match GuidanceTable::load(p) {
            Ok(t) => Cow::Owned(t),
            Err(e) => exit_with(ErrorEnvelope::processing(e.to_string()), &eff.output),
        },
        None => Cow::Borrowed(GuidanceTable::builtin()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Report {
            input,
            url,
            root,
            output,
            guidance,
            fail_on,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                root: root.as_deref(),
                output: output.as_deref(),
                guidance: guidance.as_deref(),
                fail_on: fail_on.as_deref(),
                patterns: &[],
            });
            let table = guidance_or_exit(&eff);
            let raw = match input.as_deref() {
                None | Some("-") => read_audit(io::stdin().lock()),
                Some(p) => load_audit(Path::new(p)),
            };
            let raw = match raw {
                Ok(r) => r,
                Err(e) => exit_with(ErrorEnvelope::processing(e.to_string()), &eff.output),
            };
            let report = build_report_with(
                raw,
                url.as_deref(),
                &ReportOptions {
                    guidance: &table,
                    timestamp: None,
                },
            );
            output::print_report(&report, &eff.output, eff.pretty);
            if let Some(threshold) = eff.fail_on {
                if report.summary.issues_at_or_above(threshold) > 0 {
                    std::process::exit(1);
                }
            }
        }
        Commands::Batch {
            patterns,
            root,
            output,
            guidance,
            fail_on,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                root: root.as_deref(),
                output: output.as_deref(),
                guidance: guidance.as_deref(),
                fail_on: fail_on.as_deref(),
                patterns: &patterns,
            });
            if eff.patterns.is_empty() {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    "No input patterns. Pass patterns or set [batch].patterns in wcag-report.toml."
                );
                std::process::exit(2);
            }
            let table = guidance_or_exit(&eff);
            let opts = ReportOptions {
                guidance: &table,
                timestamp: None,
            };
            let res = match run_batch(&eff.root, &eff.patterns, &opts) {
                Ok(r) => r,
                Err(e) => exit_with(ErrorEnvelope::processing(e.to_string()), &eff.output),
            };
            if res.results.is_empty() && eff.output != "json" {
                eprintln!(
                    "{} No files matched [{}]",
                    utils::note_prefix(),
                    eff.patterns.join(", ")
                );
            }
            output::print_batch(&res, &eff.output, eff.pretty);
            let code = res.exit_code(eff.fail_on);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Rules {
            root,
            output,
            guidance,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                root: root.as_deref(),
                output: output.as_deref(),
                guidance: guidance.as_deref(),
                fail_on: None,
                patterns: &[],
            });
            if let Some(p) = eff.guidance.as_ref() {
                eprintln!(
                    "{} Using guidance overrides from {}",
                    utils::info_prefix(),
                    p.display()
                );
            }
            let table = guidance_or_exit(&eff);
            output::print_rules(&table, &eff.output, eff.pretty);
        }
    }
}
