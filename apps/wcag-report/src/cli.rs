//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wcag-report",
    version,
    about = "Structured WCAG compliance reports from axe-core results",
    long_about = "wcag-report turns raw axe-core audit output (violations, passes, incomplete) into a report grouped by severity and topic, with WCAG criteria and remediation steps per failing element.\n\nConfiguration precedence: CLI > wcag-report.toml > defaults.",
    after_help = "Examples:\n  wcag-report report results.json --url https://example.com\n  cat results.json | wcag-report report --output json\n  wcag-report batch 'scans/*.json' --fail-on serious\n  wcag-report rules --guidance a11y/guidance.toml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, global = true, action = clap::ArgAction::SetTrue, help = "Log pipeline stages to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for reporting and inspecting guidance.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current wcag-report version.")]
    Version,
    /// Build a report from one audit result
    #[command(
        about = "Build a report from one audit result",
        long_about = "Read an axe-core result (file or stdin) and print the processed report. Exits 1 when --fail-on is set and issues at or above that severity exist.",
        after_help = "Examples:\n  wcag-report report results.json\n  wcag-report report - --url https://example.com --output json"
    )]
    Report {
        #[arg(help = "Audit result JSON file; '-' or absent reads stdin")]
        input: Option<String>,
        #[arg(long, help = "Page URL (default: the audit's own url)")]
        url: Option<String>,
        #[arg(long, help = "Root for config discovery (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Guidance TOML layered over the built-in table")]
        guidance: Option<String>,
        #[arg(long, help = "Fail when issues of this severity or worse exist: critical|serious|moderate|minor")]
        fail_on: Option<String>,
    },
    /// Build reports for many saved audit results
    #[command(
        about = "Build reports for many audit results",
        long_about = "Expand glob patterns relative to the root, process every matched file in parallel and print results sorted by file.",
        after_help = "Examples:\n  wcag-report batch 'scans/*.json'\n  wcag-report batch --output json"
    )]
    Batch {
        #[arg(help = "Glob patterns (default: [batch].patterns from config)")]
        patterns: Vec<String>,
        #[arg(long, help = "Root for config discovery and patterns (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Guidance TOML layered over the built-in table")]
        guidance: Option<String>,
        #[arg(long, help = "Fail when issues of this severity or worse exist in any file")]
        fail_on: Option<String>,
    },
    /// List remediation guidance
    #[command(
        about = "List remediation guidance",
        long_about = "Print the effective guidance table: built-in entries plus configured overrides."
    )]
    Rules {
        #[arg(long, help = "Root for config discovery (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Guidance TOML layered over the built-in table")]
        guidance: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_args() {
        let cli = Cli::try_parse_from([
            "wcag-report",
            "report",
            "r.json",
            "--url",
            "https://e.x",
            "--fail-on",
            "serious",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.cmd {
            Commands::Report {
                input, url, fail_on, ..
            } => {
                assert_eq!(input.as_deref(), Some("r.json"));
                assert_eq!(url.as_deref(), Some("https://e.x"));
                assert_eq!(fail_on.as_deref(), Some("serious"));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_parse_batch_patterns() {
        let cli = Cli::try_parse_from(["wcag-report", "batch", "a/*.json", "b/*.json"]).unwrap();
        match cli.cmd {
            Commands::Batch { patterns, .. } => assert_eq!(patterns.len(), 2),
            _ => panic!("expected batch"),
        }
    }
}
