//! Configuration discovery and effective settings resolution.
//!
//! wcag-report reads `wcag-report.toml|yaml|yml` from the working root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `pretty`: true
//! - `guidance`: none (built-in table only)
//! - `fail_on`: none (never fail on findings)
//! - `batch.patterns`: empty
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::classify::Severity;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["wcag-report.toml", "wcag-report.yaml", "wcag-report.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `wcag-report.toml|yaml`.
pub struct ReportConfig {
    pub output: Option<String>,
    pub pretty: Option<bool>,
    /// Guidance TOML path, relative to the root.
    pub guidance: Option<String>,
    pub fail_on: Option<String>,
    #[serde(default)]
    pub batch: Option<BatchCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Batch section under `[batch]`.
pub struct BatchCfg {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub pretty: bool,
    pub guidance: Option<PathBuf>,
    pub fail_on: Option<Severity>,
    pub patterns: Vec<String>,
}

/// CLI-side values; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub guidance: Option<&'a str>,
    pub fail_on: Option<&'a str>,
    pub patterns: &'a [String],
}

/// Walk upward from `start` to detect the root.
///
/// Stops when a `wcag-report.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ReportConfig` from `wcag-report.toml` or `wcag-report.yaml|yml`.
///
/// `Ok(None)` when no config file exists. An unreadable or invalid file is
/// an error, never silently replaced by defaults.
pub fn load_config(root: &Path) -> Result<Option<ReportConfig>, String> {
    let toml_path = root.join(CONFIG_NAMES[0]);
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        return toml::from_str(&s)
            .map(Some)
            .map_err(|e| format!("invalid config {}: {}", toml_path.display(), e));
    }
    for yml in &CONFIG_NAMES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            return serde_yaml::from_str(&s)
                .map(Some)
                .map_err(|e| format!("invalid config {}: {}", p.display(), e));
        }
    }
    Ok(None)
}

fn read_config(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read config {}: {}", path.display(), e))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// Returns an error message for an invalid config file or for values no
/// layer can interpret (unknown output mode or severity).
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, String> {
    let start = PathBuf::from(cli.root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root)?.unwrap_or_default();

    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(format!("unknown output mode '{}' (expected human|json)", output));
    }

    let pretty = cfg.pretty.unwrap_or(true);

    // CLI paths are relative to the cwd, config paths to the root
    let guidance = match cli.guidance {
        Some(g) => Some(PathBuf::from(g)),
        None => cfg.guidance.map(|g| root.join(g)),
    };

    let fail_on = match cli.fail_on.map(|s| s.to_string()).or(cfg.fail_on) {
        Some(s) => Some(
            Severity::parse(&s)
                .ok_or_else(|| format!("unknown severity '{}' for fail-on", s))?,
        ),
        None => None,
    };

    let patterns = if cli.patterns.is_empty() {
        cfg.batch.map(|b| b.patterns).unwrap_or_default()
    } else {
        cli.patterns.to_vec()
    };

    Ok(Effective {
        root,
        output,
        pretty,
        guidance,
        fail_on,
        patterns,
    })
}
