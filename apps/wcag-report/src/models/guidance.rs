//! Guidance schema: canned remediation advice keyed by rule id.
//!
//! Guidance files are TOML with one table per rule:
//!
//! ```toml
//! [rules.duplicate-id]
//! issue = "IDs must be unique"
//! steps = ["Rename duplicated ids", "Re-run the audit"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
/// Issue description plus ordered remediation steps.
pub struct Guidance {
    pub issue: String,
    pub steps: Vec<String>,
}

#[derive(Deserialize, Default)]
/// Root of a guidance TOML file.
pub struct GuidanceFile {
    #[serde(default)]
    pub rules: BTreeMap<String, Guidance>,
}
