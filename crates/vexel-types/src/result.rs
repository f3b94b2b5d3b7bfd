//! Quality gate verdicts.

use serde::{Deserialize, Serialize};

/// Outcome of one check category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub name: String,
    pub weight: f64,
    /// 0–100 after clamping.
    pub score: u32,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// The gate's verdict on a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityGateResult {
    pub passed: bool,
    /// Weighted score, 0–100.
    pub score: u32,
    /// Blocking defects.
    pub issues: Vec<String>,
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryReport>,
}

impl QualityGateResult {
    pub fn has_issue(&self, needle: &str) -> bool {
        self.issues.iter().any(|i| i.contains(needle))
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }

    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == name)
    }
}
