//! Bounded validate → repair cycles.
//!
//! Cycles are strictly sequential for one document. Different documents can
//! be repaired concurrently: the loop holds no per-document state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use vexel_gate::QualityGate;
use vexel_types::{DesignIntent, QualityGateResult, SvgDocument};

use crate::document::{DocumentRepairer, RepairAction};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Repair passes before giving up (default: 3)
    pub max_attempts: u32,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Final state of a repair loop run.
#[derive(Clone, Debug, PartialEq)]
pub struct RepairOutcome {
    pub passed: bool,
    /// Repair passes applied.
    pub attempts: u32,
    /// Verdict on `document`.
    pub result: QualityGateResult,
    pub document: SvgDocument,
    /// Every action applied, across all passes.
    pub actions: Vec<RepairAction>,
    /// Errors reported by the last repair pass.
    pub errors: Vec<String>,
    /// The document did not pass; the caller should fall back.
    pub fallback_recommended: bool,
}

pub struct RepairLoop {
    gate: Arc<QualityGate>,
    repairer: DocumentRepairer,
    config: RepairConfig,
}

impl RepairLoop {
    pub fn new(gate: Arc<QualityGate>, config: RepairConfig) -> Self {
        Self {
            gate,
            repairer: DocumentRepairer::new(),
            config,
        }
    }

    pub fn with_repairer(mut self, repairer: DocumentRepairer) -> Self {
        self.repairer = repairer;
        self
    }

    /// Validate, and while failing, repair and re-validate.
    ///
    /// Stops when the gate passes, when a repair pass changes nothing, or
    /// after `max_attempts` repair passes.
    #[instrument(skip_all, fields(max_attempts = self.config.max_attempts))]
    pub async fn run(&self, document: SvgDocument, intent: &DesignIntent) -> RepairOutcome {
        let mut document = document;
        let mut attempts = 0;
        let mut actions = Vec::new();
        let mut errors = Vec::new();

        let result = loop {
            let result = self.gate.validate(&document, intent).await;
            if result.passed || attempts >= self.config.max_attempts {
                break result;
            }

            let report = self.repairer.repair(&document, intent);
            errors = report.errors;
            match report.repaired_document {
                Some(repaired) if report.success => {
                    attempts += 1;
                    actions.extend(report.actions);
                    document = repaired;
                }
                _ => {
                    warn!(attempts, score = result.score, "Repair pass changed nothing");
                    break result;
                }
            }
        };

        let passed = result.passed;
        if passed {
            info!(attempts, score = result.score, "Document passed the quality gate");
        } else {
            warn!(
                attempts,
                score = result.score,
                issues = result.issues.len(),
                "Repair loop gave up; fallback recommended"
            );
        }

        RepairOutcome {
            passed,
            attempts,
            result,
            document,
            actions,
            errors,
            fallback_recommended: !passed,
        }
    }
}
