//! The quality gate.
//!
//! Four independent categories are folded into one weighted score:
//!
//! ```text
//! structural ×0.30 ┐
//! motif      ×0.25 ├─▶ round(Σ) ─▶ passed = score ≥ threshold ∧ no issues
//! style      ×0.25 │                        │
//! technical  ×0.20 ┘                        ▼ (passed, vision enabled)
//!                                     vision pass ─▶ warnings only
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, info, instrument, warn};
use vexel_types::{DesignIntent, QualityGateResult, SvgDocument};

use crate::checks::Category;
use crate::config::GateConfig;
use crate::error::GateResult;
use crate::vision::VisionValidator;

/// Prefix of every warning produced by the vision pass.
pub const VISION_WARNING_PREFIX: &str = "Vision check: ";

/// Scores documents against a design intent.
pub struct QualityGate {
    config: GateConfig,
    vision: Option<Arc<dyn VisionValidator>>,
}

impl QualityGate {
    /// Create a gate. The configuration is validated up front.
    pub fn new(config: GateConfig) -> GateResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vision: None,
        })
    }

    /// Attach a vision validator. It only runs when `vision_enabled` is set.
    pub fn with_vision(mut self, validator: Arc<dyn VisionValidator>) -> Self {
        self.vision = Some(validator);
        self
    }

    /// Configuration accessor.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Deterministic verdict. Same inputs, same result.
    pub fn evaluate(&self, document: &SvgDocument, intent: &DesignIntent) -> QualityGateResult {
        let categories: Vec<_> = Category::ALL
            .iter()
            .map(|category| category.report(category.run(document, intent)))
            .collect();

        let weighted: f64 = categories
            .iter()
            .map(|c| c.weight * f64::from(c.score))
            .sum();
        let score = if document.components.is_empty() {
            0
        } else {
            weighted.round().clamp(0.0, 100.0) as u32
        };

        let issues: Vec<String> = categories.iter().flat_map(|c| c.issues.clone()).collect();
        let warnings: Vec<String> = categories
            .iter()
            .flat_map(|c| c.warnings.clone())
            .collect();
        let passed = score >= self.config.pass_threshold && issues.is_empty();

        QualityGateResult {
            passed,
            score,
            issues,
            warnings,
            categories,
        }
    }

    /// Deterministic verdict plus the best-effort vision pass.
    ///
    /// The vision pass never changes `passed`, `score` or `issues`.
    #[instrument(skip_all, fields(components = document.components.len()))]
    pub async fn validate(
        &self,
        document: &SvgDocument,
        intent: &DesignIntent,
    ) -> QualityGateResult {
        let mut result = self.evaluate(document, intent);

        if result.passed && self.config.vision_enabled {
            match &self.vision {
                Some(vision) => {
                    let notes = self.run_vision(vision.as_ref(), document, intent).await;
                    result
                        .warnings
                        .extend(notes.into_iter().map(|n| format!("{}{}", VISION_WARNING_PREFIX, n)));
                }
                None => debug!("Vision pass enabled but no validator attached"),
            }
        }

        info!(
            passed = result.passed,
            score = result.score,
            issues = result.issues.len(),
            warnings = result.warnings.len(),
            "Quality gate evaluated"
        );
        result
    }

    /// Run the vision validator under the configured timeout. Every failure
    /// path, panics included, resolves to notes.
    async fn run_vision(
        &self,
        vision: &dyn VisionValidator,
        document: &SvgDocument,
        intent: &DesignIntent,
    ) -> Vec<String> {
        let timeout_ms = self.config.vision_timeout_ms;
        let outcome = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            AssertUnwindSafe(vision.inspect(document, intent)).catch_unwind(),
        )
        .await;

        match outcome {
            Ok(Ok(Ok(verdict))) if verdict.approved => {
                debug!(validator = vision.name(), confidence = verdict.confidence, "Vision approved");
                Vec::new()
            }
            Ok(Ok(Ok(verdict))) => {
                warn!(validator = vision.name(), confidence = verdict.confidence, "Vision rejected document");
                if verdict.notes.is_empty() {
                    vec![format!("{} did not approve the document", vision.name())]
                } else {
                    verdict.notes
                }
            }
            Ok(Ok(Err(e))) => {
                warn!(validator = vision.name(), error = %e, "Vision check failed");
                vec![e.to_string()]
            }
            Ok(Err(payload)) => {
                let message = panic_message(payload.as_ref());
                warn!(validator = vision.name(), panic = %message, "Vision validator panicked");
                vec![format!("{} panicked: {}", vision.name(), message)]
            }
            Err(_) => {
                warn!(validator = vision.name(), timeout_ms, "Vision check timed out");
                vec![format!("timed out after {}ms", timeout_ms)]
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
