//! Best-effort vision side channel.
//!
//! A vision validator looks at the rendered document and gives a second
//! opinion. It only runs after the deterministic checks already passed, and
//! its outcome is only ever reported as warnings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vexel_types::{DesignIntent, SvgDocument};

use crate::error::VisionError;

/// A vision model's opinion of a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisionVerdict {
    pub approved: bool,
    /// 0.0–1.0
    pub confidence: f64,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl VisionVerdict {
    pub fn approve(confidence: f64) -> Self {
        Self {
            approved: true,
            confidence: confidence.clamp(0.0, 1.0),
            notes: Vec::new(),
        }
    }

    pub fn reject(confidence: f64, notes: Vec<String>) -> Self {
        Self {
            approved: false,
            confidence: confidence.clamp(0.0, 1.0),
            notes,
        }
    }
}

/// Second-opinion validator backed by a vision model.
#[async_trait]
pub trait VisionValidator: Send + Sync {
    fn name(&self) -> &str;

    async fn inspect(
        &self,
        document: &SvgDocument,
        intent: &DesignIntent,
    ) -> Result<VisionVerdict, VisionError>;
}
