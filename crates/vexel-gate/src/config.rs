use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Quality gate configuration, injected at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum weighted score for a pass (default: 70)
    pub pass_threshold: u32,
    /// Run the vision pass after a deterministic pass (default: false)
    pub vision_enabled: bool,
    /// Upper bound on one vision call in milliseconds (default: 5000)
    pub vision_timeout_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            pass_threshold: 70,
            vision_enabled: false,
            vision_timeout_ms: 5000,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> GateResult<()> {
        if self.pass_threshold > 100 {
            return Err(GateError::InvalidConfig(format!(
                "pass_threshold must be at most 100, got {}",
                self.pass_threshold
            )));
        }
        if self.vision_enabled && self.vision_timeout_ms == 0 {
            return Err(GateError::InvalidConfig(
                "vision_timeout_ms must be positive when vision is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
