//! Configuration for the vexel CLI

use serde::{Deserialize, Serialize};
use vexel_gate::GateConfig;
use vexel_repair::RepairConfig;
use vexel_synth::SynthesizerConfig;

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VexelConfig {
    /// Synthesizer configuration
    #[serde(default)]
    pub synth: SynthesizerConfig,

    /// Quality gate configuration
    #[serde(default)]
    pub gate: GateConfig,

    /// Repair loop configuration
    #[serde(default)]
    pub repair: RepairConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl VexelConfig {
    /// Load configuration: defaults, then the optional file, then `VEXEL_`
    /// environment variables (`VEXEL_GATE__PASS_THRESHOLD=80`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&VexelConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("VEXEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VexelConfig::default();
        assert_eq!(config.gate.pass_threshold, 70);
        assert!(!config.gate.vision_enabled);
        assert_eq!(config.repair.max_attempts, 3);
        assert_eq!(config.synth.default_model, "vexel-procedural");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vexel.json");
        std::fs::write(
            &path,
            r#"{"gate": {"pass_threshold": 85}, "repair": {"max_attempts": 5}}"#,
        )
        .unwrap();

        let config = VexelConfig::load(path.to_str()).unwrap();
        assert_eq!(config.gate.pass_threshold, 85);
        assert_eq!(config.gate.vision_timeout_ms, 5000);
        assert_eq!(config.repair.max_attempts, 5);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let config = VexelConfig::load(Some("/nonexistent/vexel")).unwrap();
        assert_eq!(config.gate.pass_threshold, 70);
    }
}
