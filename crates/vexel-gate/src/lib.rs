//! # vexel-gate
//!
//! Rule-based quality gate for synthesized vector documents.
//!
//! A verdict is data, never an error: every defect comes back as an issue
//! (blocking) or a warning (non-blocking) alongside a 0–100 score. The
//! optional vision pass is fenced behind a timeout and can only add
//! warnings.

#![deny(unsafe_code)]

pub mod checks;
pub mod config;
pub mod error;
pub mod gate;
pub mod mocks;
pub mod rules;
pub mod vision;

pub use checks::{Category, CheckOutcome, MIN_STROKE_WIDTH};
pub use config::GateConfig;
pub use error::{GateError, GateResult, VisionError};
pub use gate::{QualityGate, VISION_WARNING_PREFIX};
pub use mocks::{MockBehavior, MockVisionValidator};
pub use rules::{
    validate_component_reuse, validate_element_count, validate_motifs, validate_stroke_only,
    RuleOutcome,
};
pub use vision::{VisionValidator, VisionVerdict};
