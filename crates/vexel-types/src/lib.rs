//! # vexel-types
//!
//! Shared data model for the Vexel synthesis pipeline:
//!
//! ```text
//! CompositionPlan + GroundingContext ──▶ Synthesizer ──▶ SvgDocument
//!                                                           │
//!                              DesignIntent ──▶ QualityGate ◀┘
//!                                                   │
//!                                          QualityGateResult
//! ```
//!
//! Besides plain data, this crate owns the numeric discipline every
//! producer must follow (finite, two decimals) and the closed
//! [`ShapeKind`] union with its geometry operations.

#![deny(unsafe_code)]

pub mod document;
pub mod intent;
pub mod numeric;
pub mod path;
pub mod plan;
pub mod result;
pub mod shape;

pub use document::{
    is_paint, number, text, AttributeValue, Attributes, Component, ComponentMetadata,
    DocumentMetadata, SvgDocument,
};
pub use intent::{DesignIntent, IntentConstraints, LayoutIntent, StrokeRules, StyleIntent};
pub use numeric::{decimal_places, format_number, round2, sanitize, NumericError};
pub use path::PathError;
pub use plan::{
    Bounds, ComponentPlan, CompositionPlan, GroundingContext, Layout, MotifRef, Position, Size,
    Style, StylePack, SynthesisContext,
};
pub use result::{CategoryReport, QualityGateResult};
pub use shape::{Frame, ShapeKind};
