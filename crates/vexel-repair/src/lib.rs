//! # vexel-repair
//!
//! Repair for documents the quality gate rejects.
//!
//! - [`DocumentRepairer`]: structured fixes on an `SvgDocument`
//! - [`MarkupRepairer`]: text fixes on SVG markup from other producers
//! - [`RepairLoop`]: bounded validate → repair driver

#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod markup;
pub mod repair_loop;

pub use document::{DocumentRepairer, RepairAction, RepairReport, FALLBACK_BOUNDS};
pub use error::{RepairError, RepairResult};
pub use markup::{MarkupFix, MarkupRepairer, MarkupReport};
pub use repair_loop::{RepairConfig, RepairLoop, RepairOutcome};
