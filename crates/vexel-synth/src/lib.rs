//! # vexel-synth
//!
//! Deterministic lowering of composition plans into concrete vector documents.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │ CompositionPlan  │   │ GroundingContext │
//! └────────┬─────────┘   └────────┬─────────┘
//!          └──────────┬───────────┘
//!                     ▼
//!             ┌───────────────┐      ┌──────────────────┐
//!             │  Synthesizer  │─────▶│ ComponentLibrary │
//!             └───────┬───────┘      └──────────────────┘
//!                     ▼
//!               SvgDocument ──▶ render_svg ──▶ markup
//! ```
//!
//! Every numeric attribute written into a document is finite and rounded to
//! two decimals. Schema diagnostics are logged but never fail a call.

#![deny(unsafe_code)]

pub mod adapt;
pub mod error;
pub mod library;
pub mod palette;
pub mod render;
pub mod schema;
pub mod synthesizer;

pub use error::{LibraryError, SynthesisError, SynthesisResult};
pub use library::{ComponentLibrary, InMemoryLibrary, Template, TemplateQuery};
pub use render::render_svg;
pub use schema::{check_document, SchemaViolation};
pub use synthesizer::{validate_plan, Synthesizer, SynthesizerConfig};
