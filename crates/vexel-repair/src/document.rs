//! Structured repair of an `SvgDocument`.
//!
//! Transforms run in a fixed order:
//!
//! 1. non-finite numeric attributes are zeroed
//! 2. stroke widths below the minimum are clamped up
//! 3. fills are removed when stroke-only is required
//! 4. excess components are truncated to `maxElements`
//! 5. invalid bounds are replaced by the components' extent
//! 6. numbers are rounded to two decimals
//!
//! Defects that no transform can address (missing motifs, broken shape
//! data, an empty document) are reported as errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vexel_gate::MIN_STROKE_WIDTH;
use vexel_types::numeric::MAX_DECIMALS;
use vexel_types::{
    decimal_places, format_number, round2, AttributeValue, Bounds, DesignIntent, SvgDocument,
};

/// Viewport used when bounds are invalid and no component has a usable extent.
pub const FALLBACK_BOUNDS: Bounds = Bounds {
    width: 512.0,
    height: 512.0,
};

/// One applied fix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepairAction {
    NonFiniteZeroed { component: String, attribute: String },
    StrokeWidthClamped { component: String, from: f64, to: f64 },
    FillRemoved { component: String },
    Truncated { from: usize, to: usize },
    BoundsReplaced { width: f64, height: f64 },
    PrecisionRounded { count: usize },
}

impl fmt::Display for RepairAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairAction::NonFiniteZeroed {
                component,
                attribute,
            } => write!(f, "zeroed non-finite {} on {}", attribute, component),
            RepairAction::StrokeWidthClamped { component, from, to } => write!(
                f,
                "clamped stroke width of {} from {} to {}",
                component,
                format_number(*from),
                format_number(*to)
            ),
            RepairAction::FillRemoved { component } => write!(f, "removed fill from {}", component),
            RepairAction::Truncated { from, to } => {
                write!(f, "truncated components from {} to {}", from, to)
            }
            RepairAction::BoundsReplaced { width, height } => write!(
                f,
                "replaced bounds with {}x{}",
                format_number(*width),
                format_number(*height)
            ),
            RepairAction::PrecisionRounded { count } => {
                write!(f, "rounded {} numbers to {} decimals", count, MAX_DECIMALS)
            }
        }
    }
}

/// Outcome of one repair pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepairReport {
    /// At least one transform applied.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired_document: Option<SvgDocument>,
    pub actions: Vec<RepairAction>,
    /// Defects left unrepaired.
    pub errors: Vec<String>,
}

/// Applies the structured transforms.
#[derive(Clone, Debug)]
pub struct DocumentRepairer {
    fallback_bounds: Bounds,
}

impl Default for DocumentRepairer {
    fn default() -> Self {
        Self {
            fallback_bounds: FALLBACK_BOUNDS,
        }
    }
}

impl DocumentRepairer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_bounds(mut self, bounds: Bounds) -> Self {
        self.fallback_bounds = bounds;
        self
    }

    pub fn repair(&self, document: &SvgDocument, intent: &DesignIntent) -> RepairReport {
        let mut doc = document.clone();
        let mut actions = Vec::new();
        let mut errors = Vec::new();

        zero_non_finite(&mut doc, &mut actions);
        clamp_stroke_widths(&mut doc, min_stroke_width(intent), &mut actions);
        if intent.requires_stroke_only() {
            remove_fills(&mut doc, &mut actions);
        }
        if let Some(max) = intent.constraints.max_elements {
            if doc.components.len() > max {
                actions.push(RepairAction::Truncated {
                    from: doc.components.len(),
                    to: max,
                });
                doc.components.truncate(max);
            }
        }
        if !doc.bounds.is_valid() {
            let bounds = content_bounds(&doc).unwrap_or(self.fallback_bounds);
            doc.bounds = bounds;
            actions.push(RepairAction::BoundsReplaced {
                width: bounds.width,
                height: bounds.height,
            });
        }
        round_precision(&mut doc, &mut actions);

        if doc.components.is_empty() {
            errors.push("Document has no components".to_string());
        }
        let missing: Vec<&str> = intent
            .constraints
            .required_motifs
            .iter()
            .map(String::as_str)
            .filter(|m| {
                !doc.components
                    .iter()
                    .any(|c| c.metadata.motif.as_deref() == Some(*m))
            })
            .collect();
        if !missing.is_empty() {
            errors.push(format!("Cannot add missing motifs: {}", missing.join(", ")));
        }
        for component in &doc.components {
            if let Err(reason) = component.element.check_valid(&component.attributes) {
                errors.push(format!(
                    "Cannot repair invalid {} {}: {}",
                    component.element, component.id, reason
                ));
            }
        }

        let success = !actions.is_empty();
        debug!(
            actions = actions.len(),
            errors = errors.len(),
            success,
            "Document repair pass"
        );
        RepairReport {
            success,
            repaired_document: success.then_some(doc),
            actions,
            errors,
        }
    }
}

/// The intent's minimum, never below the gate's blocking floor.
fn min_stroke_width(intent: &DesignIntent) -> f64 {
    let min = intent.style.stroke_rules.min_stroke_width;
    if min.is_finite() {
        min.max(MIN_STROKE_WIDTH)
    } else {
        MIN_STROKE_WIDTH
    }
}

fn zero_non_finite(doc: &mut SvgDocument, actions: &mut Vec<RepairAction>) {
    for component in &mut doc.components {
        for (name, value) in component.attributes.iter_mut() {
            if let AttributeValue::Number(n) = value {
                if !n.is_finite() {
                    *n = 0.0;
                    actions.push(RepairAction::NonFiniteZeroed {
                        component: component.id.clone(),
                        attribute: name.clone(),
                    });
                }
            }
        }
    }
}

fn clamp_stroke_widths(doc: &mut SvgDocument, min: f64, actions: &mut Vec<RepairAction>) {
    for component in &mut doc.components {
        if let Some(AttributeValue::Number(width)) = component.attributes.get_mut("stroke-width") {
            if *width < min {
                actions.push(RepairAction::StrokeWidthClamped {
                    component: component.id.clone(),
                    from: *width,
                    to: min,
                });
                *width = min;
            }
        }
    }
}

fn remove_fills(doc: &mut SvgDocument, actions: &mut Vec<RepairAction>) {
    for component in &mut doc.components {
        if component.painted_fill().is_some() {
            component
                .attributes
                .insert("fill".into(), AttributeValue::Text("none".into()));
            actions.push(RepairAction::FillRemoved {
                component: component.id.clone(),
            });
        }
    }
}

/// Smallest origin-anchored viewport containing every component's extent.
fn content_bounds(doc: &SvgDocument) -> Option<Bounds> {
    let (max_x, max_y) = doc
        .components
        .iter()
        .filter_map(|c| c.element.extent(&c.attributes))
        .filter(|(x0, y0, x1, y1)| [x0, y0, x1, y1].iter().all(|v| v.is_finite()))
        .fold((0.0_f64, 0.0_f64), |(mx, my), (_, _, x1, y1)| {
            (mx.max(x1), my.max(y1))
        });
    let bounds = Bounds::new(max_x.ceil(), max_y.ceil());
    bounds.is_valid().then_some(bounds)
}

fn round_precision(doc: &mut SvgDocument, actions: &mut Vec<RepairAction>) {
    let mut count = 0;
    for component in &mut doc.components {
        for value in component.attributes.values_mut() {
            if let AttributeValue::Number(n) = value {
                if decimal_places(*n) > MAX_DECIMALS {
                    *n = round2(*n);
                    count += 1;
                }
            }
        }
    }
    if count > 0 {
        actions.push(RepairAction::PrecisionRounded { count });
    }
}
