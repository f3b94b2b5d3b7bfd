//! Re-projection of reused grounding components onto a new frame.
//!
//! Scalar shapes are re-resolved from the frame. Point lists are projected
//! from the 0–100 template space. Path data is adapted shallowly: only the
//! leading move-to is re-anchored and the remaining commands are carried
//! through unchanged.

use tracing::debug;
use vexel_types::{path, shape, text, Component, ComponentMetadata, ComponentPlan, Frame, ShapeKind};

use crate::error::SynthesisResult;

/// Find a grounding component to reuse for a planned component.
///
/// A motif match anywhere in the list wins over an element match.
pub fn find_seed<'a>(plan: &ComponentPlan, seeds: &'a [Component]) -> Option<&'a Component> {
    let by_motif = plan.motif.as_ref().and_then(|motif| {
        seeds
            .iter()
            .find(|c| c.metadata.motif.as_deref() == Some(motif.as_str()))
    });
    by_motif.or_else(|| seeds.iter().find(|c| c.element == plan.kind))
}

/// Clone a seed and fit it to the planned frame and style.
pub fn adapt_reused(seed: &Component, plan: &ComponentPlan, frame: &Frame) -> SynthesisResult<Component> {
    let element = seed.element;
    let motif = plan.motif.as_deref();
    let mut attributes = seed.attributes.clone();
    attributes.remove("transform");

    match element {
        ShapeKind::Polygon | ShapeKind::Polyline => {
            let projected = match text(&attributes, "points") {
                Some(points) => shape::project_points(points, frame)?,
                None => None,
            };
            match projected {
                Some(points) => {
                    attributes.insert("points".into(), points.into());
                }
                None => attributes.extend(element.resolve(frame, motif)?),
            }
        }
        ShapeKind::Path => {
            let anchored = text(&attributes, "d").and_then(|d| {
                path::reanchor_move_to(d, frame)
                    .map_err(|e| debug!(seed = %seed.id, error = %e, "Seed path not re-anchored"))
                    .ok()
            });
            match anchored {
                Some(d) => {
                    attributes.insert("d".into(), d.into());
                }
                None => attributes.extend(element.resolve(frame, motif)?),
            }
        }
        _ => attributes.extend(element.resolve(frame, motif)?),
    }
    plan.style.apply_to(&mut attributes);

    Ok(Component {
        id: plan.id.clone(),
        kind: plan.label(),
        element,
        attributes,
        metadata: ComponentMetadata {
            motif: plan.motif.clone().or_else(|| seed.metadata.motif.clone()),
            generated: false,
            reused: true,
        },
    })
}
