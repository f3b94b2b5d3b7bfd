//! Plan lowering.
//!
//! ```text
//! CompositionPlan ──validate──▶ paint order ──▶ per component:
//!                                              reuse ─▶ library ─▶ procedural
//!                                              └──── finalize (rotation, sanitize)
//!                 ──▶ palette, description, usedObjects ──▶ SvgDocument
//! ```
//!
//! Validation of the whole plan runs before any geometry is computed, so a
//! single malformed component aborts the call and no partial document is
//! ever returned.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use vexel_types::{
    format_number, sanitize, AttributeValue, Component, ComponentMetadata, ComponentPlan,
    CompositionPlan, DocumentMetadata, Frame, GroundingContext, Position, Size, SvgDocument,
    SynthesisContext,
};

use crate::adapt;
use crate::error::{SynthesisError, SynthesisResult};
use crate::library::{ComponentLibrary, InMemoryLibrary, TemplateQuery};
use crate::palette;
use crate::schema;

/// Synthesizer behaviour switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Model label recorded when the call context names none.
    pub default_model: String,
    /// Consult grounding components before anything else.
    pub reuse_enabled: bool,
    /// Consult the component library before procedural generation.
    pub library_enabled: bool,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            default_model: "vexel-procedural".to_string(),
            reuse_enabled: true,
            library_enabled: true,
        }
    }
}

/// How a component was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Reused,
    Library,
    Procedural,
}

/// Lowers composition plans into concrete documents.
pub struct Synthesizer {
    library: Arc<dyn ComponentLibrary>,
    config: SynthesizerConfig,
}

impl Synthesizer {
    pub fn new(library: Arc<dyn ComponentLibrary>) -> Self {
        Self::with_config(library, SynthesizerConfig::default())
    }

    pub fn with_config(library: Arc<dyn ComponentLibrary>, config: SynthesizerConfig) -> Self {
        Self { library, config }
    }

    /// A synthesizer backed by an empty library: every component that is not
    /// reused is generated procedurally.
    pub fn procedural() -> Self {
        Self::new(Arc::new(InMemoryLibrary::new()))
    }

    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Lower a plan into a document.
    #[instrument(skip_all, fields(components = plan.components.len()))]
    pub fn synthesize(
        &self,
        plan: &CompositionPlan,
        grounding: &GroundingContext,
        context: &SynthesisContext,
    ) -> SynthesisResult<SvgDocument> {
        validate_plan(plan)?;

        let seeds: &[Component] = if self.config.reuse_enabled {
            grounding.components.as_deref().unwrap_or(&[])
        } else {
            &[]
        };

        let mut components = Vec::with_capacity(plan.components.len());
        let mut used_objects = UsedObjects::default();

        for index in paint_order(plan) {
            let component_plan = &plan.components[index];
            let (component, source, origin) = self.resolve_component(component_plan, seeds)?;
            debug!(
                id = %component.id,
                element = %component.element,
                source = ?source,
                "Resolved component"
            );
            if let Some(origin) = origin {
                used_objects.push(origin);
            }
            components.push(component);
        }

        if let Some(pack) = &grounding.style_pack {
            if !pack.colors.is_empty() {
                used_objects.push(pack.id.clone());
            }
        }
        if let Some(motifs) = &grounding.motifs {
            for motif in motifs {
                let planned = plan
                    .components
                    .iter()
                    .any(|c| c.motif.as_deref() == Some(motif.name.as_str()));
                if planned {
                    used_objects.push(motif.id.clone());
                }
            }
        }

        let background = plan.layout.background.clone();
        let colors = palette::extract(
            &components,
            background.as_deref(),
            grounding.style_pack.as_ref(),
        );
        let description = palette::describe(&components, &plan.layout.arrangement);

        let document = SvgDocument {
            components,
            metadata: DocumentMetadata {
                prompt: context.prompt.clone(),
                seed: context.seed,
                palette: colors.clone(),
                description,
                generated_at: Utc::now(),
                model: context
                    .model
                    .clone()
                    .unwrap_or_else(|| self.config.default_model.clone()),
                used_objects: used_objects.into_vec(),
                background,
            },
            bounds: plan.layout.bounds,
            palette: colors,
        };

        for violation in schema::check_document(&document) {
            warn!(%violation, "Synthesized document failed schema check");
        }

        info!(
            components = document.components.len(),
            palette = document.palette.len(),
            used_objects = document.metadata.used_objects.len(),
            "Synthesis complete"
        );
        Ok(document)
    }

    /// Resolve one planned component: reuse, then library, then procedural.
    ///
    /// Returns the component, where it came from, and the grounding or
    /// library object id it consumed, if any.
    fn resolve_component(
        &self,
        plan: &ComponentPlan,
        seeds: &[Component],
    ) -> SynthesisResult<(Component, Source, Option<String>)> {
        let frame = Frame::new(plan.position.x, plan.position.y, plan.size.width, plan.size.height);

        if let Some(seed) = adapt::find_seed(plan, seeds) {
            let component = adapt::adapt_reused(seed, plan, &frame)?;
            return Ok((finalize(component, plan)?, Source::Reused, Some(seed.id.clone())));
        }

        if self.config.library_enabled {
            let query = TemplateQuery::for_plan(plan);
            if let Some(template) = self.library.find_templates(&query).into_iter().next() {
                let mut component = self.library.instantiate_component(
                    &template.id,
                    &plan.style,
                    &plan.position,
                    &plan.size,
                )?;
                component.metadata.generated = true;
                component.metadata.reused = false;
                return Ok((finalize(component, plan)?, Source::Library, Some(template.id)));
            }
        }

        let mut attributes = plan.kind.resolve(&frame, plan.motif.as_deref())?;
        plan.style.apply_to(&mut attributes);
        let component = Component {
            id: plan.id.clone(),
            kind: plan.label(),
            element: plan.kind,
            attributes,
            metadata: ComponentMetadata {
                motif: plan.motif.clone(),
                generated: true,
                reused: false,
            },
        };
        Ok((finalize(component, plan)?, Source::Procedural, None))
    }
}

/// Stamp plan identity onto a component, add rotation, sanitize every number.
fn finalize(mut component: Component, plan: &ComponentPlan) -> SynthesisResult<Component> {
    component.id = plan.id.clone();
    component.kind = plan.label();
    if plan.motif.is_some() {
        component.metadata.motif = plan.motif.clone();
    }

    let rotation = sanitize("rotation", plan.rotation)?;
    if rotation != 0.0 {
        let cx = sanitize("cx", plan.position.x)?;
        let cy = sanitize("cy", plan.position.y)?;
        component.attributes.insert(
            "transform".into(),
            AttributeValue::Text(format!(
                "rotate({} {} {})",
                format_number(rotation),
                format_number(cx),
                format_number(cy)
            )),
        );
    }

    for (name, value) in component.attributes.iter_mut() {
        if let AttributeValue::Number(n) = value {
            *n = sanitize(name, *n)?;
        }
    }
    Ok(component)
}

/// Input contract checks. Runs over the whole plan before any geometry.
pub fn validate_plan(plan: &CompositionPlan) -> SynthesisResult<()> {
    let bounds = plan.layout.bounds;
    if !bounds.is_valid() {
        return Err(SynthesisError::InvalidPlan(format!(
            "layout bounds must be positive and finite, got {}x{}",
            format_number(bounds.width),
            format_number(bounds.height)
        )));
    }

    if !plan.z_index.is_empty() && plan.z_index.len() != plan.components.len() {
        return Err(SynthesisError::InvalidPlan(format!(
            "zIndex has {} entries for {} components",
            plan.z_index.len(),
            plan.components.len()
        )));
    }

    let mut ids = HashSet::new();
    for component in &plan.components {
        if component.id.trim().is_empty() {
            return Err(SynthesisError::InvalidPlan(
                "component id must not be empty".to_string(),
            ));
        }
        if !ids.insert(component.id.as_str()) {
            return Err(SynthesisError::InvalidPlan(format!(
                "duplicate component id '{}'",
                component.id
            )));
        }

        let Position { x, y } = component.position;
        if !x.is_finite() || !y.is_finite() {
            return Err(SynthesisError::InvalidPosition {
                id: component.id.clone(),
                x: format_number(x),
                y: format_number(y),
            });
        }

        let Size { width, height } = component.size;
        if !width.is_finite() || !height.is_finite() {
            return Err(SynthesisError::InvalidSize {
                id: component.id.clone(),
                width: format_number(width),
                height: format_number(height),
            });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(SynthesisError::NonPositiveSize {
                id: component.id.clone(),
                width: format_number(width),
                height: format_number(height),
            });
        }
    }
    Ok(())
}

/// Indices of plan components in paint order (stable on ties).
fn paint_order(plan: &CompositionPlan) -> Vec<usize> {
    let mut order: Vec<usize> = (0..plan.components.len()).collect();
    if !plan.z_index.is_empty() {
        order.sort_by_key(|&i| plan.z_index[i]);
    }
    order
}

/// Deduplicated ids in encounter order.
#[derive(Default)]
struct UsedObjects {
    seen: HashSet<String>,
    ids: Vec<String>,
}

impl UsedObjects {
    fn push(&mut self, id: String) {
        if self.seen.insert(id.clone()) {
            self.ids.push(id);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ids
    }
}
