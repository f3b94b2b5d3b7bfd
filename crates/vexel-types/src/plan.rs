//! Synthesis inputs: composition plans, grounding material and call context.

use serde::{Deserialize, Serialize};

use crate::document::{AttributeValue, Attributes, Component};
use crate::shape::ShapeKind;

/// Centre point of a planned shape, in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Extent of a planned shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Paint properties requested for a component.
///
/// Absent fields are not written at all; an absent `fill` is not the same
/// as an explicit `"none"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Style {
    /// Copy the present style fields onto an attribute map.
    pub fn apply_to(&self, attributes: &mut Attributes) {
        if let Some(fill) = &self.fill {
            attributes.insert("fill".into(), AttributeValue::Text(fill.clone()));
        }
        if let Some(stroke) = &self.stroke {
            attributes.insert("stroke".into(), AttributeValue::Text(stroke.clone()));
        }
        if let Some(width) = self.stroke_width {
            attributes.insert("stroke-width".into(), AttributeValue::Number(width));
        }
        if let Some(opacity) = self.opacity {
            attributes.insert("opacity".into(), AttributeValue::Number(opacity));
        }
    }
}

/// One abstract shape in a composition plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentPlan {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motif: Option<String>,
}

impl ComponentPlan {
    /// Display label: the motif when present, otherwise the shape kind.
    pub fn label(&self) -> String {
        self.motif
            .clone()
            .unwrap_or_else(|| self.kind.as_str().to_string())
    }
}

/// Document viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

fn default_arrangement() -> String {
    "centered".to_string()
}

/// Layout frame of a plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub bounds: Bounds,
    #[serde(default = "default_arrangement")]
    pub arrangement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Pre-laid-out shape list handed to the synthesizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionPlan {
    pub components: Vec<ComponentPlan>,
    pub layout: Layout,
    /// Paint order, parallel to `components`; higher paints later.
    #[serde(default)]
    pub z_index: Vec<i32>,
}

/// Palette contributed by the knowledge base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StylePack {
    pub id: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// A motif known to the knowledge base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotifRef {
    pub id: String,
    pub name: String,
}

/// Advisory reuse material. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_pack: Option<StylePack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motifs: Option<Vec<MotifRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

/// Call-scoped metadata carried into the document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisContext {
    #[serde(default)]
    pub prompt: String,
    /// Recorded for traceability only; synthesis is deterministic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SynthesisContext {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_deserializes_from_camel_case_json() {
        let json = r##"{
            "components": [{
                "id": "sun",
                "type": "circle",
                "position": {"x": 100, "y": 80},
                "size": {"width": 40, "height": 40},
                "style": {"fill": "#ffcc00", "strokeWidth": 2},
                "motif": "sun"
            }],
            "layout": {"bounds": {"width": 400, "height": 300}, "background": "#001122"},
            "zIndex": [0]
        }"##;
        let plan: CompositionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.components.len(), 1);
        assert_eq!(plan.components[0].kind, ShapeKind::Circle);
        assert_eq!(plan.components[0].rotation, 0.0);
        assert_eq!(plan.components[0].style.stroke_width, Some(2.0));
        assert_eq!(plan.layout.arrangement, "centered");
        assert_eq!(plan.z_index, vec![0]);
    }

    #[test]
    fn style_writes_only_present_fields() {
        let style = Style {
            stroke: Some("#000".into()),
            stroke_width: Some(1.5),
            ..Default::default()
        };
        let mut attrs = Attributes::new();
        style.apply_to(&mut attrs);
        assert!(!attrs.contains_key("fill"));
        assert!(!attrs.contains_key("opacity"));
        assert_eq!(attrs.get("stroke-width"), Some(&AttributeValue::Number(1.5)));
    }

    #[test]
    fn bounds_validity() {
        assert!(Bounds::new(10.0, 10.0).is_valid());
        assert!(!Bounds::new(0.0, 10.0).is_valid());
        assert!(!Bounds::new(f64::NAN, 10.0).is_valid());
    }
}
