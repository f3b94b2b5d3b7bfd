//! The concrete vector document produced by synthesis and judged by the gate.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::format_number;
use crate::plan::Bounds;
use crate::shape::ShapeKind;

/// A single attribute value: a number or a literal string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => f.write_str(&format_number(*n)),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Attribute map of a component, keyed by SVG attribute name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Numeric attribute lookup.
pub fn number(attributes: &Attributes, name: &str) -> Option<f64> {
    attributes.get(name).and_then(AttributeValue::as_number)
}

/// String attribute lookup.
pub fn text<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes.get(name).and_then(AttributeValue::as_text)
}

/// Provenance of a component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motif: Option<String>,
    #[serde(default)]
    pub generated: bool,
    #[serde(default)]
    pub reused: bool,
}

/// A concrete shape record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    /// Display label (motif or shape name).
    #[serde(rename = "type")]
    pub kind: String,
    pub element: ShapeKind,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub metadata: ComponentMetadata,
}

impl Component {
    pub fn new(id: impl Into<String>, element: ShapeKind) -> Self {
        Self {
            id: id.into(),
            kind: element.as_str().to_string(),
            element,
            attributes: Attributes::new(),
            metadata: ComponentMetadata::default(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_motif(mut self, motif: impl Into<String>) -> Self {
        self.metadata.motif = Some(motif.into());
        self
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        number(&self.attributes, name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        text(&self.attributes, name)
    }

    /// Fill color, unless absent or `none`.
    pub fn painted_fill(&self) -> Option<&str> {
        self.text("fill").filter(|c| is_paint(c))
    }

    /// Stroke color, unless absent or `none`.
    pub fn painted_stroke(&self) -> Option<&str> {
        self.text("stroke").filter(|c| is_paint(c))
    }
}

/// Whether a paint value actually paints something.
pub fn is_paint(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("none")
}

/// Document-level provenance and description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub used_objects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            seed: None,
            palette: Vec::new(),
            description: String::new(),
            generated_at: Utc::now(),
            model: String::new(),
            used_objects: Vec::new(),
            background: None,
        }
    }
}

/// The canonical synthesized artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvgDocument {
    pub components: Vec<Component>,
    pub metadata: DocumentMetadata,
    pub bounds: Bounds,
    #[serde(default)]
    pub palette: Vec<String>,
}

impl SvgDocument {
    /// An empty document over the given viewport.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            components: Vec::new(),
            metadata: DocumentMetadata::default(),
            bounds,
            palette: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Non-empty and over a valid viewport.
    pub fn is_minimally_valid(&self) -> bool {
        !self.components.is_empty() && self.bounds.is_valid()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_are_untagged() {
        let mut attrs = Attributes::new();
        attrs.insert("r".into(), 25.0.into());
        attrs.insert("fill".into(), "#fff".into());
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r##"{"fill":"#fff","r":25.0}"##);

        let back: Attributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attrs);
    }

    #[test]
    fn painted_fill_ignores_none() {
        let c = Component::new("a", ShapeKind::Rect).with_attr("fill", "none");
        assert_eq!(c.painted_fill(), None);
        let c = Component::new("b", ShapeKind::Rect).with_attr("fill", "#123456");
        assert_eq!(c.painted_fill(), Some("#123456"));
    }

    #[test]
    fn display_formats_numbers() {
        assert_eq!(AttributeValue::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(AttributeValue::Number(12.0).to_string(), "12");
        assert_eq!(AttributeValue::Text("M 0 0".into()).to_string(), "M 0 0");
    }

    #[test]
    fn document_json_uses_type_key() {
        let doc = SvgDocument::new(Bounds::new(100.0, 100.0))
            .with_component(Component::new("c1", ShapeKind::Circle).with_motif("sun"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["components"][0]["type"], "circle");
        assert_eq!(value["components"][0]["element"], "circle");
        assert_eq!(value["components"][0]["metadata"]["motif"], "sun");
        assert!(value["metadata"]["generatedAt"].is_string());
    }
}
