//! Component library: reusable shape templates tagged by motif.
//!
//! Templates are authored in a 0–100 local space. The synthesizer treats the
//! first template a library returns as authoritative; libraries own their
//! ordering.

mod catalog;
mod memory;

pub use memory::InMemoryLibrary;

use serde::{Deserialize, Serialize};
use vexel_types::{Attributes, Component, ComponentPlan, Position, ShapeKind, Size, Style};

use crate::error::LibraryError;

/// A reusable shape template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub element: ShapeKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Geometry in template space plus any presentation attributes.
    #[serde(default)]
    pub attributes: Attributes,
}

/// Lookup criteria. Every tag must be present on a matching template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ShapeKind>,
}

impl TemplateQuery {
    /// `{tags: [motif] if present, type}` for a planned component.
    pub fn for_plan(plan: &ComponentPlan) -> Self {
        Self {
            tags: plan.motif.iter().cloned().collect(),
            kind: Some(plan.kind),
        }
    }

    pub fn matches(&self, template: &Template) -> bool {
        if let Some(kind) = self.kind {
            if template.element != kind {
                return false;
            }
        }
        self.tags.iter().all(|tag| {
            template
                .tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case(tag))
        })
    }
}

/// Source of reusable templates.
pub trait ComponentLibrary: Send + Sync {
    /// Templates matching the query, in library order.
    fn find_templates(&self, query: &TemplateQuery) -> Vec<Template>;

    /// Build a document-space component from a template.
    fn instantiate_component(
        &self,
        template_id: &str,
        style: &Style,
        position: &Position,
        size: &Size,
    ) -> Result<Component, LibraryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(element: ShapeKind, tags: &[&str]) -> Template {
        Template {
            id: "t".into(),
            name: "t".into(),
            element,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn query_requires_kind_and_all_tags() {
        let query = TemplateQuery {
            tags: vec!["House".into()],
            kind: Some(ShapeKind::Polygon),
        };
        assert!(query.matches(&template(ShapeKind::Polygon, &["house", "building"])));
        assert!(!query.matches(&template(ShapeKind::Path, &["house"])));
        assert!(!query.matches(&template(ShapeKind::Polygon, &["tree"])));
    }

    #[test]
    fn empty_tags_match_any_template_of_kind() {
        let query = TemplateQuery {
            tags: vec![],
            kind: Some(ShapeKind::Path),
        };
        assert!(query.matches(&template(ShapeKind::Path, &["heart"])));
    }
}
