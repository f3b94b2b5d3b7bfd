use tracing::debug;
use vexel_types::{path, shape, Component, ComponentMetadata, Frame, Position, Size, Style};

use super::{catalog, ComponentLibrary, Template, TemplateQuery};
use crate::error::LibraryError;

/// Library backed by an in-process template list.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLibrary {
    templates: Vec<Template>,
}

impl InMemoryLibrary {
    /// An empty library; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog (house, diamond, mountain, heart, arrow).
    pub fn with_defaults() -> Self {
        Self {
            templates: catalog::default_templates(),
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.add(template);
        self
    }

    /// Add or replace a template by id.
    pub fn add(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ComponentLibrary for InMemoryLibrary {
    fn find_templates(&self, query: &TemplateQuery) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect()
    }

    fn instantiate_component(
        &self,
        template_id: &str,
        style: &Style,
        position: &Position,
        size: &Size,
    ) -> Result<Component, LibraryError> {
        let template = self
            .get(template_id)
            .ok_or_else(|| LibraryError::TemplateNotFound(template_id.to_string()))?;
        let frame = Frame::new(position.x, position.y, size.width, size.height);
        let element = template.element;
        let geometry = element.geometry_attributes();

        // Presentation attributes carry over; geometry is re-derived.
        let mut attributes = template.attributes.clone();
        attributes.retain(|name, _| !geometry.contains(&name.as_str()));

        let invalid = |reason: String| LibraryError::Instantiation {
            template_id: template_id.to_string(),
            reason,
        };

        if element.is_freeform() {
            let name = geometry[0];
            let raw = template
                .attributes
                .get(name)
                .and_then(|v| v.as_text())
                .ok_or_else(|| invalid(format!("missing {}", name)))?;
            let projected = if name == "d" {
                path::project(raw, &frame).map_err(|e| invalid(e.to_string()))?
            } else {
                shape::project_points(raw, &frame)?
                    .ok_or_else(|| invalid("malformed points".to_string()))?
            };
            attributes.insert(name.to_string(), projected.into());
        } else {
            attributes.extend(element.resolve(&frame, None)?);
        }
        style.apply_to(&mut attributes);

        debug!(template = %template.id, element = %element, "Instantiated library template");

        Ok(Component {
            id: template.id.clone(),
            kind: template.name.clone(),
            element,
            attributes,
            metadata: ComponentMetadata {
                motif: None,
                generated: true,
                reused: false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_types::{AttributeValue, Attributes, ShapeKind};

    fn pos(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    fn size(w: f64, h: f64) -> Size {
        Size { width: w, height: h }
    }

    #[test]
    fn defaults_are_searchable_by_tag() {
        let lib = InMemoryLibrary::with_defaults();
        let found = lib.find_templates(&TemplateQuery {
            tags: vec!["home".into()],
            kind: Some(ShapeKind::Polygon),
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "tpl-house");
    }

    #[test]
    fn instantiation_projects_points() {
        let lib = InMemoryLibrary::with_defaults();
        let c = lib
            .instantiate_component("tpl-diamond", &Style::default(), &pos(100.0, 100.0), &size(40.0, 20.0))
            .unwrap();
        assert_eq!(c.text("points"), Some("100,90 120,100 100,110 80,100"));
        assert_eq!(c.text("stroke-linejoin"), Some("round"));
        assert!(c.metadata.generated);
    }

    #[test]
    fn instantiation_projects_path_and_applies_style() {
        let lib = InMemoryLibrary::with_defaults();
        let style = Style {
            stroke: Some("#222".into()),
            stroke_width: Some(2.0),
            ..Default::default()
        };
        let c = lib
            .instantiate_component("tpl-arrow", &style, &pos(50.0, 50.0), &size(100.0, 100.0))
            .unwrap();
        assert!(c.text("d").unwrap().starts_with("M 0 40 L 60 40"));
        assert_eq!(c.text("stroke"), Some("#222"));
        assert_eq!(c.number("stroke-width"), Some(2.0));
    }

    #[test]
    fn scalar_templates_resolve_from_frame() {
        let mut attributes = Attributes::new();
        attributes.insert("r".into(), AttributeValue::Number(50.0));
        let lib = InMemoryLibrary::new().with_template(Template {
            id: "dot".into(),
            name: "dot".into(),
            element: ShapeKind::Circle,
            tags: vec!["dot".into()],
            attributes,
        });
        let c = lib
            .instantiate_component("dot", &Style::default(), &pos(10.0, 20.0), &size(8.0, 8.0))
            .unwrap();
        assert_eq!(c.number("cx"), Some(10.0));
        assert_eq!(c.number("r"), Some(4.0));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let lib = InMemoryLibrary::new();
        let err = lib
            .instantiate_component("nope", &Style::default(), &pos(0.0, 0.0), &size(1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, LibraryError::TemplateNotFound(_)));
    }

    #[test]
    fn add_replaces_by_id() {
        let mut lib = InMemoryLibrary::with_defaults();
        let before = lib.len();
        let mut t = lib.get("tpl-heart").unwrap().clone();
        t.tags.push("valentine".into());
        lib.add(t);
        assert_eq!(lib.len(), before);
        assert!(lib.get("tpl-heart").unwrap().tags.contains(&"valentine".to_string()));
    }
}
