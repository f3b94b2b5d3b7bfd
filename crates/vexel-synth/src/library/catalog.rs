//! Built-in templates, authored in the 0–100 template space.

use vexel_types::{AttributeValue, Attributes, ShapeKind};

use super::Template;

fn template(id: &str, name: &str, element: ShapeKind, tags: &[&str], geometry: (&str, &str)) -> Template {
    let mut attributes = Attributes::new();
    attributes.insert(geometry.0.to_string(), AttributeValue::Text(geometry.1.to_string()));
    if element == ShapeKind::Path || element == ShapeKind::Polygon {
        attributes.insert("stroke-linejoin".into(), AttributeValue::Text("round".into()));
    }
    Template {
        id: id.to_string(),
        name: name.to_string(),
        element,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        attributes,
    }
}

pub(super) fn default_templates() -> Vec<Template> {
    vec![
        template(
            "tpl-house",
            "house",
            ShapeKind::Polygon,
            &["house", "building", "home"],
            ("points", "50,5 95,45 85,45 85,95 15,95 15,45 5,45"),
        ),
        template(
            "tpl-diamond",
            "diamond",
            ShapeKind::Polygon,
            &["diamond", "gem"],
            ("points", "50,0 100,50 50,100 0,50"),
        ),
        template(
            "tpl-mountain",
            "mountain",
            ShapeKind::Polyline,
            &["mountain", "landscape"],
            ("points", "0,100 30,35 45,55 70,10 100,100"),
        ),
        template(
            "tpl-heart",
            "heart",
            ShapeKind::Path,
            &["heart", "love"],
            (
                "d",
                "M 50 90 C 10 60 0 35 20 20 C 35 8 50 20 50 30 C 50 20 65 8 80 20 C 100 35 90 60 50 90 Z",
            ),
        ),
        template(
            "tpl-arrow",
            "arrow",
            ShapeKind::Path,
            &["arrow", "direction"],
            ("d", "M 0 40 L 60 40 L 60 20 L 100 50 L 60 80 L 60 60 L 0 60 Z"),
        ),
    ]
}
