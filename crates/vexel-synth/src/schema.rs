//! Structural schema diagnostics for synthesized documents.
//!
//! Violations are reported, never enforced: callers log them and carry on.
//! Only numeric sanity (finite, rounded) is guaranteed by synthesis.

use std::collections::HashSet;
use std::fmt;

use vexel_types::{AttributeValue, SvgDocument};

/// One schema finding.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaViolation {
    /// Offending component, if the finding is component-scoped.
    pub component: Option<String>,
    pub message: String,
}

impl SchemaViolation {
    fn document(message: impl Into<String>) -> Self {
        Self {
            component: None,
            message: message.into(),
        }
    }

    fn component(id: &str, message: impl Into<String>) -> Self {
        Self {
            component: Some(id.to_string()),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(id) => write!(f, "component '{}': {}", id, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Check a document against the expected structure.
pub fn check_document(document: &SvgDocument) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    if !document.bounds.is_valid() {
        violations.push(SchemaViolation::document("bounds must be positive and finite"));
    }
    if document.components.is_empty() {
        violations.push(SchemaViolation::document("document has no components"));
    }

    let mut seen = HashSet::new();
    for component in &document.components {
        if component.id.trim().is_empty() {
            violations.push(SchemaViolation::document("component with empty id"));
        } else if !seen.insert(component.id.as_str()) {
            violations.push(SchemaViolation::component(&component.id, "duplicate id"));
        }

        let freeform = component.element.is_freeform();
        for name in component.element.geometry_attributes() {
            let ok = match component.attributes.get(*name) {
                Some(AttributeValue::Number(_)) => !freeform,
                Some(AttributeValue::Text(_)) => freeform,
                None => false,
            };
            if !ok {
                violations.push(SchemaViolation::component(
                    &component.id,
                    format!(
                        "{} requires {} attribute '{}'",
                        component.element,
                        if freeform { "string" } else { "numeric" },
                        name
                    ),
                ));
            }
        }
    }

    if document.palette.iter().any(|c| c.trim().is_empty()) {
        violations.push(SchemaViolation::document("palette contains an empty color"));
    }

    violations
}
