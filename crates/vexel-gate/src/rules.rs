//! Standalone rule validators.
//!
//! Narrow yes/no checks used by the repair driver and by callers that want
//! a single rule without the full weighted verdict.

use serde::{Deserialize, Serialize};
use vexel_types::{Component, SvgDocument};

/// Result of one rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl RuleOutcome {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Every required motif appears on at least one component.
pub fn validate_motifs(document: &SvgDocument, required: &[String]) -> RuleOutcome {
    let violations = required
        .iter()
        .filter(|motif| {
            !document
                .components
                .iter()
                .any(|c| c.metadata.motif.as_deref() == Some(motif.as_str()))
        })
        .map(|motif| format!("Missing required motif: {}", motif))
        .collect();
    RuleOutcome::from_violations(violations)
}

/// No component paints a fill.
pub fn validate_stroke_only(document: &SvgDocument) -> RuleOutcome {
    let violations = document
        .components
        .iter()
        .filter_map(|c| {
            c.painted_fill()
                .map(|fill| format!("Component {} has fill {}", c.id, fill))
        })
        .collect();
    RuleOutcome::from_violations(violations)
}

/// At most `max` components.
pub fn validate_element_count(document: &SvgDocument, max: usize) -> RuleOutcome {
    let count = document.components.len();
    let violations = if count > max {
        vec![format!("Too many components: {} > {}", count, max)]
    } else {
        Vec::new()
    };
    RuleOutcome::from_violations(violations)
}

/// Reuse flags agree with the grounding that was offered.
///
/// When grounding components were available at least one must have been
/// reused, and every component flagged as reused must match a grounding
/// component by motif or element.
pub fn validate_component_reuse(document: &SvgDocument, grounding: &[Component]) -> RuleOutcome {
    let mut violations = Vec::new();
    let reused: Vec<&Component> = document
        .components
        .iter()
        .filter(|c| c.metadata.reused)
        .collect();

    if !grounding.is_empty() && reused.is_empty() {
        violations.push(format!(
            "None of {} grounding components were reused",
            grounding.len()
        ));
    }

    for component in reused {
        let matched = grounding.iter().any(|g| {
            g.element == component.element
                || (g.metadata.motif.is_some() && g.metadata.motif == component.metadata.motif)
        });
        if !matched {
            violations.push(format!(
                "Component {} is marked reused but matches no grounding component",
                component.id
            ));
        }
    }
    RuleOutcome::from_violations(violations)
}
