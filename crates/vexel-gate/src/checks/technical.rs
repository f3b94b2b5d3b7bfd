use vexel_types::numeric::MAX_DECIMALS;
use vexel_types::{decimal_places, format_number, AttributeValue, DesignIntent, SvgDocument};

use super::CheckOutcome;

/// Component count above which the document is flagged as complex.
const COMPLEXITY_LIMIT: usize = 20;
const PRECISION_PENALTY: i32 = 5;
const PRECISION_PENALTY_CAP: i32 = 20;

/// Numeric sanity, shape validity and complexity.
pub fn check_technical(document: &SvgDocument, _intent: &DesignIntent) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let mut imprecise = 0usize;

    for component in &document.components {
        for (name, value) in &component.attributes {
            if let AttributeValue::Number(n) = value {
                if !n.is_finite() {
                    outcome.issue(
                        format!(
                            "Component {} has invalid {}: {}",
                            component.id,
                            name,
                            format_number(*n)
                        ),
                        25,
                    );
                } else if decimal_places(*n) > MAX_DECIMALS {
                    imprecise += 1;
                }
            }
        }
    }
    if imprecise > 0 {
        outcome.warn(
            format!(
                "{} numeric attributes have more than {} decimal places",
                imprecise, MAX_DECIMALS
            ),
            (imprecise as i32 * PRECISION_PENALTY).min(PRECISION_PENALTY_CAP),
        );
    }

    if !document.bounds.is_valid() {
        outcome.issue("Document bounds are missing or zero", 25);
    }

    for component in &document.components {
        match component.element.check_valid(&component.attributes) {
            Err(reason) => outcome.issue(
                format!(
                    "Component {} is an invalid {}: {}",
                    component.id, component.element, reason
                ),
                10,
            ),
            Ok(()) if component.element.is_degenerate(&component.attributes) => outcome.warn(
                format!(
                    "Component {} is a degenerate {}",
                    component.id, component.element
                ),
                5,
            ),
            Ok(()) => {}
        }
    }

    let count = document.components.len();
    if count > COMPLEXITY_LIMIT {
        outcome.warn(
            format!(
                "Document has {} components; more than {} may be too complex",
                count, COMPLEXITY_LIMIT
            ),
            5,
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_types::{Bounds, Component, ShapeKind};

    fn circle(id: &str, cx: f64, r: f64) -> Component {
        Component::new(id, ShapeKind::Circle)
            .with_attr("cx", cx)
            .with_attr("cy", 10.0)
            .with_attr("r", r)
    }

    fn doc(components: Vec<Component>) -> SvgDocument {
        SvgDocument {
            components,
            ..SvgDocument::new(Bounds::new(100.0, 100.0))
        }
    }

    #[test]
    fn non_finite_attribute_names_component_and_attribute() {
        let outcome = check_technical(&doc(vec![circle("c1", f64::NAN, 5.0)]), &DesignIntent::default());
        assert_eq!(outcome.issues, ["Component c1 has invalid cx: NaN"]);
        assert_eq!(outcome.score, 75);
    }

    #[test]
    fn precision_penalty_is_capped() {
        let components = (0..3)
            .map(|i| circle(&format!("c{}", i), 10.123, 5.4567))
            .collect();
        let outcome = check_technical(&doc(components), &DesignIntent::default());
        assert_eq!(
            outcome.warnings,
            ["6 numeric attributes have more than 2 decimal places"]
        );
        assert_eq!(outcome.score, 80);
    }

    #[test]
    fn invalid_and_degenerate_shapes() {
        let components = vec![
            circle("neg", 10.0, -1.0),
            circle("zero", 10.0, 0.0),
            Component::new("p", ShapeKind::Path).with_attr("d", ""),
        ];
        let outcome = check_technical(&doc(components), &DesignIntent::default());
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome.issues[0].starts_with("Component neg is an invalid circle: negative radius"));
        assert_eq!(outcome.issues[1], "Component p is an invalid path: empty path data");
        assert_eq!(outcome.warnings, ["Component zero is a degenerate circle"]);
        assert_eq!(outcome.score, 75);
    }

    #[test]
    fn missing_bounds_and_complexity() {
        let components = (0..21).map(|i| circle(&format!("c{}", i), 10.0, 2.0)).collect();
        let mut d = doc(components);
        d.bounds = Bounds::new(0.0, 0.0);
        let outcome = check_technical(&d, &DesignIntent::default());
        assert_eq!(outcome.issues, ["Document bounds are missing or zero"]);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.score, 70);
    }
}
