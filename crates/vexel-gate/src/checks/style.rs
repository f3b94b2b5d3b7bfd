use vexel_types::{format_number, DesignIntent, SvgDocument};

use super::CheckOutcome;

/// Stroke widths below this are blocking.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Max/min stroke width ratio above which strokes look inconsistent.
const STROKE_RATIO: f64 = 4.0;

/// Fill rules, stroke widths, and palette adherence.
pub fn check_style(document: &SvgDocument, intent: &DesignIntent) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    if intent.requires_stroke_only() {
        let filled = document
            .components
            .iter()
            .filter(|c| c.painted_fill().is_some())
            .count();
        if filled > 0 {
            outcome.issue(
                format!("{} components have fill but stroke-only is required", filled),
                15 * filled as i32,
            );
        }
    }

    let widths: Vec<(&str, f64)> = document
        .components
        .iter()
        .filter_map(|c| c.number("stroke-width").map(|w| (c.id.as_str(), w)))
        .filter(|(_, w)| w.is_finite())
        .collect();

    for (id, width) in widths.iter().filter(|(_, w)| *w < MIN_STROKE_WIDTH) {
        outcome.issue(
            format!(
                "Component {} has stroke width {} below minimum {}",
                id,
                format_number(*width),
                format_number(MIN_STROKE_WIDTH)
            ),
            20,
        );
    }

    let positive: Vec<f64> = widths.iter().map(|(_, w)| *w).filter(|w| *w > 0.0).collect();
    if positive.len() > 1 {
        let max = positive.iter().cloned().fold(f64::MIN, f64::max);
        let min = positive.iter().cloned().fold(f64::MAX, f64::min);
        let ratio = max / min;
        if ratio > STROKE_RATIO {
            outcome.warn(
                format!(
                    "Inconsistent stroke widths: {} to {} (ratio {})",
                    format_number(min),
                    format_number(max),
                    format_number(ratio)
                ),
                5,
            );
        }
    }

    let mut unauthorized: Vec<&str> = Vec::new();
    for component in &document.components {
        for color in [component.painted_fill(), component.painted_stroke()]
            .into_iter()
            .flatten()
        {
            if !document.palette.iter().any(|p| p.eq_ignore_ascii_case(color))
                && !unauthorized.contains(&color)
            {
                unauthorized.push(color);
            }
        }
    }
    for color in unauthorized {
        outcome.warn(format!("Color {} is not in the document palette", color), 5);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_types::{Bounds, Component, ShapeKind};

    fn stroked(id: &str, width: f64) -> Component {
        Component::new(id, ShapeKind::Line)
            .with_attr("stroke", "#000")
            .with_attr("stroke-width", width)
    }

    #[test]
    fn counts_filled_components_under_stroke_only() {
        let doc = SvgDocument::new(Bounds::new(100.0, 100.0))
            .with_palette(["#f00", "#000"])
            .with_component(Component::new("a", ShapeKind::Rect).with_attr("fill", "#f00"))
            .with_component(stroked("b", 2.0).with_attr("fill", "none"));
        let outcome = check_style(&doc, &DesignIntent::default().stroke_only());
        assert_eq!(outcome.issues, ["1 components have fill but stroke-only is required"]);
        assert_eq!(outcome.score, 85);
    }

    #[test]
    fn thin_strokes_cite_the_value() {
        let doc = SvgDocument::new(Bounds::new(100.0, 100.0))
            .with_palette(["#000"])
            .with_component(stroked("thin", 0.5));
        let outcome = check_style(&doc, &DesignIntent::default());
        assert_eq!(outcome.issues, ["Component thin has stroke width 0.5 below minimum 1"]);
        assert_eq!(outcome.score, 80);
    }

    #[test]
    fn stroke_ratio_warning() {
        let doc = SvgDocument::new(Bounds::new(100.0, 100.0))
            .with_palette(["#000"])
            .with_component(stroked("a", 1.0))
            .with_component(stroked("b", 6.0));
        let outcome = check_style(&doc, &DesignIntent::default());
        assert_eq!(outcome.warnings, ["Inconsistent stroke widths: 1 to 6 (ratio 6)"]);
        assert_eq!(outcome.score, 95);
    }

    #[test]
    fn unauthorized_colors_counted_once_each() {
        let doc = SvgDocument::new(Bounds::new(100.0, 100.0))
            .with_palette(["#000"])
            .with_component(stroked("a", 2.0).with_attr("fill", "#123"))
            .with_component(stroked("b", 2.0).with_attr("fill", "#123"))
            .with_component(stroked("c", 2.0).with_attr("fill", "#456"));
        let outcome = check_style(&doc, &DesignIntent::default());
        assert_eq!(
            outcome.warnings,
            ["Color #123 is not in the document palette", "Color #456 is not in the document palette"]
        );
        assert_eq!(outcome.score, 90);
    }
}
