use vexel_types::{format_number, DesignIntent, SvgDocument};

use super::CheckOutcome;

const MIN_DIMENSION: f64 = 16.0;
const MAX_DIMENSION: f64 = 2048.0;
/// Share of out-of-bounds components above which the finding is blocking.
const OUT_OF_BOUNDS_RATIO: f64 = 0.5;

/// Component count, bounds, and containment.
pub fn check_structure(document: &SvgDocument, intent: &DesignIntent) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let count = document.components.len();

    if let Some(max) = intent.constraints.max_elements {
        if count > max {
            outcome.issue(format!("Too many components: {} > {}", count, max), 30);
        }
    }

    let bounds = document.bounds;
    if !bounds.is_valid() {
        outcome.issue(
            format!(
                "Invalid document bounds: {}x{}",
                format_number(bounds.width),
                format_number(bounds.height)
            ),
            20,
        );
    } else {
        if bounds.width < MIN_DIMENSION || bounds.height < MIN_DIMENSION {
            outcome.warn(
                format!(
                    "Document bounds {}x{} are smaller than {}x{}",
                    format_number(bounds.width),
                    format_number(bounds.height),
                    MIN_DIMENSION,
                    MIN_DIMENSION
                ),
                5,
            );
        }
        if bounds.width > MAX_DIMENSION || bounds.height > MAX_DIMENSION {
            outcome.warn(
                format!(
                    "Document bounds {}x{} are larger than {}x{}",
                    format_number(bounds.width),
                    format_number(bounds.height),
                    MAX_DIMENSION,
                    MAX_DIMENSION
                ),
                5,
            );
        }

        let outside = document
            .components
            .iter()
            .filter(|c| c.element.is_out_of_bounds(&c.attributes, &bounds))
            .count();
        if outside > 0 {
            let message = format!("{} of {} components extend outside the document bounds", outside, count);
            if outside as f64 / count as f64 > OUT_OF_BOUNDS_RATIO {
                outcome.issue(message, 25);
            } else {
                outcome.warn(message, 10);
            }
        }
    }

    if count == 0 {
        outcome.issues.push("Document has no components".to_string());
        outcome.score = 0;
    }

    outcome
}
