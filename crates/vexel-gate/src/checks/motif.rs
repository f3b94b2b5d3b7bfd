use vexel_types::{DesignIntent, SvgDocument};

use super::CheckOutcome;

/// Max/min usage ratio above which motif usage counts as imbalanced.
const IMBALANCE_RATIO: f64 = 3.0;

/// Motif usage counts in first-seen order.
fn motif_counts(document: &SvgDocument) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for motif in document
        .components
        .iter()
        .filter_map(|c| c.metadata.motif.as_deref())
        .filter(|m| !m.is_empty())
    {
        match counts.iter_mut().find(|(m, _)| *m == motif) {
            Some((_, n)) => *n += 1,
            None => counts.push((motif, 1)),
        }
    }
    counts
}

/// Required motifs, usage balance, and unexpected motifs.
pub fn check_motifs(document: &SvgDocument, intent: &DesignIntent) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let counts = motif_counts(document);
    let used = |name: &str| counts.iter().any(|(m, _)| *m == name);

    let missing: Vec<&str> = intent
        .constraints
        .required_motifs
        .iter()
        .map(String::as_str)
        .filter(|m| !used(*m))
        .collect();
    if !missing.is_empty() {
        outcome.issue(
            format!("Missing required motifs: {}", missing.join(", ")),
            20 * missing.len() as i32,
        );
    }

    if counts.len() > 1 {
        let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let min = counts.iter().map(|(_, n)| *n).min().unwrap_or(0);
        if min > 0 && max as f64 / min as f64 > IMBALANCE_RATIO {
            outcome.warn(
                format!("Imbalanced motif usage: most used appears {} times, least used {}", max, min),
                10,
            );
        }
    }

    let declared = !intent.motifs.is_empty() || !intent.constraints.required_motifs.is_empty();
    if declared {
        let unexpected: Vec<&str> = counts
            .iter()
            .map(|(m, _)| *m)
            .filter(|m| {
                !intent.motifs.iter().any(|e| e == m)
                    && !intent.constraints.required_motifs.iter().any(|r| r == m)
            })
            .collect();
        if !unexpected.is_empty() {
            outcome.warn(format!("Unexpected motifs: {}", unexpected.join(", ")), 5);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexel_types::{Bounds, Component, ShapeKind};

    fn doc(motifs: &[&str]) -> SvgDocument {
        let mut doc = SvgDocument::new(Bounds::new(100.0, 100.0));
        for (i, motif) in motifs.iter().enumerate() {
            doc.components
                .push(Component::new(format!("c{}", i), ShapeKind::Circle).with_motif(*motif));
        }
        doc
    }

    #[test]
    fn missing_motifs_keep_required_order() {
        let intent = DesignIntent::default().with_required_motifs(["circle", "wave", "triangle"]);
        let outcome = check_motifs(&doc(&["wave"]), &intent);
        assert_eq!(outcome.issues, ["Missing required motifs: circle, triangle"]);
        assert_eq!(outcome.score, 60);
    }

    #[test]
    fn imbalance_is_a_warning() {
        let outcome = check_motifs(&doc(&["a", "a", "a", "a", "b"]), &DesignIntent::default());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("Imbalanced motif usage"));
        assert_eq!(outcome.score, 90);
    }

    #[test]
    fn unexpected_motifs_penalized_once() {
        let intent = DesignIntent::default().with_motifs(["sun"]);
        let outcome = check_motifs(&doc(&["sun", "moon", "star", "moon"]), &intent);
        assert_eq!(outcome.warnings, ["Unexpected motifs: moon, star"]);
        assert_eq!(outcome.score, 95);
    }

    #[test]
    fn undeclared_intent_accepts_any_motif() {
        let outcome = check_motifs(&doc(&["sun", "moon"]), &DesignIntent::default());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.score, 100);
    }
}
