//! The four check categories.
//!
//! Each category is a pure function from `(document, intent)` to a
//! [`CheckOutcome`]. Categories do not see each other's results; the gate
//! folds them into one verdict.

mod motif;
mod structural;
mod style;
mod technical;

pub use motif::check_motifs;
pub use structural::check_structure;
pub use style::{check_style, MIN_STROKE_WIDTH};
pub use technical::check_technical;

use vexel_types::{CategoryReport, DesignIntent, SvgDocument};

/// Issues, warnings and raw score of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Starts at 100; may go negative before clamping.
    pub score: i32,
}

impl Default for CheckOutcome {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            warnings: Vec::new(),
            score: 100,
        }
    }
}

impl CheckOutcome {
    pub(crate) fn issue(&mut self, message: impl Into<String>, penalty: i32) {
        self.issues.push(message.into());
        self.score -= penalty;
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>, penalty: i32) {
        self.warnings.push(message.into());
        self.score -= penalty;
    }

    /// Score clamped to 0–100.
    pub fn clamped(&self) -> u32 {
        self.score.clamp(0, 100) as u32
    }
}

/// A check category and its weight in the overall score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Structural,
    Motif,
    Style,
    Technical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Structural,
        Category::Motif,
        Category::Style,
        Category::Technical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::Motif => "motif",
            Category::Style => "style",
            Category::Technical => "technical",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Category::Structural => 0.30,
            Category::Motif => 0.25,
            Category::Style => 0.25,
            Category::Technical => 0.20,
        }
    }

    pub fn run(&self, document: &SvgDocument, intent: &DesignIntent) -> CheckOutcome {
        match self {
            Category::Structural => check_structure(document, intent),
            Category::Motif => check_motifs(document, intent),
            Category::Style => check_style(document, intent),
            Category::Technical => check_technical(document, intent),
        }
    }

    pub fn report(&self, outcome: CheckOutcome) -> CategoryReport {
        CategoryReport {
            name: self.name().to_string(),
            weight: self.weight(),
            score: outcome.clamped(),
            issues: outcome.issues,
            warnings: outcome.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Category::ALL.iter().map(Category::weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn outcome_clamps_both_ends() {
        let mut outcome = CheckOutcome::default();
        outcome.issue("a", 80);
        outcome.issue("b", 80);
        assert_eq!(outcome.score, -60);
        assert_eq!(outcome.clamped(), 0);
        assert_eq!(CheckOutcome::default().clamped(), 100);
    }
}
