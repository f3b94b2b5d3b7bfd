//! Design intent: the target a document is judged against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stroke and fill rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeRules {
    pub stroke_only: bool,
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
    pub allow_fill: bool,
}

impl Default for StrokeRules {
    fn default() -> Self {
        Self {
            stroke_only: false,
            min_stroke_width: 1.0,
            max_stroke_width: 4.0,
            allow_fill: true,
        }
    }
}

/// Stylistic targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleIntent {
    pub palette: Vec<String>,
    pub stroke_rules: StrokeRules,
    pub density: String,
    pub symmetry: String,
}

impl Default for StyleIntent {
    fn default() -> Self {
        Self {
            palette: Vec::new(),
            stroke_rules: StrokeRules::default(),
            density: "medium".to_string(),
            symmetry: "none".to_string(),
        }
    }
}

/// Layout targets. Advisory; not scored directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutIntent {
    pub sizes: Vec<String>,
    pub counts: BTreeMap<String, u32>,
    pub arrangement: String,
}

impl Default for LayoutIntent {
    fn default() -> Self {
        Self {
            sizes: Vec::new(),
            counts: BTreeMap::new(),
            arrangement: "centered".to_string(),
        }
    }
}

/// Hard constraints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntentConstraints {
    pub stroke_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_elements: Option<usize>,
    pub required_motifs: Vec<String>,
}

/// What a finished document is supposed to satisfy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignIntent {
    pub style: StyleIntent,
    /// Allowed/expected motif tags.
    pub motifs: Vec<String>,
    pub layout: LayoutIntent,
    pub constraints: IntentConstraints,
}

impl DesignIntent {
    /// Stroke-only is required by either the constraints or the stroke rules.
    pub fn requires_stroke_only(&self) -> bool {
        self.constraints.stroke_only
            || self.style.stroke_rules.stroke_only
            || !self.style.stroke_rules.allow_fill
    }

    pub fn with_max_elements(mut self, max: usize) -> Self {
        self.constraints.max_elements = Some(max);
        self
    }

    pub fn with_required_motifs<I, S>(mut self, motifs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.required_motifs = motifs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_motifs<I, S>(mut self, motifs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.motifs = motifs.into_iter().map(Into::into).collect();
        self
    }

    pub fn stroke_only(mut self) -> Self {
        self.constraints.stroke_only = true;
        self
    }
}
