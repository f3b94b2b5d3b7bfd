//! Palette extraction and document description.

use vexel_types::{Component, StylePack};

/// Union, in encounter order, of component fills and strokes (excluding
/// `none`), the background and the style pack colors.
pub fn extract(components: &[Component], background: Option<&str>, style_pack: Option<&StylePack>) -> Vec<String> {
    let mut palette: Vec<String> = Vec::new();
    let mut push = |color: &str| {
        let color = color.trim();
        if !color.is_empty() && !palette.iter().any(|c| c == color) {
            palette.push(color.to_string());
        }
    };

    for component in components {
        if let Some(fill) = component.painted_fill() {
            push(fill);
        }
        if let Some(stroke) = component.painted_stroke() {
            push(stroke);
        }
    }
    if let Some(bg) = background.filter(|bg| vexel_types::is_paint(bg)) {
        push(bg);
    }
    if let Some(pack) = style_pack {
        for color in &pack.colors {
            push(color);
        }
    }
    palette
}

/// One-line summary: component count, arrangement (unless centered) and
/// the distinct motifs.
pub fn describe(components: &[Component], arrangement: &str) -> String {
    let count = components.len();
    let mut text = format!(
        "Composition with {} component{}",
        count,
        if count == 1 { "" } else { "s" }
    );

    let arrangement = arrangement.trim();
    if !arrangement.is_empty() && arrangement != "centered" {
        text.push_str(&format!(" in a {} arrangement", arrangement));
    }

    let mut motifs: Vec<&str> = Vec::new();
    for motif in components.iter().filter_map(|c| c.metadata.motif.as_deref()) {
        if !motif.is_empty() && !motifs.contains(&motif) {
            motifs.push(motif);
        }
    }
    if !motifs.is_empty() {
        text.push_str(&format!(" featuring {}", motifs.join(", ")));
    }
    text
}
