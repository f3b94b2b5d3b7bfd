//! Text-level repair of SVG markup from other producers.

use std::fmt;

use regex::{Captures, Regex};
use tracing::debug;
use vexel_types::{format_number, round2};

use crate::error::{RepairError, RepairResult};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const DEFAULT_VIEWPORT: f64 = 512.0;

/// One applied markup fix.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupFix {
    NamespaceAdded,
    ViewBoxAdded { width: f64, height: f64 },
    StrokeWidthClamped { from: f64, to: f64 },
    PrecisionRounded { count: usize },
}

impl fmt::Display for MarkupFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupFix::NamespaceAdded => f.write_str("added xmlns"),
            MarkupFix::ViewBoxAdded { width, height } => write!(
                f,
                "added viewBox 0 0 {} {}",
                format_number(*width),
                format_number(*height)
            ),
            MarkupFix::StrokeWidthClamped { from, to } => write!(
                f,
                "clamped stroke-width {} to {}",
                format_number(*from),
                format_number(*to)
            ),
            MarkupFix::PrecisionRounded { count } => {
                write!(f, "rounded {} numbers to 2 decimals", count)
            }
        }
    }
}

/// Repaired markup and what changed.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupReport {
    pub success: bool,
    pub markup: String,
    pub fixes: Vec<MarkupFix>,
}

/// Regex-driven markup repairer.
pub struct MarkupRepairer {
    min_stroke_width: f64,
    root: Regex,
    dimension: Regex,
    stroke_width: Regex,
    long_decimal: Regex,
}

impl MarkupRepairer {
    pub fn new(min_stroke_width: f64) -> RepairResult<Self> {
        Ok(Self {
            min_stroke_width,
            root: Regex::new(r"<svg\b([^>]*?)(/?)>")?,
            dimension: Regex::new(r#"\b(width|height)\s*=\s*["']\s*([0-9]*\.?[0-9]+)(?:px)?\s*["']"#)?,
            stroke_width: Regex::new(
                r#"(stroke-width\s*=\s*["']|stroke-width\s*:\s*)(-?[0-9]*\.?[0-9]+)"#,
            )?,
            long_decimal: Regex::new(r"-?[0-9]+\.[0-9]{3,}")?,
        })
    }

    pub fn repair(&self, markup: &str) -> RepairResult<MarkupReport> {
        let root = self.root.captures(markup).ok_or(RepairError::NotSvg)?;
        let whole = root.get(0).ok_or(RepairError::NotSvg)?;
        let attrs = root.get(1).map_or("", |m| m.as_str());
        let self_closing = root.get(2).map_or("", |m| m.as_str());
        let mut fixes = Vec::new();

        let mut injected = String::new();
        if !attrs.contains("xmlns=") {
            injected.push_str(&format!(r#" xmlns="{}""#, SVG_NAMESPACE));
            fixes.push(MarkupFix::NamespaceAdded);
        }
        if !attrs.contains("viewBox") {
            let (width, height) = self.root_dimensions(attrs);
            injected.push_str(&format!(
                r#" viewBox="0 0 {} {}""#,
                format_number(width),
                format_number(height)
            ));
            fixes.push(MarkupFix::ViewBoxAdded { width, height });
        }

        let mut out = String::with_capacity(markup.len() + injected.len());
        out.push_str(&markup[..whole.start()]);
        out.push_str("<svg");
        out.push_str(&injected);
        out.push_str(attrs);
        out.push_str(self_closing);
        out.push('>');
        out.push_str(&markup[whole.end()..]);

        let min = self.min_stroke_width;
        let mut clamped = Vec::new();
        let out = self
            .stroke_width
            .replace_all(&out, |caps: &Captures| {
                let prefix = &caps[1];
                match caps[2].parse::<f64>() {
                    Ok(value) if value < min => {
                        clamped.push(MarkupFix::StrokeWidthClamped { from: value, to: min });
                        format!("{}{}", prefix, format_number(min))
                    }
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();
        fixes.extend(clamped);

        let mut rounded = 0usize;
        let out = self
            .long_decimal
            .replace_all(&out, |caps: &Captures| match caps[0].parse::<f64>() {
                Ok(value) => {
                    rounded += 1;
                    format_number(round2(value))
                }
                Err(_) => caps[0].to_string(),
            })
            .into_owned();
        if rounded > 0 {
            fixes.push(MarkupFix::PrecisionRounded { count: rounded });
        }

        debug!(fixes = fixes.len(), "Markup repair pass");
        Ok(MarkupReport {
            success: !fixes.is_empty(),
            markup: out,
            fixes,
        })
    }

    /// Width and height declared on the root, else the default viewport.
    fn root_dimensions(&self, attrs: &str) -> (f64, f64) {
        let mut width = None;
        let mut height = None;
        for caps in self.dimension.captures_iter(attrs) {
            let value = caps[2].parse::<f64>().ok().filter(|v| *v > 0.0);
            match &caps[1] {
                "width" => width = width.or(value),
                _ => height = height.or(value),
            }
        }
        (
            width.unwrap_or(DEFAULT_VIEWPORT),
            height.unwrap_or(DEFAULT_VIEWPORT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repairer() -> MarkupRepairer {
        MarkupRepairer::new(1.0).unwrap()
    }

    #[test]
    fn injects_namespace_and_viewbox_from_dimensions() {
        let report = repairer()
            .repair(r#"<svg width="300" height="200"><circle r="4"/></svg>"#)
            .unwrap();
        assert_eq!(
            report.markup,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 200" width="300" height="200"><circle r="4"/></svg>"#
        );
        assert_eq!(
            report.fixes,
            [
                MarkupFix::NamespaceAdded,
                MarkupFix::ViewBoxAdded {
                    width: 300.0,
                    height: 200.0
                }
            ]
        );
    }

    #[test]
    fn default_viewport_without_dimensions() {
        let report = repairer()
            .repair(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#)
            .unwrap();
        assert!(report.markup.contains(r#"viewBox="0 0 512 512""#));
        assert_eq!(report.fixes.len(), 1);
    }

    #[test]
    fn clamps_thin_strokes_in_attributes_and_styles() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><line stroke-width="0.5"/><path style="stroke-width: 0.25" stroke-width="3"/></svg>"#;
        let report = repairer().repair(svg).unwrap();
        assert!(report.markup.contains(r#"<line stroke-width="1"/>"#));
        assert!(report.markup.contains(r#"style="stroke-width: 1""#));
        assert!(report.markup.contains(r#"stroke-width="3""#));
        assert_eq!(report.fixes.len(), 2);
    }

    #[test]
    fn rounds_long_decimals() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><circle cx="1.23456" cy="2.5" fill="#112233"/></svg>"##;
        let report = repairer().repair(svg).unwrap();
        assert!(report.markup.contains(r#"cx="1.23""#));
        assert!(report.markup.contains(r#"cy="2.5""#));
        assert!(report.markup.contains("#112233"));
        assert_eq!(report.fixes, [MarkupFix::PrecisionRounded { count: 1 }]);
    }

    #[test]
    fn clean_markup_is_untouched() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"/>"#;
        let report = repairer().repair(svg).unwrap();
        assert!(!report.success);
        assert_eq!(report.markup, svg);
    }

    #[test]
    fn rejects_non_svg() {
        assert!(matches!(repairer().repair("<html></html>"), Err(RepairError::NotSvg)));
    }
}
