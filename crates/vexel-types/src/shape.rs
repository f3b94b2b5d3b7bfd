//! The closed set of primitive shapes and their geometry.
//!
//! Each [`ShapeKind`] knows how to resolve its attributes from a frame and
//! how to judge an attribute map: validity, degeneracy, extent and whether
//! it leaves the viewport. Keeping all four behind one `match` per operation
//! means a new shape cannot be half-supported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{number, text, AttributeValue, Attributes};
use crate::numeric::{format_number, sanitize, NumericError};
use crate::path;
use crate::plan::Bounds;

/// Primitive shape vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rect,
    Ellipse,
    Line,
    Polygon,
    Polyline,
    Path,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Circle,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::Polygon,
        ShapeKind::Polyline,
        ShapeKind::Path,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Path => "path",
        }
    }

    /// Attributes that carry this shape's geometry.
    pub fn geometry_attributes(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Circle => &["cx", "cy", "r"],
            ShapeKind::Rect => &["x", "y", "width", "height"],
            ShapeKind::Ellipse => &["cx", "cy", "rx", "ry"],
            ShapeKind::Line => &["x1", "y1", "x2", "y2"],
            ShapeKind::Polygon | ShapeKind::Polyline => &["points"],
            ShapeKind::Path => &["d"],
        }
    }

    /// Whether geometry is given by a point list or path data rather than
    /// scalar attributes.
    pub fn is_freeform(&self) -> bool {
        matches!(self, ShapeKind::Polygon | ShapeKind::Polyline | ShapeKind::Path)
    }

    /// Procedural geometry for a frame. Every value is sanitized.
    pub fn resolve(&self, frame: &Frame, motif: Option<&str>) -> Result<Attributes, NumericError> {
        let Frame { x, y, width, height } = *frame;
        let (hw, hh) = (width / 2.0, height / 2.0);
        let mut attrs = Attributes::new();
        let a = &mut attrs;

        match self {
            ShapeKind::Circle => {
                put(a, "cx", x)?;
                put(a, "cy", y)?;
                put(a, "r", width.min(height) / 2.0)?;
            }
            ShapeKind::Rect => {
                put(a, "x", x - hw)?;
                put(a, "y", y - hh)?;
                put(a, "width", width)?;
                put(a, "height", height)?;
            }
            ShapeKind::Ellipse => {
                put(a, "cx", x)?;
                put(a, "cy", y)?;
                put(a, "rx", hw)?;
                put(a, "ry", hh)?;
            }
            ShapeKind::Line => {
                put(a, "x1", x - hw)?;
                put(a, "y1", y)?;
                put(a, "x2", x + hw)?;
                put(a, "y2", y)?;
            }
            ShapeKind::Polygon => {
                let points = [(x, y - hh), (x + hw, y + hh), (x - hw, y + hh)];
                a.insert("points".into(), AttributeValue::Text(format_points(&points)?));
            }
            ShapeKind::Polyline => {
                let points: Vec<(f64, f64)> = (0..5)
                    .map(|i| {
                        let px = x - hw + width * (i as f64) / 4.0;
                        let py = if i % 2 == 0 { y + hh } else { y - hh };
                        (px, py)
                    })
                    .collect();
                a.insert("points".into(), AttributeValue::Text(format_points(&points)?));
            }
            ShapeKind::Path => {
                a.insert("d".into(), AttributeValue::Text(motif_path(frame, motif)?));
            }
        }
        Ok(attrs)
    }

    /// Structural validity. `Err` carries the reason.
    ///
    /// Non-finite numbers are reported separately and are not judged here.
    pub fn check_valid(&self, attrs: &Attributes) -> Result<(), String> {
        match self {
            ShapeKind::Circle => non_negative(attrs, &["r"], "radius"),
            ShapeKind::Rect => non_negative(attrs, &["width", "height"], "size"),
            ShapeKind::Ellipse => non_negative(attrs, &["rx", "ry"], "radius"),
            ShapeKind::Line => {
                for name in ["x1", "y1", "x2", "y2"] {
                    if number(attrs, name).is_none() {
                        return Err(format!("missing {}", name));
                    }
                }
                Ok(())
            }
            ShapeKind::Polygon | ShapeKind::Polyline => {
                let raw = text(attrs, "points").unwrap_or("");
                if raw.trim().is_empty() {
                    return Err("empty points".into());
                }
                let points = parse_points(raw)?;
                let min = if *self == ShapeKind::Polygon { 3 } else { 2 };
                if points.len() < min {
                    return Err(format!("needs at least {} points, found {}", min, points.len()));
                }
                Ok(())
            }
            ShapeKind::Path => {
                let raw = text(attrs, "d").unwrap_or("");
                if raw.trim().is_empty() {
                    return Err("empty path data".into());
                }
                path::parse(raw).map(|_| ()).map_err(|e| e.to_string())
            }
        }
    }

    pub fn is_valid(&self, attrs: &Attributes) -> bool {
        self.check_valid(attrs).is_ok()
    }

    /// Zero-area or zero-length geometry.
    pub fn is_degenerate(&self, attrs: &Attributes) -> bool {
        let zero = |name: &str| number(attrs, name) == Some(0.0);
        match self {
            ShapeKind::Circle => zero("r"),
            ShapeKind::Rect => zero("width") || zero("height"),
            ShapeKind::Ellipse => zero("rx") || zero("ry"),
            ShapeKind::Line => {
                match (
                    number(attrs, "x1"),
                    number(attrs, "y1"),
                    number(attrs, "x2"),
                    number(attrs, "y2"),
                ) {
                    (Some(x1), Some(y1), Some(x2), Some(y2)) => x1 == x2 && y1 == y2,
                    _ => false,
                }
            }
            ShapeKind::Polygon | ShapeKind::Polyline | ShapeKind::Path => matches!(
                self.extent(attrs),
                Some((x0, y0, x1, y1)) if x0 == x1 && y0 == y1
            ),
        }
    }

    /// Axis-aligned extent `(min_x, min_y, max_x, max_y)`, if computable.
    ///
    /// Missing or unparsable geometry yields `None`. Non-finite numbers pass
    /// through so callers can detect them.
    pub fn extent(&self, attrs: &Attributes) -> Option<(f64, f64, f64, f64)> {
        let n = |name: &str| number(attrs, name);
        match self {
            ShapeKind::Circle => {
                let (cx, cy, r) = (n("cx")?, n("cy")?, n("r")?);
                Some((cx - r, cy - r, cx + r, cy + r))
            }
            ShapeKind::Rect => {
                let (x, y, w, h) = (n("x")?, n("y")?, n("width")?, n("height")?);
                Some((x, y, x + w, y + h))
            }
            ShapeKind::Ellipse => {
                let (cx, cy, rx, ry) = (n("cx")?, n("cy")?, n("rx")?, n("ry")?);
                Some((cx - rx, cy - ry, cx + rx, cy + ry))
            }
            ShapeKind::Line => {
                let (x1, y1, x2, y2) = (n("x1")?, n("y1")?, n("x2")?, n("y2")?);
                Some((x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)))
            }
            ShapeKind::Polygon | ShapeKind::Polyline => {
                let points = parse_points(text(attrs, "points")?).ok()?;
                let first = points.first()?;
                Some(points.iter().fold(
                    (first.0, first.1, first.0, first.1),
                    |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                ))
            }
            ShapeKind::Path => {
                let segments = path::parse(text(attrs, "d")?).ok()?;
                path::extent(&segments)
            }
        }
    }

    /// Whether the geometry leaves the viewport. A non-finite coordinate is
    /// treated as entirely outside.
    pub fn is_out_of_bounds(&self, attrs: &Attributes, bounds: &Bounds) -> bool {
        let has_non_finite = self
            .geometry_attributes()
            .iter()
            .filter_map(|name| number(attrs, name))
            .any(|v| !v.is_finite());
        if has_non_finite {
            return true;
        }
        match self.extent(attrs) {
            Some((x0, y0, x1, y1)) => {
                if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
                    return true;
                }
                x0 < 0.0 || y0 < 0.0 || x1 > bounds.width || y1 > bounds.height
            }
            None => false,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown shape kind: {}", s))
    }
}

/// Centre-based placement of a shape in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

fn put(attrs: &mut Attributes, name: &str, value: f64) -> Result<(), NumericError> {
    attrs.insert(name.to_string(), AttributeValue::Number(sanitize(name, value)?));
    Ok(())
}

fn non_negative(attrs: &Attributes, names: &[&str], what: &str) -> Result<(), String> {
    for name in names {
        match number(attrs, name) {
            None => return Err(format!("missing {}", name)),
            Some(v) if v < 0.0 => {
                return Err(format!("negative {} ({} = {})", what, name, format_number(v)))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Parse a `points` list (`"x,y x,y"` or whitespace separated).
pub fn parse_points(raw: &str) -> Result<Vec<(f64, f64)>, String> {
    let numbers = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("malformed number '{}' in points", s)))
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.len() % 2 != 0 {
        return Err("odd number of coordinates in points".into());
    }
    Ok(numbers.chunks(2).map(|p| (p[0], p[1])).collect())
}

/// Sanitize and serialize a point list.
pub fn format_points(points: &[(f64, f64)]) -> Result<String, NumericError> {
    points
        .iter()
        .map(|&(x, y)| {
            Ok(format!(
                "{},{}",
                format_number(sanitize("points", x)?),
                format_number(sanitize("points", y)?)
            ))
        })
        .collect::<Result<Vec<_>, NumericError>>()
        .map(|parts| parts.join(" "))
}

/// Project a template point list from the 0–100 local space onto a frame.
pub fn project_points(raw: &str, frame: &Frame) -> Result<Option<String>, NumericError> {
    let Ok(points) = parse_points(raw) else {
        return Ok(None);
    };
    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|&(px, py)| path::project_point(frame, px, py))
        .collect();
    format_points(&projected).map(Some)
}

/// Ratio of the star's inner radius to its outer radius.
const STAR_INNER_RATIO: f64 = 0.4;

fn motif_path(frame: &Frame, motif: Option<&str>) -> Result<String, NumericError> {
    let Frame { x, y, width, height } = *frame;
    let (hw, hh) = (width / 2.0, height / 2.0);
    let c = |v: f64| sanitize("d", v).map(format_number);

    let d = match motif.map(|m| m.to_ascii_lowercase()).as_deref() {
        Some("wave") => format!(
            "M {} {} Q {} {} {} {} Q {} {} {} {}",
            c(x - hw)?,
            c(y)?,
            c(x - hw / 2.0)?,
            c(y - hh)?,
            c(x)?,
            c(y)?,
            c(x + hw / 2.0)?,
            c(y + hh)?,
            c(x + hw)?,
            c(y)?,
        ),
        Some("leaf") => format!(
            "M {} {} Q {} {} {} {} Q {} {} {} {} Q {} {} {} {} Q {} {} {} {} Z",
            c(x)?,
            c(y - hh)?,
            c(x + hw)?,
            c(y - hh)?,
            c(x + hw)?,
            c(y)?,
            c(x + hw)?,
            c(y + hh)?,
            c(x)?,
            c(y + hh)?,
            c(x - hw)?,
            c(y + hh)?,
            c(x - hw)?,
            c(y)?,
            c(x - hw)?,
            c(y - hh)?,
            c(x)?,
            c(y - hh)?,
        ),
        Some("star") => {
            let outer = hw.min(hh);
            let inner = outer * STAR_INNER_RATIO;
            let mut parts = Vec::with_capacity(10);
            for i in 0..10 {
                let angle = (-90.0 + 36.0 * i as f64).to_radians();
                let r = if i % 2 == 0 { outer } else { inner };
                let cmd = if i == 0 { "M" } else { "L" };
                parts.push(format!(
                    "{} {} {}",
                    cmd,
                    c(x + r * angle.cos())?,
                    c(y + r * angle.sin())?
                ));
            }
            format!("{} Z", parts.join(" "))
        }
        _ => format!(
            "M {} {} Q {} {} {} {}",
            c(x - hw)?,
            c(y + hh)?,
            c(x)?,
            c(y - hh)?,
            c(x + hw)?,
            c(y + hh)?,
        ),
    };
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(100.0, 100.0, 50.0, 50.0)
    }

    #[test]
    fn circle_resolves_from_centre() {
        let attrs = ShapeKind::Circle.resolve(&frame(), None).unwrap();
        assert_eq!(number(&attrs, "cx"), Some(100.0));
        assert_eq!(number(&attrs, "cy"), Some(100.0));
        assert_eq!(number(&attrs, "r"), Some(25.0));
    }

    #[test]
    fn rect_position_is_centre() {
        let attrs = ShapeKind::Rect
            .resolve(&Frame::new(200.0, 150.0, 60.0, 40.0), None)
            .unwrap();
        assert_eq!(number(&attrs, "x"), Some(170.0));
        assert_eq!(number(&attrs, "y"), Some(130.0));
        assert_eq!(number(&attrs, "width"), Some(60.0));
        assert_eq!(number(&attrs, "height"), Some(40.0));
    }

    #[test]
    fn line_is_horizontal() {
        let attrs = ShapeKind::Line.resolve(&frame(), None).unwrap();
        assert_eq!(number(&attrs, "x1"), Some(75.0));
        assert_eq!(number(&attrs, "x2"), Some(125.0));
        assert_eq!(number(&attrs, "y1"), number(&attrs, "y2"));
    }

    #[test]
    fn polygon_default_is_triangle() {
        let attrs = ShapeKind::Polygon.resolve(&frame(), None).unwrap();
        assert_eq!(text(&attrs, "points"), Some("100,75 125,125 75,125"));
        assert!(ShapeKind::Polygon.is_valid(&attrs));
    }

    #[test]
    fn star_has_ten_points_starting_at_top() {
        let attrs = ShapeKind::Path.resolve(&frame(), Some("star")).unwrap();
        let d = text(&attrs, "d").unwrap();
        assert!(d.starts_with("M 100 75 L"));
        assert!(d.ends_with('Z'));
        let segs = path::parse(d).unwrap();
        assert_eq!(segs.len(), 11);
    }

    #[test]
    fn wave_uses_two_quadratic_segments() {
        let attrs = ShapeKind::Path.resolve(&frame(), Some("wave")).unwrap();
        let segs = path::parse(text(&attrs, "d").unwrap()).unwrap();
        assert_eq!(segs.iter().filter(|s| s.command == 'Q').count(), 2);
    }

    #[test]
    fn leaf_is_closed_four_segment_curve() {
        let attrs = ShapeKind::Path.resolve(&frame(), Some("leaf")).unwrap();
        let segs = path::parse(text(&attrs, "d").unwrap()).unwrap();
        assert_eq!(segs.iter().filter(|s| s.command == 'Q').count(), 4);
        assert_eq!(segs.last().unwrap().command, 'Z');
    }

    #[test]
    fn non_finite_frame_is_rejected() {
        let err = ShapeKind::Circle
            .resolve(&Frame::new(f64::NAN, 0.0, 10.0, 10.0), None)
            .unwrap_err();
        assert!(err.to_string().contains("cx"));
    }

    #[test]
    fn validity_and_degeneracy() {
        let mut attrs = Attributes::new();
        attrs.insert("cx".into(), 10.0.into());
        attrs.insert("cy".into(), 10.0.into());
        attrs.insert("r".into(), (-1.0).into());
        assert!(ShapeKind::Circle.check_valid(&attrs).unwrap_err().contains("negative radius"));

        attrs.insert("r".into(), 0.0.into());
        assert!(ShapeKind::Circle.is_valid(&attrs));
        assert!(ShapeKind::Circle.is_degenerate(&attrs));

        let mut poly = Attributes::new();
        poly.insert("points".into(), "".into());
        assert_eq!(ShapeKind::Polygon.check_valid(&poly), Err("empty points".into()));

        let mut p = Attributes::new();
        p.insert("d".into(), " ".into());
        assert_eq!(ShapeKind::Path.check_valid(&p), Err("empty path data".into()));
    }

    #[test]
    fn out_of_bounds_detection() {
        let bounds = Bounds::new(200.0, 200.0);
        let inside = ShapeKind::Circle.resolve(&frame(), None).unwrap();
        assert!(!ShapeKind::Circle.is_out_of_bounds(&inside, &bounds));

        let outside = ShapeKind::Circle
            .resolve(&Frame::new(195.0, 100.0, 50.0, 50.0), None)
            .unwrap();
        assert!(ShapeKind::Circle.is_out_of_bounds(&outside, &bounds));

        let mut nan = inside.clone();
        nan.insert("cx".into(), f64::NAN.into());
        assert!(ShapeKind::Circle.is_out_of_bounds(&nan, &bounds));
    }

    #[test]
    fn projects_template_points() {
        let projected = project_points("50,0 100,100 0,100", &frame()).unwrap();
        assert_eq!(projected.as_deref(), Some("100,75 125,125 75,125"));
        assert_eq!(project_points("1,2,3", &frame()).unwrap(), None);
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("Ellipse".parse::<ShapeKind>(), Ok(ShapeKind::Ellipse));
        assert!("hexagon".parse::<ShapeKind>().is_err());
    }
}
