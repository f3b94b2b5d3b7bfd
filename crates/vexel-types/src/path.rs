//! Path data (`d` attribute) handling.
//!
//! Covers what synthesis and validation need: parsing into segments,
//! extent computation, projection of template paths from the 0–100 local
//! space, and re-anchoring of the leading move-to of a reused path.

use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

use crate::numeric::{format_number, sanitize, NumericError};
use crate::shape::Frame;

/// Side length of the local template space.
pub const TEMPLATE_SPACE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,

    #[error("path data must start with a move-to command")]
    MissingMoveTo,

    #[error("malformed path data: {0}")]
    Syntax(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// One drawing command with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub command: char,
    pub args: Vec<f64>,
}

impl From<PathSegment> for Segment {
    fn from(seg: PathSegment) -> Self {
        let (command, abs, args) = match seg {
            PathSegment::MoveTo { abs, x, y } => ('M', abs, vec![x, y]),
            PathSegment::LineTo { abs, x, y } => ('L', abs, vec![x, y]),
            PathSegment::HorizontalLineTo { abs, x } => ('H', abs, vec![x]),
            PathSegment::VerticalLineTo { abs, y } => ('V', abs, vec![y]),
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => ('C', abs, vec![x1, y1, x2, y2, x, y]),
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => ('S', abs, vec![x2, y2, x, y]),
            PathSegment::Quadratic { abs, x1, y1, x, y } => ('Q', abs, vec![x1, y1, x, y]),
            PathSegment::SmoothQuadratic { abs, x, y } => ('T', abs, vec![x, y]),
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                'A',
                abs,
                vec![
                    rx,
                    ry,
                    x_axis_rotation,
                    f64::from(u8::from(large_arc)),
                    f64::from(u8::from(sweep)),
                    x,
                    y,
                ],
            ),
            PathSegment::ClosePath { abs } => ('Z', abs, Vec::new()),
        };
        let command = if abs { command } else { command.to_ascii_lowercase() };
        Segment { command, args }
    }
}

fn starts_with_move_to(d: &str) -> bool {
    matches!(d.trim_start().chars().next(), Some('M') | Some('m'))
}

/// Parse path data into segments. Implicit command repetition comes back
/// as explicit segments.
pub fn parse(d: &str) -> Result<Vec<Segment>, PathError> {
    if d.trim().is_empty() {
        return Err(PathError::Empty);
    }
    if !starts_with_move_to(d) {
        return Err(PathError::MissingMoveTo);
    }
    PathParser::from(d)
        .map(|seg| {
            seg.map(Segment::from)
                .map_err(|e| PathError::Syntax(e.to_string()))
        })
        .collect()
}

/// Serialize segments back to path data.
pub fn to_data(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| {
            if seg.args.is_empty() {
                seg.command.to_string()
            } else {
                let args: Vec<String> = seg.args.iter().map(|a| format_number(*a)).collect();
                format!("{} {}", seg.command, args.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Axis-aligned extent `(min_x, min_y, max_x, max_y)` of the path's
/// end and control points. Arc bulges are not included.
pub fn extent(segments: &[Segment]) -> Option<(f64, f64, f64, f64)> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    let (mut cx, mut cy) = (0.0_f64, 0.0_f64);
    let (mut sx, mut sy) = (0.0_f64, 0.0_f64);

    for seg in segments {
        let rel = seg.command.is_ascii_lowercase();
        let (ox, oy) = if rel { (cx, cy) } else { (0.0, 0.0) };
        let a = &seg.args;
        match seg.command.to_ascii_uppercase() {
            'M' => {
                cx = ox + a[0];
                cy = oy + a[1];
                sx = cx;
                sy = cy;
                points.push((cx, cy));
            }
            'L' | 'T' => {
                cx = ox + a[0];
                cy = oy + a[1];
                points.push((cx, cy));
            }
            'H' => {
                cx = ox + a[0];
                points.push((cx, cy));
            }
            'V' => {
                cy = oy + a[0];
                points.push((cx, cy));
            }
            'Q' | 'S' => {
                points.push((ox + a[0], oy + a[1]));
                cx = ox + a[2];
                cy = oy + a[3];
                points.push((cx, cy));
            }
            'C' => {
                points.push((ox + a[0], oy + a[1]));
                points.push((ox + a[2], oy + a[3]));
                cx = ox + a[4];
                cy = oy + a[5];
                points.push((cx, cy));
            }
            'A' => {
                cx = ox + a[5];
                cy = oy + a[6];
                points.push((cx, cy));
            }
            _ => {
                cx = sx;
                cy = sy;
            }
        }
    }

    let first = points.first()?;
    Some(points.iter().fold(
        (first.0, first.1, first.0, first.1),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    ))
}

/// Map a coordinate from template space onto a frame.
pub fn project_point(frame: &Frame, x: f64, y: f64) -> (f64, f64) {
    (
        frame.x + (x - TEMPLATE_SPACE / 2.0) * (frame.width / TEMPLATE_SPACE),
        frame.y + (y - TEMPLATE_SPACE / 2.0) * (frame.height / TEMPLATE_SPACE),
    )
}

/// Project every coordinate of template path data onto a frame.
///
/// Absolute coordinates are translated and scaled; relative ones are only
/// scaled.
pub fn project(d: &str, frame: &Frame) -> Result<String, PathError> {
    let sx = frame.width / TEMPLATE_SPACE;
    let sy = frame.height / TEMPLATE_SPACE;
    let mut segments = parse(d)?;

    for seg in &mut segments {
        let rel = seg.command.is_ascii_lowercase();
        let map_x = |v: f64| if rel { v * sx } else { project_point(frame, v, 0.0).0 };
        let map_y = |v: f64| if rel { v * sy } else { project_point(frame, 0.0, v).1 };
        let a = &mut seg.args;
        match seg.command.to_ascii_uppercase() {
            'H' => a[0] = map_x(a[0]),
            'V' => a[0] = map_y(a[0]),
            'A' => {
                a[0] *= sx;
                a[1] *= sy;
                a[5] = map_x(a[5]);
                a[6] = map_y(a[6]);
            }
            'Z' => {}
            _ => {
                for pair in a.chunks_mut(2) {
                    pair[0] = map_x(pair[0]);
                    pair[1] = map_y(pair[1]);
                }
            }
        }
        for v in a.iter_mut() {
            *v = sanitize("d", *v)?;
        }
    }

    Ok(to_data(&segments))
}

/// Read one coordinate starting at byte `pos`, skipping leading separators.
/// Returns the value and the byte offset just past it.
fn coordinate_at(d: &str, pos: usize) -> Result<(f64, usize), PathError> {
    let bytes = d.as_bytes();
    let mut start = pos;
    while start < bytes.len() && (bytes[start].is_ascii_whitespace() || bytes[start] == b',') {
        start += 1;
    }
    let mut end = start;
    if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
        end += 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            b'e' | b'E' => {
                end += 1;
                if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
                    end += 1;
                }
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                break;
            }
            _ => break,
        }
    }
    let raw = &d[start..end];
    raw.parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| PathError::Syntax(format!("expected a coordinate at position {}", start)))
}

/// Re-anchor only the leading move-to of a path onto a frame.
///
/// Only the first coordinate pair is rewritten; every byte after it is
/// carried through as is. Data that does not start with a move-to is
/// returned unchanged.
pub fn reanchor_move_to(d: &str, frame: &Frame) -> Result<String, PathError> {
    let trimmed = d.trim_start();
    let Some(command) = trimmed.chars().next().filter(|c| matches!(c, 'M' | 'm')) else {
        return Ok(d.to_string());
    };
    let (x, after_x) = coordinate_at(trimmed, 1)?;
    let (y, after_y) = coordinate_at(trimmed, after_x)?;

    let (nx, ny) = project_point(frame, x, y);
    let nx = sanitize("d", nx)?;
    let ny = sanitize("d", ny)?;
    Ok(format!(
        "{} {} {}{}",
        command,
        format_number(nx),
        format_number(ny),
        &trimmed[after_y..]
    ))
}
