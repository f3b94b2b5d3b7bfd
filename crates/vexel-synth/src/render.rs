//! SVG markup rendering of a document.

use std::fmt::Write;

use tracing::warn;
use vexel_types::{format_number, SvgDocument};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Escape a value for use inside a double-quoted XML attribute or text node.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `name` is usable as an XML attribute name.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

/// Render the document as standalone SVG markup, components in paint order.
pub fn render_svg(document: &SvgDocument) -> String {
    let w = format_number(document.bounds.width);
    let h = format_number(document.bounds.height);
    let mut svg = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        SVG_NAMESPACE, w, h, w, h
    );
    if !document.metadata.description.is_empty() {
        let _ = writeln!(svg, "  <desc>{}</desc>", escape(&document.metadata.description));
    }
    if let Some(bg) = document.metadata.background.as_deref() {
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape(bg)
        );
    }

    for component in &document.components {
        let _ = write!(svg, r#"  <{} id="{}""#, component.element, escape(&component.id));
        if let Some(motif) = component.metadata.motif.as_deref() {
            let _ = write!(svg, r#" data-motif="{}""#, escape(motif));
        }
        for (name, value) in &component.attributes {
            if !is_xml_name(name) {
                warn!(component = %component.id, attribute = %name, "Skipping attribute with invalid name");
                continue;
            }
            let _ = write!(svg, r#" {}="{}""#, name, escape(&value.to_string()));
        }
        svg.push_str("/>\n");
    }

    svg.push_str("</svg>\n");
    svg
}
