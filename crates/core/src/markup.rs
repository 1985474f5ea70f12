//! Small text helpers for the HTML and SVG the portal generates.

/// Escape text for inclusion in HTML/SVG element content or attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}
