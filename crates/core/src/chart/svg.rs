//! Standalone SVG rendering of the dashboard charts.

use std::fmt::Write;

use super::{
    AreaChart, DepartmentBars, MonthlyBars, Series, DEPARTMENT_BAR_HEIGHT,
    DEPARTMENT_CHART_WIDTH, DEPARTMENT_LABEL_WIDTH, MONTHLY_BASELINE, MONTHLY_VIEW_HEIGHT,
    MONTHLY_VIEW_WIDTH,
};
use crate::markup::{coord, html_escape};

const OPENED_COLOR: &str = "#FF5733";
const RESOLVED_COLOR: &str = "#00A76F";
const DEPARTMENT_COLOR: &str = "#465FFF";

fn open_svg(out: &mut String, width: f64, height: f64) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = coord(width),
        h = coord(height),
    );
}

/// Opened vs resolved area chart with grid, axis labels, dots and legend.
pub fn render_area_chart(chart: &AreaChart) -> String {
    let mut out = String::new();
    open_svg(&mut out, chart.width, chart.height);
    let pad = chart.padding;

    for line in chart.grid_lines() {
        let _ = write!(
            out,
            r##"<line x1="{x1}" x2="{x2}" y1="{y}" y2="{y}" stroke="#ccc" stroke-dasharray="3,3"/><text x="{tx}" y="{y}" text-anchor="end" dominant-baseline="middle" font-size="12" fill="#666">{v}</text>"##,
            x1 = coord(pad.left),
            x2 = coord(chart.width - pad.right),
            y = coord(line.y),
            tx = coord(pad.left - 10.0),
            v = line.value,
        );
    }

    for (i, p) in chart.points.iter().enumerate() {
        let _ = write!(
            out,
            r##"<text x="{x}" y="{y}" text-anchor="middle" font-size="12" fill="#666">{label}</text>"##,
            x = coord(chart.scale_x(i)),
            y = coord(chart.height - pad.bottom + 15.0),
            label = html_escape(&p.label),
        );
    }

    if !chart.points.is_empty() {
        let _ = write!(
            out,
            r#"<path d="{}" fill="rgba(255, 87, 51, 0.3)"/><path d="{}" fill="rgba(0, 167, 111, 0.3)"/>"#,
            chart.area_path(Series::Opened),
            chart.area_path(Series::Resolved),
        );
        let _ = write!(
            out,
            r#"<path d="{}" stroke="{OPENED_COLOR}" stroke-width="2" fill="none"/><path d="{}" stroke="{RESOLVED_COLOR}" stroke-width="2" fill="none"/>"#,
            chart.line_path(Series::Opened),
            chart.line_path(Series::Resolved),
        );
        for (series, color) in [(Series::Opened, OPENED_COLOR), (Series::Resolved, RESOLVED_COLOR)] {
            for (i, p) in chart.points.iter().enumerate() {
                let value = match series {
                    Series::Opened => p.opened,
                    Series::Resolved => p.resolved,
                };
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="3" fill="{color}"/>"#,
                    coord(chart.scale_x(i)),
                    coord(chart.scale_y(value as f64)),
                );
            }
        }
    }

    let _ = write!(
        out,
        r##"<g transform="translate({lx}, {ly})"><circle cx="0" cy="0" r="5" fill="{OPENED_COLOR}"/><text x="10" y="4" font-size="12" fill="#333">Opened</text><circle cx="0" cy="20" r="5" fill="{RESOLVED_COLOR}"/><text x="10" y="24" font-size="12" fill="#333">Resolved</text></g>"##,
        lx = coord(chart.width - 150.0),
        ly = coord(pad.top),
    );

    out.push_str("</svg>");
    out
}

/// Twelve-month resolved bar chart.
pub fn render_monthly_bars(chart: &MonthlyBars) -> String {
    let mut out = String::new();
    open_svg(&mut out, MONTHLY_VIEW_WIDTH, MONTHLY_VIEW_HEIGHT);

    for tick in chart.ticks() {
        let _ = write!(
            out,
            r##"<line x1="50" y1="{y}" x2="580" y2="{y}" stroke="#ddd" stroke-dasharray="3 3"/><text x="30" y="{ty}" font-size="10" fill="#555" text-anchor="end">{v}</text>"##,
            y = coord(tick.y),
            ty = coord(tick.y + 5.0),
            v = tick.value,
        );
    }

    for bar in &chart.bars {
        let center = bar.x + bar.width / 2.0;
        let _ = write!(
            out,
            r##"<g><rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{RESOLVED_COLOR}" rx="5"/><text x="{cx}" y="245" font-size="10" text-anchor="middle" fill="#555">{label}</text><text x="{cx}" y="{vy}" font-size="10" text-anchor="middle" fill="#000">{value}</text></g>"##,
            x = coord(bar.x),
            y = coord(bar.y),
            w = coord(bar.width),
            h = coord(bar.height),
            cx = coord(center),
            vy = coord(bar.y - 5.0),
            label = html_escape(&bar.label),
            value = bar.value,
        );
    }

    let _ = write!(
        out,
        r##"<line x1="50" y1="{b}" x2="580" y2="{b}" stroke="#000"/></svg>"##,
        b = coord(MONTHLY_BASELINE),
    );
    out
}

/// Horizontal per-department bars. Labels sit in a left gutter.
pub fn render_department_bars(chart: &DepartmentBars) -> String {
    let mut out = String::new();
    open_svg(&mut out, DEPARTMENT_CHART_WIDTH, chart.height);
    let mid = DEPARTMENT_BAR_HEIGHT / 2.0;

    for bar in &chart.bars {
        let _ = write!(
            out,
            r##"<g transform="translate({gx}, {gy})"><text x="-10" y="{mid}" text-anchor="end" dominant-baseline="middle" font-size="12" fill="#555">{label}</text><rect x="0" y="0" width="{w}" height="{h}" fill="{DEPARTMENT_COLOR}" rx="4" ry="4"/><text x="{vx}" y="{mid}" dominant-baseline="middle" font-size="12" fill="#333">{value}</text></g>"##,
            gx = coord(DEPARTMENT_LABEL_WIDTH),
            gy = coord(bar.y),
            mid = coord(mid),
            label = html_escape(&bar.label),
            w = coord(bar.width),
            h = coord(bar.height),
            vx = coord(bar.width + 5.0),
            value = bar.value,
        );
    }

    out.push_str("</svg>");
    out
}
