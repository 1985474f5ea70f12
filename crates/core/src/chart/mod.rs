//! Chart geometry for the dashboard widgets.
//!
//! All three charts use plain linear scaling (`value / max * pixel_range`).
//! A maximum of zero is treated as one so empty datasets draw flat at the
//! baseline instead of dividing by zero. The [`svg`] submodule turns the
//! geometry into standalone SVG documents.

pub mod svg;

use crate::metrics::{DepartmentCount, MonthPoint, StatisticsPoint};

// ---------------------------------------------------------------------------
// Scaling primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Maps `[0, max]` onto `[0, range]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    max: f64,
    range: f64,
}

impl LinearScale {
    pub fn new(max: f64, range: f64) -> Self {
        let max = if max > 0.0 { max } else { 1.0 };
        Self { max, range }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn apply(&self, value: f64) -> f64 {
        value / self.max * self.range
    }
}

// ---------------------------------------------------------------------------
// Opened vs resolved area chart
// ---------------------------------------------------------------------------

pub const AREA_CHART_HEIGHT: f64 = 300.0;
pub const AREA_CHART_DEFAULT_WIDTH: f64 = 800.0;
pub const AREA_CHART_MIN_WIDTH: f64 = 200.0;
pub const AREA_CHART_MAX_WIDTH: f64 = 4000.0;
pub const AREA_CHART_PADDING: Padding = Padding {
    top: 20.0,
    right: 20.0,
    bottom: 40.0,
    left: 50.0,
};

/// Number of horizontal grid lines (including top and baseline).
pub const AREA_GRID_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Opened,
    Resolved,
}

impl Series {
    fn value(self, p: &StatisticsPoint) -> f64 {
        match self {
            Self::Opened => p.opened as f64,
            Self::Resolved => p.resolved as f64,
        }
    }
}

/// A horizontal grid line and the value it marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct AreaChart {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    pub points: Vec<StatisticsPoint>,
    y_scale: LinearScale,
}

impl AreaChart {
    /// Build the chart for `points` at the given width (clamped to a sane range).
    /// A non-finite width falls back to [`AREA_CHART_DEFAULT_WIDTH`].
    pub fn new(points: Vec<StatisticsPoint>, width: f64) -> Self {
        let width = if width.is_finite() {
            width.clamp(AREA_CHART_MIN_WIDTH, AREA_CHART_MAX_WIDTH)
        } else {
            AREA_CHART_DEFAULT_WIDTH
        };
        let padding = AREA_CHART_PADDING;
        let height = AREA_CHART_HEIGHT;
        let max_y = points
            .iter()
            .map(|p| p.opened.max(p.resolved))
            .max()
            .unwrap_or(0)
            .max(0) as f64;
        let y_scale = LinearScale::new(max_y, height - padding.top - padding.bottom);
        Self {
            width,
            height,
            padding,
            points,
            y_scale,
        }
    }

    pub fn max_y(&self) -> f64 {
        self.y_scale.max()
    }

    pub fn scale_x(&self, index: usize) -> f64 {
        let steps = self.points.len().saturating_sub(1).max(1) as f64;
        self.padding.left
            + (index as f64 / steps) * (self.width - self.padding.left - self.padding.right)
    }

    pub fn scale_y(&self, value: f64) -> f64 {
        self.height - self.padding.bottom - self.y_scale.apply(value)
    }

    pub fn line_path(&self, series: Series) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 { "M" } else { "L" };
                format!(
                    "{cmd} {} {}",
                    crate::markup::coord(self.scale_x(i)),
                    crate::markup::coord(self.scale_y(series.value(p)))
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The line path closed down to the baseline. Empty when there is no data.
    pub fn area_path(&self, series: Series) -> String {
        if self.points.is_empty() {
            return String::new();
        }
        let last = self.points.len() - 1;
        let base = crate::markup::coord(self.scale_y(0.0));
        format!(
            "{} L {} {base} L {} {base} Z",
            self.line_path(series),
            crate::markup::coord(self.scale_x(last)),
            crate::markup::coord(self.scale_x(0)),
        )
    }

    pub fn grid_lines(&self) -> Vec<GridLine> {
        let divisions = (AREA_GRID_LINES - 1) as f64;
        let plot_height = self.height - self.padding.top - self.padding.bottom;
        (0..AREA_GRID_LINES)
            .map(|i| {
                let frac = i as f64 / divisions;
                GridLine {
                    y: self.padding.top + frac * plot_height,
                    value: (self.max_y() - frac * self.max_y()).round() as i64,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Monthly resolved bar chart
// ---------------------------------------------------------------------------

pub const MONTHLY_VIEW_WIDTH: f64 = 600.0;
pub const MONTHLY_VIEW_HEIGHT: f64 = 250.0;
pub const MONTHLY_PLOT_HEIGHT: f64 = 200.0;
pub const MONTHLY_BASELINE: f64 = 230.0;
pub const MONTHLY_BAR_X0: f64 = 60.0;
pub const MONTHLY_BAR_STEP: f64 = 40.0;
pub const MONTHLY_BAR_WIDTH: f64 = 30.0;
pub const MONTHLY_TICK_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct MonthlyBars {
    pub bars: Vec<Bar>,
    pub max_value: i64,
}

impl MonthlyBars {
    pub fn new(points: &[MonthPoint]) -> Self {
        let max_value = points.iter().map(|p| p.resolved).max().unwrap_or(0).max(0);
        let scale = LinearScale::new(max_value as f64, MONTHLY_PLOT_HEIGHT);
        let bars = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let height = scale.apply(p.resolved.max(0) as f64);
                Bar {
                    x: MONTHLY_BAR_X0 + i as f64 * MONTHLY_BAR_STEP,
                    y: MONTHLY_BASELINE - height,
                    width: MONTHLY_BAR_WIDTH,
                    height,
                    label: p.month.clone(),
                    value: p.resolved,
                }
            })
            .collect();
        Self { bars, max_value }
    }

    /// Y-axis ticks at 25/50/75/100% of the maximum.
    pub fn ticks(&self) -> Vec<GridLine> {
        MONTHLY_TICK_FRACTIONS
            .iter()
            .map(|p| GridLine {
                y: MONTHLY_BASELINE - p * MONTHLY_PLOT_HEIGHT,
                value: (self.max_value as f64 * p).round() as i64,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Department horizontal bars
// ---------------------------------------------------------------------------

pub const DEPARTMENT_CHART_WIDTH: f64 = 500.0;
pub const DEPARTMENT_LABEL_WIDTH: f64 = 150.0;
pub const DEPARTMENT_BAR_HEIGHT: f64 = 30.0;
pub const DEPARTMENT_BAR_GAP: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct DepartmentBars {
    pub bars: Vec<Bar>,
    pub height: f64,
}

impl DepartmentBars {
    /// One row per department; bar width is scaled against the busiest one.
    /// Every bar is zero width when no department has tickets.
    pub fn new(rows: &[DepartmentCount]) -> Self {
        let max_value = rows.iter().map(|r| r.ticket_count).max().unwrap_or(0);
        let usable = DEPARTMENT_CHART_WIDTH - DEPARTMENT_LABEL_WIDTH;
        let scale = LinearScale::new(max_value as f64, usable);
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, r)| Bar {
                x: 0.0,
                y: i as f64 * (DEPARTMENT_BAR_HEIGHT + DEPARTMENT_BAR_GAP),
                width: if max_value > 0 {
                    scale.apply(r.ticket_count.max(0) as f64)
                } else {
                    0.0
                },
                height: DEPARTMENT_BAR_HEIGHT,
                label: r.department.clone(),
                value: r.ticket_count,
            })
            .collect();
        Self {
            bars,
            height: rows.len() as f64 * (DEPARTMENT_BAR_HEIGHT + DEPARTMENT_BAR_GAP),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
