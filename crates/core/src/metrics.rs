//! Dashboard metric shapes and the reshaping applied before charting.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Headline counters from `/tickets/metrics/counts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCounts {
    pub total_tickets: i64,
    pub resolved_tickets: i64,
}

impl TicketCounts {
    pub fn open_tickets(&self) -> i64 {
        (self.total_tickets - self.resolved_tickets).max(0)
    }
}

/// One row of `/tickets/metrics/monthly-resolved`. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResolved {
    pub month: u32,
    pub resolved_count: i64,
}

/// A labelled single-series data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub month: String,
    pub resolved: i64,
}

/// Expand sparse backend rows into exactly twelve `Jan..Dec` points.
/// Months the backend omits count as zero.
pub fn fill_monthly_resolved(rows: &[MonthlyResolved]) -> Vec<MonthPoint> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let resolved = rows
                .iter()
                .find(|r| r.month as usize == i + 1)
                .map(|r| r.resolved_count)
                .unwrap_or(0);
            MonthPoint {
                month: (*name).to_string(),
                resolved,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Time distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(CoreError::Validation(format!(
                "Invalid chart type '{other}'. Must be one of: monthly, quarterly, yearly"
            ))),
        }
    }
}

/// One bucket of `/tickets/metrics/time-distribution`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub quarter: Option<u32>,
    pub year: i32,
    pub ticket_count: i64,
}

/// Axis label for a bucket: `"Mar 2024"`, `"Q2 2024"` or `"2024"`.
///
/// A bucket missing the field its chart type needs, or carrying an
/// out-of-range month or quarter, falls back to the year.
pub fn period_label(chart_type: ChartType, bucket: &TimeBucket) -> String {
    match chart_type {
        ChartType::Monthly => match bucket.month {
            Some(m @ 1..=12) => format!("{} {}", MONTH_NAMES[m as usize - 1], bucket.year),
            _ => bucket.year.to_string(),
        },
        ChartType::Quarterly => match bucket.quarter {
            Some(q @ 1..=4) => format!("Q{} {}", q, bucket.year),
            _ => bucket.year.to_string(),
        },
        ChartType::Yearly => bucket.year.to_string(),
    }
}

/// An opened-vs-resolved data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsPoint {
    pub label: String,
    pub opened: i64,
    pub resolved: i64,
}

/// Join the opened and resolved series by label. The opened series drives
/// the x axis; a label with no resolved bucket resolves zero.
pub fn merge_time_distribution(
    chart_type: ChartType,
    opened: &[TimeBucket],
    resolved: &[TimeBucket],
) -> Vec<StatisticsPoint> {
    opened
        .iter()
        .map(|o| {
            let label = period_label(chart_type, o);
            let resolved = resolved
                .iter()
                .find(|r| period_label(chart_type, r) == label)
                .map(|r| r.ticket_count)
                .unwrap_or(0);
            StatisticsPoint {
                label,
                opened: o.ticket_count,
                resolved,
            }
        })
        .collect()
}

/// One row of `/tickets/metrics/department-breakdown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: String,
    pub ticket_count: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
