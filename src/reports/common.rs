//! Common utilities shared across report generators.

use crate::health::OverallStatus;
use crate::metrics::{CurrentValue, Metric, MetricStatus, MetricUnit, MetricValue};

/// Format a number: integers without decimals, anything else with two.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract().abs() < f64::EPSILON {
        format!("{n:.0}")
    } else {
        format!("{n:.2}")
    }
}

/// Format a metric value with its unit suffix.
pub fn format_metric_value(value: &MetricValue, unit: MetricUnit) -> String {
    match value {
        MetricValue::Number(n) => format!("{}{}", format_number(*n), unit.suffix()),
        MetricValue::Label(s) => s.clone(),
    }
}

/// Format the current value of a metric, or the reason it has none.
pub fn format_current_value(metric: &Metric) -> String {
    match &metric.value {
        CurrentValue::Measured(value) => format_metric_value(value, metric.definition.unit),
        CurrentValue::Unmeasured(reason) => reason.to_string(),
    }
}

pub const fn format_status(status: MetricStatus) -> &'static str {
    match status {
        MetricStatus::Ok => "OK",
        MetricStatus::Warning => "WARNING",
        MetricStatus::Critical => "CRITICAL",
    }
}

pub const fn format_overall_status(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Healthy => "HEALTHY",
        OverallStatus::Warning => "WARNING",
        OverallStatus::Critical => "CRITICAL",
    }
}
