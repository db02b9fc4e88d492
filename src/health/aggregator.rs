use super::{MonitoringReport, OverallStatus};
use crate::metrics::{Metric, MetricStatus};
use chrono::{DateTime, Utc};

/// Fold evaluated metrics into a report.
#[must_use]
pub fn aggregate(metrics: Vec<Metric>, timestamp: DateTime<Utc>) -> MonitoringReport {
    let mut ok = 0;
    let mut warning = 0;
    let mut critical = 0;

    for metric in &metrics {
        match metric.status {
            MetricStatus::Ok => ok += 1,
            MetricStatus::Warning => warning += 1,
            MetricStatus::Critical => critical += 1,
        }
    }

    MonitoringReport {
        timestamp,
        overall_status: roll_up(metrics.iter().map(|metric| metric.status)),
        total_metrics: metrics.len(),
        ok,
        warning,
        critical,
        unmeasured: metrics.iter().filter(|metric| metric.is_unmeasured()).count(),
        metrics,
    }
}

/// Combine per-metric statuses into one verdict by strict priority.
#[must_use]
pub fn roll_up(statuses: impl IntoIterator<Item = MetricStatus>) -> OverallStatus {
    let mut overall = OverallStatus::Healthy;

    for status in statuses {
        match status {
            MetricStatus::Critical => return OverallStatus::Critical,
            MetricStatus::Warning => overall = OverallStatus::Warning,
            MetricStatus::Ok => {}
        }
    }

    overall
}
