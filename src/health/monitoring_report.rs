use super::OverallStatus;
use crate::metrics::{Metric, MetricGroup, MetricStatus};
use chrono::{DateTime, Utc};

/// The single output of a monitoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringReport {
    pub timestamp: DateTime<Utc>,
    pub overall_status: OverallStatus,
    pub total_metrics: usize,
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,

    /// Metrics without an observation this run, also counted under their status
    pub unmeasured: usize,

    /// In registry order
    pub metrics: Vec<Metric>,
}

impl MonitoringReport {
    /// Number of metrics with the given status.
    #[must_use]
    pub const fn count(&self, status: MetricStatus) -> usize {
        match status {
            MetricStatus::Ok => self.ok,
            MetricStatus::Warning => self.warning,
            MetricStatus::Critical => self.critical,
        }
    }

    /// Metrics in a group, in report order.
    pub fn in_group(&self, group: MetricGroup) -> impl Iterator<Item = &Metric> {
        self.metrics.iter().filter(move |metric| metric.group() == group)
    }

    /// Metrics that did not pass, in report order.
    pub fn failing(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter().filter(|metric| metric.status != MetricStatus::Ok)
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.overall_status == OverallStatus::Healthy
    }
}
