use super::{CurrentValue, MetricDefinition, MetricGroup, MetricStatus, Severity, Threshold, Unmeasured};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The evaluated outcome of one metric definition for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub definition: Arc<MetricDefinition>,
    pub value: CurrentValue,
    pub status: MetricStatus,

    /// When the metric was evaluated, not when the underlying data was produced
    pub last_checked: DateTime<Utc>,
}

impl Metric {
    #[must_use]
    pub const fn new(definition: Arc<MetricDefinition>, value: CurrentValue, status: MetricStatus, last_checked: DateTime<Utc>) -> Self {
        Self {
            definition,
            value,
            status,
            last_checked,
        }
    }

    // Convenience accessors for common fields
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.definition.table
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.definition.description
    }

    #[must_use]
    pub fn group(&self) -> MetricGroup {
        self.definition.group
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.definition.severity
    }

    #[must_use]
    pub fn threshold(&self) -> &Threshold {
        &self.definition.threshold
    }

    #[must_use]
    pub const fn is_unmeasured(&self) -> bool {
        !self.value.is_measured()
    }

    #[must_use]
    pub const fn unmeasured_reason(&self) -> Option<&Unmeasured> {
        self.value.unmeasured()
    }
}
