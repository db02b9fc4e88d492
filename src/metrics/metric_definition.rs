use super::{Measure, MetricGroup, MetricUnit, MetricValue, Severity, Threshold, ThresholdType};
use crate::Result;
use ohno::bail;
use serde::{Deserialize, Serialize};

/// What to do with a metric whose observation could not be obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MissingData {
    /// Report the metric as unmeasured with an `ok` status.
    #[default]
    Tolerate,

    /// Treat absence as a breach, mapped through the metric's severity.
    Breach,
}

/// A static registry entry describing one metric.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricDefinition {
    /// Unique identifier across the registry
    pub name: String,

    /// Logical owning dataset
    pub table: String,

    #[serde(default)]
    pub description: String,

    pub group: MetricGroup,

    pub severity: Severity,

    pub unit: MetricUnit,

    pub measure: Measure,

    pub threshold: Threshold,

    /// Disabled definitions are never sent to a source
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub on_missing: MissingData,
}

const fn default_enabled() -> bool {
    true
}

impl MetricDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        measure: Measure,
        unit: MetricUnit,
        threshold: Threshold,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            description: String::new(),
            group: MetricGroup::CoreData,
            severity,
            unit,
            measure,
            threshold,
            enabled: true,
            on_missing: MissingData::Tolerate,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_group(mut self, group: MetricGroup) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub const fn with_on_missing(mut self, on_missing: MissingData) -> Self {
        self.on_missing = on_missing;
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check that the definition is internally consistent.
    pub fn validate(&self) -> Result<()> {
        let name = &self.name;

        if name.trim().is_empty() {
            bail!("metric names cannot be empty");
        }

        if self.table.trim().is_empty() {
            bail!("metric '{name}' does not name a table");
        }

        match &self.threshold.value {
            MetricValue::Label(_) => {
                if self.threshold.kind != ThresholdType::Exact {
                    bail!("metric '{name}' compares a label with a '{}' threshold, labels only support 'exact'", self.threshold.kind);
                }

                if !matches!(self.measure, Measure::Latest { .. }) {
                    bail!("metric '{name}' has a label threshold but its measure only produces numbers");
                }
            }

            MetricValue::Number(target) => {
                if !target.is_finite() {
                    bail!("metric '{name}' has a non-finite threshold value");
                }

                if self.unit.is_bounded() && !(0.0..=100.0).contains(target) {
                    bail!("metric '{name}' is a {} but its threshold {target} is outside 0..=100", self.unit);
                }
            }
        }

        if let Some(tolerance) = self.threshold.tolerance {
            if self.threshold.kind != ThresholdType::Exact {
                bail!("metric '{name}' sets a tolerance on a '{}' threshold, tolerances only apply to 'exact'", self.threshold.kind);
            }

            if !tolerance.is_finite() || tolerance < 0.0 {
                bail!("metric '{name}' has an invalid tolerance {tolerance}");
            }
        }

        match &self.measure {
            Measure::Coverage { .. } if self.unit != MetricUnit::Percentage => {
                bail!("metric '{name}' measures coverage so its unit must be 'percentage', not '{}'", self.unit);
            }
            Measure::RowCount | Measure::Duplicates { .. } | Measure::RecentRows { .. } if self.unit != MetricUnit::Count => {
                bail!("metric '{name}' counts rows so its unit must be 'count', not '{}'", self.unit);
            }
            Measure::Rate { .. } if !self.unit.is_bounded() => {
                bail!("metric '{name}' measures a rate so its unit must be 'rate' or 'percentage', not '{}'", self.unit);
            }
            Measure::Average { window: 0, .. } | Measure::Rate { window: 0, .. } => {
                bail!("metric '{name}' has an empty rolling window");
            }
            Measure::RecentRows { within, .. } if within.is_zero() => {
                bail!("metric '{name}' has a zero-length recency window");
            }
            _ => {}
        }

        Ok(())
    }
}
