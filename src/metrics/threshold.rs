use super::MetricValue;
use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// How an observed value is compared against a threshold's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThresholdType {
    /// Passes when `value >= target`.
    Min,

    /// Passes when `value <= target`.
    Max,

    /// Passes when `value == target`, within a tolerance for numbers.
    Exact,
}

/// The (type, value) pair a metric is judged against.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Threshold {
    #[serde(rename = "type")]
    pub kind: ThresholdType,

    pub value: MetricValue,

    /// Tolerance for `exact` comparisons of numbers. Falls back to the run-wide default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl Threshold {
    #[must_use]
    pub const fn min(value: f64) -> Self {
        Self {
            kind: ThresholdType::Min,
            value: MetricValue::Number(value),
            tolerance: None,
        }
    }

    #[must_use]
    pub const fn max(value: f64) -> Self {
        Self {
            kind: ThresholdType::Max,
            value: MetricValue::Number(value),
            tolerance: None,
        }
    }

    #[must_use]
    pub fn exact(value: impl Into<MetricValue>) -> Self {
        Self {
            kind: ThresholdType::Exact,
            value: value.into(),
            tolerance: None,
        }
    }

    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// The tolerance to apply, given the caller-supplied default.
    #[must_use]
    pub fn tolerance_or(&self, default: f64) -> f64 {
        self.tolerance.unwrap_or(default)
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let op = match self.kind {
            ThresholdType::Min => ">=",
            ThresholdType::Max => "<=",
            ThresholdType::Exact => "==",
        };

        match &self.value {
            MetricValue::Number(n) => write!(f, "{op} {n}")?,
            MetricValue::Label(s) => write!(f, "{op} '{s}'")?,
        }

        if let Some(tolerance) = self.tolerance
            && tolerance > 0.0
        {
            write!(f, " ± {tolerance}")?;
        }

        Ok(())
    }
}
