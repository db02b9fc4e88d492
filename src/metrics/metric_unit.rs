use serde::{Deserialize, Serialize};
use strum::Display;

/// The unit a source must report a metric's value in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricUnit {
    /// A non-negative number of rows or events.
    Count,

    /// A share in 0..=100.
    Percentage,

    /// A success or failure rate in 0..=100.
    Rate,

    /// A duration in milliseconds.
    Milliseconds,
}

impl MetricUnit {
    /// Whether values in this unit are rounded half-up to an integer before evaluation.
    #[must_use]
    pub const fn is_rounded(self) -> bool {
        matches!(self, Self::Percentage | Self::Rate)
    }

    /// Whether values in this unit are bounded to 0..=100.
    #[must_use]
    pub const fn is_bounded(self) -> bool {
        matches!(self, Self::Percentage | Self::Rate)
    }

    /// Suffix used when displaying values of this unit.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Count => "",
            Self::Percentage | Self::Rate => "%",
            Self::Milliseconds => "ms",
        }
    }

    /// Check a numeric value against the range this unit allows.
    ///
    /// Returns a description of the problem when the value is out of range.
    #[must_use]
    pub fn check(self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return Some(format!("{value} is not a finite number"));
        }

        if value < 0.0 {
            return Some(format!("{value} is negative but {self} values cannot be"));
        }

        if self.is_bounded() && value > 100.0 {
            return Some(format!("{value} exceeds 100 for a {self} value"));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_applies_to_shares_only() {
        assert!(MetricUnit::Percentage.is_rounded());
        assert!(MetricUnit::Rate.is_rounded());
        assert!(!MetricUnit::Count.is_rounded());
        assert!(!MetricUnit::Milliseconds.is_rounded());
    }

    #[test]
    fn test_check_accepts_in_range_values() {
        assert_eq!(MetricUnit::Count.check(0.0), None);
        assert_eq!(MetricUnit::Count.check(1_000_000.0), None);
        assert_eq!(MetricUnit::Percentage.check(100.0), None);
        assert_eq!(MetricUnit::Milliseconds.check(45_000.0), None);
    }

    #[test]
    fn test_check_rejects_negative_values() {
        assert!(MetricUnit::Count.check(-1.0).is_some());
        assert!(MetricUnit::Milliseconds.check(-0.5).is_some());
    }

    #[test]
    fn test_check_rejects_shares_over_one_hundred() {
        assert!(MetricUnit::Percentage.check(100.5).is_some());
        assert!(MetricUnit::Rate.check(250.0).is_some());
        assert_eq!(MetricUnit::Count.check(250.0), None);
    }

    #[test]
    fn test_check_rejects_non_finite_values() {
        assert!(MetricUnit::Count.check(f64::NAN).is_some());
        assert!(MetricUnit::Milliseconds.check(f64::INFINITY).is_some());
    }
}
