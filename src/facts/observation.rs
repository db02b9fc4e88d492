use crate::metrics::MetricValue;
use chrono::{DateTime, Utc};

/// A raw fact produced by a source, before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A number of rows or events.
    Count(u64),

    /// Two counts whose ratio is reported as a percentage.
    Fraction { part: u64, whole: u64 },

    /// Recent numeric samples, most recent first.
    Samples(Vec<f64>),

    /// A single value, numeric or categorical.
    Value(MetricValue),
}

/// One observation for one metric definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: RawValue,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    #[must_use]
    pub const fn new(value: RawValue, observed_at: DateTime<Utc>) -> Self {
        Self { value, observed_at }
    }
}
