use super::MetricValue;
use core::fmt::{Display, Formatter};

/// Why a metric could not be measured during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmeasured {
    /// The source returned no rows to measure.
    NoData,

    /// A derived percentage had a zero denominator.
    ZeroDenominator,

    /// A rolling window contained no samples.
    EmptyWindow,

    /// The source failed while fetching the observation.
    SourceFailed(String),

    /// The source did not answer within the fetch timeout.
    TimedOut,

    /// The source answered with a value that does not fit the metric's unit or threshold.
    InvalidValue(String),

    /// The definition is switched off in the registry.
    Disabled,
}

impl Display for Unmeasured {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoData => write!(f, "no data"),
            Self::ZeroDenominator => write!(f, "zero denominator"),
            Self::EmptyWindow => write!(f, "empty window"),
            Self::SourceFailed(msg) => write!(f, "source failed: {msg}"),
            Self::TimedOut => write!(f, "timed out"),
            Self::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// A metric's value for one run, with absence kept distinct from zero.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentValue {
    Measured(MetricValue),
    Unmeasured(Unmeasured),
}

impl CurrentValue {
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    #[must_use]
    pub const fn measured(&self) -> Option<&MetricValue> {
        match self {
            Self::Measured(value) => Some(value),
            Self::Unmeasured(_) => None,
        }
    }

    #[must_use]
    pub const fn unmeasured(&self) -> Option<&Unmeasured> {
        match self {
            Self::Measured(_) => None,
            Self::Unmeasured(reason) => Some(reason),
        }
    }
}

impl From<MetricValue> for CurrentValue {
    fn from(value: MetricValue) -> Self {
        Self::Measured(value)
    }
}

impl From<Unmeasured> for CurrentValue {
    fn from(reason: Unmeasured) -> Self {
        Self::Unmeasured(reason)
    }
}
