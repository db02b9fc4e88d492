use super::Observation;
use std::sync::Arc;

/// The result of asking a source for one definition's observation.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The source produced an observation.
    Found(Observation),

    /// The source had nothing to measure.
    NoData,

    /// The source failed for this definition.
    Failed(Arc<ohno::AppError>),

    /// The source did not answer within the fetch timeout.
    TimedOut,

    /// The definition is disabled and was not fetched.
    Disabled,
}

impl FetchOutcome {
    /// Returns `true` if the source itself failed or timed out.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::TimedOut)
    }

    /// Returns `true` if the definition was sent to the source.
    #[must_use]
    pub const fn was_attempted(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::RawValue;
    use chrono::Utc;
    use ohno::app_err;

    #[test]
    fn test_is_failure() {
        assert!(FetchOutcome::Failed(Arc::new(app_err!("boom"))).is_failure());
        assert!(FetchOutcome::TimedOut.is_failure());
        assert!(!FetchOutcome::NoData.is_failure());
        assert!(!FetchOutcome::Disabled.is_failure());
        assert!(!FetchOutcome::Found(Observation::new(RawValue::Count(1), Utc::now())).is_failure());
    }

    #[test]
    fn test_was_attempted() {
        assert!(FetchOutcome::NoData.was_attempted());
        assert!(FetchOutcome::TimedOut.was_attempted());
        assert!(!FetchOutcome::Disabled.was_attempted());
    }
}
