use core::fmt::{Display, Formatter};
use core::time::Duration;

/// Why a monitoring run produced no report at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// The caller cancelled the run before every observation was in.
    Cancelled,

    /// The run did not finish within its time limit.
    TimedOut { after: Duration },

    /// Every definition that was sent to the source failed or timed out.
    SourceUnavailable { attempted: usize },
}

impl Display for RunFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "monitoring run was cancelled"),
            Self::TimedOut { after } => write!(f, "monitoring run timed out after {after:?}"),
            Self::SourceUnavailable { attempted } => {
                write!(f, "observation source is unavailable: all {attempted} fetch(es) failed")
            }
        }
    }
}

impl core::error::Error for RunFailure {}
