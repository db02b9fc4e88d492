use super::Observation;
use crate::Result;
use crate::metrics::MetricDefinition;

/// Supplies raw observations for metric definitions.
///
/// Implementations must be safely callable many times per run, possibly concurrently.
/// An empty result is reported as `Ok(None)`, never as an error, and values must be in the
/// unit the definition declares.
pub trait ObservationSource: Send + Sync {
    fn fetch(&self, definition: &MetricDefinition) -> impl Future<Output = Result<Option<Observation>>> + Send;
}
