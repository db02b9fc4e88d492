use super::derive::derive_value;
use super::{FetchOutcome, NoProgress, ObservationSource, Progress};
use crate::eval::evaluate_definition;
use crate::health::{MonitoringReport, RunFailure, aggregate};
use crate::metrics::{Metric, MetricDefinition, Registry};
use chrono::{DateTime, Utc};
use core::time::Duration;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// Limits applied to one monitoring run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectorOptions {
    /// How long a single definition's fetch may take before it is recorded as timed out
    pub fetch_timeout: Duration,

    /// How long the whole run may take before it fails
    pub run_timeout: Option<Duration>,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Default tolerance for `exact` thresholds on numbers
    pub exact_tolerance: f64,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            run_timeout: Some(Duration::from_secs(120)),
            max_concurrent_fetches: 8,
            exact_tolerance: 0.0,
        }
    }
}

/// Collector for evaluating every registered metric against one observation source
pub struct Collector<'a, S> {
    source: &'a S,
    options: CollectorOptions,
    progress: Arc<dyn Progress>,
}

impl<S: core::fmt::Debug> core::fmt::Debug for Collector<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("source", &self.source)
            .field("options", &self.options)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

impl<'a, S: ObservationSource> Collector<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, options: CollectorOptions) -> Self {
        Self {
            source,
            options,
            progress: Arc::new(NoProgress),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    /// Run every definition and aggregate the results into a report.
    pub async fn run(&self, registry: &Registry, now: DateTime<Utc>) -> Result<MonitoringReport, RunFailure> {
        self.run_until(registry, now, futures::future::pending()).await
    }

    /// Like [`Self::run`], but abandons the run when `cancel` completes first.
    pub async fn run_until(
        &self,
        registry: &Registry,
        now: DateTime<Utc>,
        cancel: impl Future<Output = ()>,
    ) -> Result<MonitoringReport, RunFailure> {
        let metrics = self.collect_until(registry, now, cancel).await?;
        let report = aggregate(metrics, now);

        log::info!(
            target: LOG_TARGET,
            "Run finished as {}: {} ok, {} warning, {} critical ({} unmeasured)",
            report.overall_status,
            report.ok,
            report.warning,
            report.critical,
            report.unmeasured
        );

        Ok(report)
    }

    /// Evaluate every definition, in registry order.
    pub async fn collect(&self, registry: &Registry, now: DateTime<Utc>) -> Result<Vec<Metric>, RunFailure> {
        self.collect_until(registry, now, futures::future::pending()).await
    }

    /// Like [`Self::collect`], but abandons the run when `cancel` completes first.
    ///
    /// No metric is produced until every definition's fetch has settled.
    pub async fn collect_until(
        &self,
        registry: &Registry,
        now: DateTime<Utc>,
        cancel: impl Future<Output = ()>,
    ) -> Result<Vec<Metric>, RunFailure> {
        self.progress.start("Sampling", registry.len() as u64);

        let settled = tokio::select! {
            outcomes = self.fetch_all(registry) => Ok(outcomes),
            () = cancel => Err(RunFailure::Cancelled),
            () = deadline(self.options.run_timeout) => Err(RunFailure::TimedOut {
                after: self.options.run_timeout.unwrap_or_default(),
            }),
        };

        self.progress.done();

        let outcomes = settled.inspect_err(|failure| log::warn!(target: LOG_TARGET, "Abandoning run: {failure}"))?;
        check_source_available(&outcomes)?;

        Ok(registry
            .iter()
            .zip(&outcomes)
            .map(|(definition, outcome)| materialize(definition, outcome, self.options.exact_tolerance, now))
            .collect())
    }

    async fn fetch_all(&self, registry: &Registry) -> Vec<FetchOutcome> {
        stream::iter(registry)
            .map(|definition| self.fetch_one(definition))
            .buffered(self.options.max_concurrent_fetches.max(1))
            .collect()
            .await
    }

    async fn fetch_one(&self, definition: &MetricDefinition) -> FetchOutcome {
        let name = &definition.name;

        if !definition.enabled {
            log::debug!(target: LOG_TARGET, "Skipping disabled metric '{name}'");
            self.progress.advance(name);
            return FetchOutcome::Disabled;
        }

        log::debug!(target: LOG_TARGET, "Fetching '{name}' from table '{}'", definition.table);

        let outcome = match tokio::time::timeout(self.options.fetch_timeout, self.source.fetch(definition)).await {
            Ok(Ok(Some(observation))) => FetchOutcome::Found(observation),
            Ok(Ok(None)) => {
                log::debug!(target: LOG_TARGET, "No data for '{name}'");
                FetchOutcome::NoData
            }
            Ok(Err(e)) => {
                log::warn!(target: LOG_TARGET, "Unable to fetch '{name}': {e:#}");
                FetchOutcome::Failed(Arc::new(e))
            }
            Err(_) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Fetching '{name}' timed out after {:.3}s",
                    self.options.fetch_timeout.as_secs_f64()
                );
                FetchOutcome::TimedOut
            }
        };

        self.progress.advance(name);
        outcome
    }
}

/// Build the metric for one definition from its fetch outcome.
///
/// This is a pure function of its inputs; `now` is recorded as the metric's check time.
#[must_use]
pub fn materialize(definition: &Arc<MetricDefinition>, outcome: &FetchOutcome, exact_tolerance: f64, now: DateTime<Utc>) -> Metric {
    let value = derive_value(definition, outcome);
    let status = evaluate_definition(definition, &value, exact_tolerance);
    Metric::new(Arc::clone(definition), value, status, now)
}

/// A run where the source failed for every attempted definition is not a report.
fn check_source_available(outcomes: &[FetchOutcome]) -> Result<(), RunFailure> {
    let mut attempted = outcomes.iter().filter(|outcome| outcome.was_attempted()).peekable();

    if attempted.peek().is_none() {
        return Ok(());
    }

    let mut count = 0;
    for outcome in attempted {
        if !outcome.is_failure() {
            return Ok(());
        }
        count += 1;
    }

    Err(RunFailure::SourceUnavailable { attempted: count })
}

async fn deadline(limit: Option<Duration>) {
    match limit {
        Some(limit) => tokio::time::sleep(limit).await,
        None => futures::future::pending().await,
    }
}
