//! Observation gathering for metric definitions
//!
//! The core never queries storage itself. An [`ObservationSource`] is asked once per enabled
//! definition for a raw [`Observation`]: a count, a fraction of two counts, a sample of
//! recent values, or a single value. Sources report "no rows" as `Ok(None)` and reserve
//! errors for genuine failures.
//!
//! # Implementation Model
//!
//! The [`Collector`] fans fetches out concurrently, bounded by a concurrency limit and a
//! per-definition timeout, and waits for every outcome before anything is aggregated. Each
//! outcome is recorded as a [`FetchOutcome`] so that one failing definition never aborts
//! the rest of the run; the failure becomes an unmeasured metric instead.
//!
//! Derived values are computed from raw observations in [`derive`]: fractions become
//! percentages (undefined when the denominator is zero), sample windows become averages
//! (undefined when empty), and percentages and rates are rounded half-up before any
//! threshold comparison.
//!
//! The whole run is bounded by an optional run timeout and a caller-supplied cancellation
//! future. Either one abandons in-flight fetches and produces a
//! [`RunFailure`](crate::health::RunFailure) rather than a partial report.
//!
//! [`snapshot::SnapshotSource`] is a source backed by a directory of JSON or CSV table exports.

mod collector;
pub mod derive;
mod fetch_outcome;
mod observation;
mod progress;
pub mod snapshot;
mod source;

pub use collector::{Collector, CollectorOptions, materialize};
pub use fetch_outcome::FetchOutcome;
pub use observation::{Observation, RawValue};
pub use progress::{NoProgress, Progress};
pub use source::ObservationSource;
