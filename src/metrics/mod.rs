//! Metric definitions and evaluated metric records
//!
//! A [`MetricDefinition`] is authored once, in configuration, and states what to observe
//! ([`Measure`]), in which [`MetricUnit`], and how to judge the observation ([`Threshold`]
//! plus [`Severity`]). Definitions live in an ordered [`Registry`] which enforces name
//! uniqueness and per-definition consistency.
//!
//! A [`Metric`] is the materialized outcome of one definition for one run: the definition,
//! its [`CurrentValue`] (which may be explicitly unmeasured), the resulting [`MetricStatus`]
//! and the time it was checked. Metrics are created fresh on every run and never mutated.
//!
//! Groups ([`MetricGroup`]) only affect how reports are laid out.

mod current_value;
mod measure;
mod metric;
mod metric_definition;
mod metric_group;
mod metric_status;
mod metric_unit;
mod metric_value;
mod registry;
mod severity;
mod threshold;

pub use current_value::{CurrentValue, Unmeasured};
pub use measure::Measure;
pub use metric::Metric;
pub use metric_definition::{MetricDefinition, MissingData};
pub use metric_group::MetricGroup;
pub use metric_status::MetricStatus;
pub use metric_unit::MetricUnit;
pub use metric_value::MetricValue;
pub use registry::Registry;
pub use severity::Severity;
pub use threshold::{Threshold, ThresholdType};
