//! recruit-monitor crate
//!
//! Data-quality health checks for a sports-recruiting dataset. A run samples a handful of
//! tables through an [`facts::ObservationSource`], evaluates each registered metric against
//! its threshold policy and folds the results into one [`health::MonitoringReport`].
//!
//! # Module Organization
//!
//! - [`metrics`]: Metric definitions, values and the registry
//! - [`eval`]: Threshold evaluation
//! - [`facts`]: Observation sources and the collector
//! - [`health`]: Report aggregation and run-level failures
//! - [`reports`]: Console, markdown and JSON renderers
//! - [`commands`]: Command-line interface and orchestration

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod eval;
pub mod facts;
pub mod health;
pub mod metrics;
pub mod reports;

pub use crate::commands::{Host, run};
