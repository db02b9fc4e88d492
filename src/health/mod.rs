//! Folding evaluated metrics into one health verdict
//!
//! [`aggregate`] tallies metrics by status and rolls them up with a strict priority rule:
//! any `critical` metric makes the whole report critical, otherwise any `warning` makes it
//! a warning, otherwise it is healthy. The aggregator knows nothing about definitions,
//! groups or thresholds and performs no filtering. An empty input is vacuously healthy.
//!
//! A run either produces a [`MonitoringReport`] or fails with a [`RunFailure`]; a report
//! full of unmeasured metrics is still a report.

mod aggregator;
mod monitoring_report;
mod overall_status;
mod run_failure;

pub use aggregator::{aggregate, roll_up};
pub use monitoring_report::MonitoringReport;
pub use overall_status::OverallStatus;
pub use run_failure::RunFailure;
