//! Threshold evaluation
//!
//! Turns a metric's [`CurrentValue`](crate::metrics::CurrentValue) into a
//! [`MetricStatus`](crate::metrics::MetricStatus). Evaluation is a pure function of the
//! value, the threshold, the severity and the missing-data policy.
//!
//! A value that satisfies its threshold is always `ok`. A breach maps through the severity:
//! `info` metrics are observational and stay `ok`, `warning` and `critical` metrics take
//! the matching status. Unmeasured values are `ok` unless the definition asks for absence
//! to be treated as a breach; disabled definitions are always `ok`.

mod evaluator;

pub use evaluator::{compare, evaluate, evaluate_definition, status_for_breach};
