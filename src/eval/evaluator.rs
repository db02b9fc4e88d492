use crate::metrics::{CurrentValue, MetricDefinition, MetricStatus, MetricValue, MissingData, Severity, Threshold, ThresholdType, Unmeasured};

/// Evaluate a metric value against its threshold policy.
///
/// `tolerance` is the default tolerance for `exact` comparisons, used when the threshold
/// does not carry its own.
#[must_use]
pub fn evaluate(value: &CurrentValue, threshold: &Threshold, severity: Severity, on_missing: MissingData, tolerance: f64) -> MetricStatus {
    match value {
        CurrentValue::Measured(measured) => {
            if compare(measured, threshold, threshold.tolerance_or(tolerance)) {
                MetricStatus::Ok
            } else {
                status_for_breach(severity)
            }
        }
        CurrentValue::Unmeasured(Unmeasured::Disabled) => MetricStatus::Ok,
        CurrentValue::Unmeasured(_) => match on_missing {
            MissingData::Tolerate => MetricStatus::Ok,
            MissingData::Breach => status_for_breach(severity),
        },
    }
}

/// Evaluate a value against the policy declared by a definition.
#[must_use]
pub fn evaluate_definition(definition: &MetricDefinition, value: &CurrentValue, tolerance: f64) -> MetricStatus {
    evaluate(value, &definition.threshold, definition.severity, definition.on_missing, tolerance)
}

/// Whether a measured value satisfies a threshold.
///
/// A number compared with a label target, or the reverse, never satisfies the threshold.
#[must_use]
pub fn compare(value: &MetricValue, threshold: &Threshold, tolerance: f64) -> bool {
    match (value, &threshold.value) {
        (MetricValue::Number(value), MetricValue::Number(target)) => match threshold.kind {
            ThresholdType::Min => *value >= *target,
            ThresholdType::Max => *value <= *target,
            ThresholdType::Exact => (*value - *target).abs() <= tolerance,
        },
        (MetricValue::Label(value), MetricValue::Label(target)) => threshold.kind == ThresholdType::Exact && value == target,
        _ => false,
    }
}

/// The status a breached threshold carries for a given severity.
#[must_use]
pub const fn status_for_breach(severity: Severity) -> MetricStatus {
    match severity {
        Severity::Info => MetricStatus::Ok,
        Severity::Warning => MetricStatus::Warning,
        Severity::Critical => MetricStatus::Critical,
    }
}
