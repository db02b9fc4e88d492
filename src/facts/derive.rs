//! Derivation of metric values from raw observations.
//!
//! A numeric value is checked against its unit's range as observed, and only then rounded.
//! A percentage of `100.3` is therefore invalid, while `99.6` is measured as `100`.

use super::{FetchOutcome, RawValue};
use crate::metrics::{CurrentValue, MetricDefinition, MetricValue, Unmeasured};

/// Turn a fetch outcome into the value a metric is evaluated on.
#[must_use]
pub fn derive_value(definition: &MetricDefinition, outcome: &FetchOutcome) -> CurrentValue {
    let observation = match outcome {
        FetchOutcome::Found(observation) => observation,
        FetchOutcome::NoData => return Unmeasured::NoData.into(),
        FetchOutcome::Failed(err) => return Unmeasured::SourceFailed(format!("{err}")).into(),
        FetchOutcome::TimedOut => return Unmeasured::TimedOut.into(),
        FetchOutcome::Disabled => return Unmeasured::Disabled.into(),
    };

    let raw = match &observation.value {
        RawValue::Count(count) => count_to_f64(*count),

        RawValue::Fraction { part, whole } => {
            if part > whole {
                return Unmeasured::InvalidValue(format!("{part} of {whole} is more than the whole")).into();
            }

            return match percentage(*part, *whole) {
                Some(pct) => CurrentValue::Measured(MetricValue::Number(pct)),
                None => Unmeasured::ZeroDenominator.into(),
            };
        }

        RawValue::Samples(samples) => {
            let window = definition.measure.window().unwrap_or(samples.len());
            match window_average(samples, window) {
                Some(avg) => avg,
                None => return Unmeasured::EmptyWindow.into(),
            }
        }

        RawValue::Value(MetricValue::Number(n)) => *n,

        RawValue::Value(MetricValue::Label(label)) => {
            if definition.threshold.value.as_label().is_none() {
                return Unmeasured::InvalidValue(format!("expected a number, got '{label}'")).into();
            }

            return CurrentValue::Measured(MetricValue::Label(label.clone()));
        }
    };

    if definition.threshold.value.as_number().is_none() {
        return Unmeasured::InvalidValue(format!("expected a label, got {raw}")).into();
    }

    if let Some(problem) = definition.unit.check(raw) {
        return Unmeasured::InvalidValue(problem).into();
    }

    let value = if definition.unit.is_rounded() { round_half_up(raw) } else { raw };
    CurrentValue::Measured(MetricValue::Number(value))
}

/// Round to the nearest integer, with halves rounded towards positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `part` as a rounded percentage of `whole`, undefined when `whole` is zero.
#[must_use]
pub fn percentage(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }

    Some(round_half_up(count_to_f64(part) * 100.0 / count_to_f64(whole)))
}

/// Average of at most `window` leading samples, undefined when there are none.
#[must_use]
pub fn window_average(samples: &[f64], window: usize) -> Option<f64> {
    let taken = samples.get(..window.min(samples.len()))?;
    if taken.is_empty() {
        return None;
    }

    #[expect(clippy::cast_precision_loss, reason = "window sizes are small")]
    let len = taken.len() as f64;

    Some(taken.iter().sum::<f64>() / len)
}

#[expect(clippy::cast_precision_loss, reason = "row counts stay far below 2^53")]
fn count_to_f64(count: u64) -> f64 {
    count as f64
}
