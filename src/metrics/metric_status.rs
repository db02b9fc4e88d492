use serde::Serialize;
use strum::{Display, EnumIter};

/// The verdict for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricStatus {
    Ok,
    Warning,
    Critical,
}
