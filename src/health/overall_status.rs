use serde::Serialize;
use strum::{Display, EnumIter};

/// The single verdict for a whole monitoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverallStatus {
    Healthy,
    Warning,
    Critical,
}
