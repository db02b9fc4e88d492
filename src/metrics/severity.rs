use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// How consequential a threshold breach is, independent of how far the value deviates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    /// Observational only, a breach is never enforced.
    Info,
    Warning,
    Critical,
}
