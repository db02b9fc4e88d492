use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Logical grouping of checks, used only to lay out reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    #[strum(to_string = "Core Data")]
    CoreData,
    Growth,
    Integrity,
    Performance,
}
