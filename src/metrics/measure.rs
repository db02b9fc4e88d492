use core::time::Duration;
use serde::{Deserialize, Serialize};

/// What a source has to observe in a definition's table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measure {
    /// Number of rows in the table. An empty table is a measured zero.
    RowCount,

    /// Number of rows whose timestamp falls within the trailing window.
    RecentRows {
        timestamp_column: String,
        #[serde(with = "humantime_serde")]
        within: Duration,
    },

    /// Share of rows with a non-null value in a column.
    Coverage { column: String },

    /// Number of rows repeating a non-null value already seen in a column.
    Duplicates { column: String },

    /// Average of a numeric column over the most recent `window` rows.
    Average { column: String, order_by: String, window: usize },

    /// Percentage of the most recent `window` rows whose column holds `equals`.
    Rate {
        column: String,
        equals: String,
        order_by: String,
        window: usize,
    },

    /// Most recent non-null value of a column.
    Latest { column: String, order_by: String },
}

impl Measure {
    /// The rolling-window size, for measures that have one.
    #[must_use]
    pub const fn window(&self) -> Option<usize> {
        match self {
            Self::Average { window, .. } | Self::Rate { window, .. } => Some(*window),
            _ => None,
        }
    }

    /// The column this measure reads, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::RowCount => None,
            Self::RecentRows { timestamp_column, .. } => Some(timestamp_column),
            Self::Coverage { column }
            | Self::Duplicates { column }
            | Self::Average { column, .. }
            | Self::Rate { column, .. }
            | Self::Latest { column, .. } => Some(column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        measure: Measure,
    }

    #[test]
    fn test_deserialize_row_count() {
        let w: Wrapper = toml::from_str("measure = { kind = \"row_count\" }").unwrap();
        assert_eq!(w.measure, Measure::RowCount);
        assert_eq!(w.measure.window(), None);
    }

    #[test]
    fn test_deserialize_recent_rows_with_humantime() {
        let w: Wrapper = toml::from_str("measure = { kind = \"recent_rows\", timestamp_column = \"created_at\", within = \"7d\" }").unwrap();
        assert_eq!(
            w.measure,
            Measure::RecentRows {
                timestamp_column: "created_at".to_string(),
                within: Duration::from_secs(7 * 24 * 60 * 60),
            }
        );
    }

    #[test]
    fn test_deserialize_average_window() {
        let w: Wrapper =
            toml::from_str("measure = { kind = \"average\", column = \"success_rate\", order_by = \"started_at\", window = 10 }").unwrap();
        assert_eq!(w.measure.window(), Some(10));
        assert_eq!(w.measure.column(), Some("success_rate"));
    }

    #[test]
    fn test_deserialize_rate() {
        let w: Wrapper = toml::from_str(
            "measure = { kind = \"rate\", column = \"status\", equals = \"success\", order_by = \"started_at\", window = 10 }",
        )
        .unwrap();
        assert_eq!(w.measure.window(), Some(10));
        assert_eq!(w.measure.column(), Some("status"));
    }
}
