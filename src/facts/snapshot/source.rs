use super::Table;
use super::table::number;
use crate::Result;
use crate::facts::{Observation, ObservationSource, RawValue};
use crate::metrics::{Measure, MetricDefinition, MetricValue};
use camino::Utf8PathBuf;
use chrono::{DateTime, TimeDelta, Utc};
use ohno::{IntoAppError, bail};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::spawn_blocking;

const LOG_TARGET: &str = "  snapshot";

/// An observation source backed by a directory of table exports.
///
/// Each table is read from `<dir>/<table>.json` or, failing that, `<dir>/<table>.csv`. A table
/// is loaded the first time a definition needs it and then shared by every later fetch.
/// Different tables load concurrently; fetches of the same table wait for its single load.
#[derive(Debug)]
pub struct SnapshotSource {
    dir: Utf8PathBuf,
    now: DateTime<Utc>,
    tables: Mutex<HashMap<String, Arc<OnceCell<Arc<Table>>>>>,
}

impl SnapshotSource {
    /// Create a source reading from `dir`, evaluating time windows relative to `now`.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>, now: DateTime<Utc>) -> Self {
        Self {
            dir: dir.into(),
            now,
            tables: Mutex::new(HashMap::new()),
        }
    }

    async fn table(&self, name: &str) -> Result<Arc<Table>> {
        let cell = Arc::clone(self.tables.lock().await.entry(name.to_string()).or_default());

        // A failed load leaves the cell empty so a later fetch retries it.
        let table = cell
            .get_or_try_init(|| async {
                let table = self.load(name).await?;
                log::debug!(target: LOG_TARGET, "Loaded table '{name}' with {} row(s)", table.len());
                Ok::<_, ohno::AppError>(Arc::new(table))
            })
            .await?;

        Ok(Arc::clone(table))
    }

    /// Read an export and parse it on the blocking pool, keeping the runtime free for timers.
    async fn load(&self, name: &str) -> Result<Table> {
        let json_path = self.dir.join(format!("{name}.json"));
        match tokio::fs::read_to_string(&json_path).await {
            Ok(text) => {
                let origin = json_path.to_string();
                return spawn_blocking(move || Table::from_json(&text, &origin)).await?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to read '{json_path}'")),
        }

        let csv_path = self.dir.join(format!("{name}.csv"));
        match tokio::fs::read(&csv_path).await {
            Ok(bytes) => {
                let origin = csv_path.to_string();
                spawn_blocking(move || Table::from_csv(bytes.as_slice(), &origin)).await?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                bail!("no export for table '{name}' in '{}' (expected {name}.json or {name}.csv)", self.dir)
            }
            Err(e) => Err(e).into_app_err_with(|| format!("unable to read '{csv_path}'")),
        }
    }

    fn since(&self, within: core::time::Duration) -> Result<DateTime<Utc>> {
        let window = TimeDelta::from_std(within).into_app_err("time window is too large")?;
        Ok(self.now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }
}

impl ObservationSource for SnapshotSource {
    async fn fetch(&self, definition: &MetricDefinition) -> Result<Option<Observation>> {
        let table = self.table(&definition.table).await?;

        let value = match &definition.measure {
            Measure::RowCount => RawValue::Count(table.row_count()),
            Measure::RecentRows { timestamp_column, within } => {
                RawValue::Count(table.recent_rows(timestamp_column, self.since(*within)?, self.now)?)
            }
            Measure::Coverage { column } => RawValue::Fraction {
                part: table.non_null(column),
                whole: table.row_count(),
            },
            Measure::Duplicates { column } => RawValue::Count(table.duplicates(column)),
            Measure::Average { column, order_by, window } => RawValue::Samples(table.samples(column, order_by, *window)?),
            Measure::Rate {
                column,
                equals,
                order_by,
                window,
            } => RawValue::Samples(table.rate_samples(column, equals, order_by, *window)?),
            Measure::Latest { column, order_by } => {
                let Some(latest) = table.latest(column, order_by)? else {
                    return Ok(None);
                };
                RawValue::Value(to_metric_value(latest, definition.threshold.value.as_label().is_some()))
            }
        };

        Ok(Some(Observation::new(value, self.now)))
    }
}

/// Read a cell as a label when the definition judges labels, as a number otherwise.
fn to_metric_value(value: &Value, as_label: bool) -> MetricValue {
    if !as_label && let Some(n) = number(value) {
        return MetricValue::Number(n);
    }

    match value {
        Value::String(s) => MetricValue::Label(s.trim().to_string()),
        other => MetricValue::Label(other.to_string()),
    }
}
