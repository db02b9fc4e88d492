use crate::Result;
use crate::health::MonitoringReport;
use crate::metrics::{CurrentValue, Metric, MetricValue};
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(report: &MonitoringReport, writer: &mut W) -> Result<()> {
    let metrics: Vec<_> = report.metrics.iter().map(metric_to_json).collect();

    let output = json!({
        "timestamp": report.timestamp.to_rfc3339(),
        "overall_status": report.overall_status,
        "total_metrics": report.total_metrics,
        "ok": report.ok,
        "warning": report.warning,
        "critical": report.critical,
        "unmeasured": report.unmeasured,
        "metrics": metrics,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn metric_to_json(metric: &Metric) -> serde_json::Value {
    let (value, unmeasured) = match &metric.value {
        CurrentValue::Measured(value) => (metric_value_to_json(value), serde_json::Value::Null),
        CurrentValue::Unmeasured(reason) => (serde_json::Value::Null, json!(reason.to_string())),
    };

    json!({
        "name": metric.name(),
        "group": metric.group(),
        "table": metric.table(),
        "description": metric.description(),
        "severity": metric.severity(),
        "unit": metric.definition.unit,
        "threshold": metric.threshold(),
        "value": value,
        "unmeasured": unmeasured,
        "status": metric.status,
        "last_checked": metric.last_checked.to_rfc3339(),
    })
}

fn metric_value_to_json(value: &MetricValue) -> serde_json::Value {
    match value {
        MetricValue::Number(n) => json!(n),
        MetricValue::Label(s) => json!(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::aggregate;
    use crate::metrics::{Measure, MetricDefinition, MetricStatus, MetricUnit, Severity, Threshold, Unmeasured};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_metric_value_to_json() {
        assert_eq!(metric_value_to_json(&MetricValue::Number(1.5)), json!(1.5));
        assert_eq!(metric_value_to_json(&MetricValue::Label("success".into())), json!("success"));
    }

    #[test]
    fn test_generate_empty_report() {
        let mut output = String::new();
        generate(&aggregate(Vec::new(), now()), &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["overall_status"], "healthy");
        assert_eq!(parsed["total_metrics"], 0);
        assert_eq!(parsed["metrics"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_generate_metrics() {
        let status = MetricDefinition::new(
            "last_scrape_status",
            "scrape_runs",
            Measure::Latest {
                column: "status".into(),
                order_by: "started_at".into(),
            },
            MetricUnit::Count,
            Threshold::exact("success"),
            Severity::Critical,
        )
        .with_description("Outcome of the most recent scrape run");
        let schools = MetricDefinition::new("total_schools", "schools", Measure::RowCount, MetricUnit::Count, Threshold::min(5.0), Severity::Critical);

        let report = aggregate(
            vec![
                Metric::new(Arc::new(status), CurrentValue::Measured("failed".into()), MetricStatus::Critical, now()),
                Metric::new(
                    Arc::new(schools),
                    CurrentValue::Unmeasured(Unmeasured::SourceFailed("connection reset".into())),
                    MetricStatus::Ok,
                    now(),
                ),
            ],
            now(),
        );

        let mut output = String::new();
        generate(&report, &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["timestamp"], "2024-03-01T06:00:00+00:00");
        assert_eq!(parsed["overall_status"], "critical");
        assert_eq!(parsed["unmeasured"], 1);

        let first = &parsed["metrics"][0];
        assert_eq!(first["name"], "last_scrape_status");
        assert_eq!(first["group"], "core_data");
        assert_eq!(first["description"], "Outcome of the most recent scrape run");
        assert_eq!(first["value"], "failed");
        assert_eq!(first["threshold"]["type"], "exact");
        assert_eq!(first["threshold"]["value"], "success");
        assert_eq!(first["status"], "critical");
        assert!(first["unmeasured"].is_null());

        let second = &parsed["metrics"][1];
        assert!(second["value"].is_null());
        assert_eq!(second["unmeasured"], "source failed: connection reset");
        assert_eq!(second["status"], "ok");
    }
}
