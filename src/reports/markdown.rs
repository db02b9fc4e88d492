use super::common;
use crate::Result;
use crate::health::MonitoringReport;
use crate::metrics::{Metric, MetricGroup};
use core::fmt::Write;
use strum::IntoEnumIterator;

pub fn generate<W: Write>(report: &MonitoringReport, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Recruiting Data Health Report")?;
    writeln!(writer)?;
    writeln!(writer, "- **Generated:** {}", report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer, "- **Overall status:** {}", common::format_overall_status(report.overall_status))?;
    writeln!(writer)?;

    writeln!(writer, "## Summary")?;
    writeln!(writer)?;
    writeln!(writer, "| Total | OK | Warning | Critical | Unmeasured |")?;
    writeln!(writer, "|------:|---:|--------:|---------:|-----------:|")?;
    writeln!(
        writer,
        "| {} | {} | {} | {} | {} |",
        report.total_metrics, report.ok, report.warning, report.critical, report.unmeasured
    )?;

    for group in MetricGroup::iter() {
        let metrics: Vec<_> = report.in_group(group).collect();
        if metrics.is_empty() {
            continue;
        }

        writeln!(writer)?;
        writeln!(writer, "## {group}")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Table | Value | Threshold | Severity | Status |")?;
        writeln!(writer, "|--------|-------|------:|-----------|----------|--------|")?;

        for metric in metrics {
            writeln!(
                writer,
                "| {} | {} | {} | {} | {} | {} |",
                escape(metric.name()),
                escape(metric.table()),
                format_value(metric),
                escape(&metric.threshold().to_string()),
                metric.severity(),
                common::format_status(metric.status)
            )?;
        }
    }

    Ok(())
}

fn format_value(metric: &Metric) -> String {
    let value = escape(&common::format_current_value(metric));
    if metric.is_unmeasured() { format!("_{value}_") } else { value }
}

/// Escape characters that would break a table cell.
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
