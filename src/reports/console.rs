use super::common;
use crate::Result;
use crate::health::{MonitoringReport, OverallStatus};
use crate::metrics::{Metric, MetricGroup, MetricStatus};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const SEPARATOR_WIDTH: usize = 40;

pub fn generate<W: Write>(report: &MonitoringReport, use_colors: bool, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, use_colors, report).generate_report(report)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme,
    layout: Layout,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, use_colors: bool, report: &MonitoringReport) -> Self {
        Self {
            writer,
            colors: ColorScheme { enabled: use_colors },
            layout: Layout::new(report),
        }
    }

    fn generate_report(&mut self, report: &MonitoringReport) -> Result<()> {
        self.colors.write_bold(self.writer, "Recruiting Data Health")?;
        writeln!(self.writer, "  {}", report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;

        for group in MetricGroup::iter() {
            let mut metrics = report.in_group(group).peekable();
            if metrics.peek().is_none() {
                continue;
            }

            writeln!(self.writer)?;
            self.colors.write_bold(self.writer, &group.to_string())?;
            writeln!(self.writer)?;

            for metric in metrics {
                self.write_metric_row(metric)?;
            }
        }

        self.write_summary(report)
    }

    fn write_metric_row(&mut self, metric: &Metric) -> Result<()> {
        let Layout {
            name_width,
            value_width,
            threshold_width,
        } = self.layout;

        write!(self.writer, "{:INDENT$}{:<name_width$}{:COLUMN_GAP$}", "", metric.name(), "")?;

        let value = common::format_current_value(metric);
        if metric.is_unmeasured() {
            self.colors.write_dimmed(self.writer, &format!("{value:<value_width$}"))?;
        } else {
            write!(self.writer, "{value:<value_width$}")?;
        }

        let threshold = metric.threshold().to_string();
        write!(self.writer, "{:COLUMN_GAP$}{threshold:<threshold_width$}{:COLUMN_GAP$}", "", "")?;
        write!(self.writer, "{:<8}{:COLUMN_GAP$}", metric.severity().to_string(), "")?;
        self.colors.write_status(self.writer, metric.status)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &MonitoringReport) -> Result<()> {
        writeln!(self.writer)?;
        self.colors.write_dimmed(self.writer, &"─".repeat(SEPARATOR_WIDTH))?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} metric(s): {} ok, {} warning, {} critical, {} unmeasured",
            report.total_metrics, report.ok, report.warning, report.critical, report.unmeasured
        )?;

        write!(self.writer, "Overall status: ")?;
        self.colors.write_overall(self.writer, report.overall_status)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn write_bold<W: Write>(&self, writer: &mut W, text: &str) -> fmt::Result {
        if self.enabled {
            write!(writer, "{}", text.bold())
        } else {
            write!(writer, "{text}")
        }
    }

    fn write_dimmed<W: Write>(&self, writer: &mut W, text: &str) -> fmt::Result {
        if self.enabled {
            write!(writer, "{}", text.dimmed())
        } else {
            write!(writer, "{text}")
        }
    }

    fn write_status<W: Write>(&self, writer: &mut W, status: MetricStatus) -> fmt::Result {
        let text = common::format_status(status);
        if !self.enabled {
            return write!(writer, "{text}");
        }

        match status {
            MetricStatus::Ok => write!(writer, "{}", text.green()),
            MetricStatus::Warning => write!(writer, "{}", text.yellow()),
            MetricStatus::Critical => write!(writer, "{}", text.red().bold()),
        }
    }

    fn write_overall<W: Write>(&self, writer: &mut W, status: OverallStatus) -> fmt::Result {
        let text = common::format_overall_status(status);
        if !self.enabled {
            return write!(writer, "{text}");
        }

        match status {
            OverallStatus::Healthy => write!(writer, "{}", text.green().bold()),
            OverallStatus::Warning => write!(writer, "{}", text.yellow().bold()),
            OverallStatus::Critical => write!(writer, "{}", text.red().bold()),
        }
    }
}

#[derive(Clone, Copy)]
#[expect(clippy::struct_field_names, reason = "Width suffix clearly indicates dimension measurements")]
struct Layout {
    name_width: usize,
    value_width: usize,
    threshold_width: usize,
}

impl Layout {
    fn new(report: &MonitoringReport) -> Self {
        Self {
            name_width: widest(report, |m| m.name().len(), "Metric".len()),
            value_width: widest(report, |m| common::format_current_value(m).chars().count(), "Value".len()),
            threshold_width: widest(report, |m| m.threshold().to_string().chars().count(), "Threshold".len()),
        }
    }
}

fn widest(report: &MonitoringReport, width: impl Fn(&Metric) -> usize, minimum: usize) -> usize {
    report.metrics.iter().map(width).max().unwrap_or(0).max(minimum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::aggregate;
    use crate::metrics::{CurrentValue, Measure, MetricDefinition, MetricUnit, MetricValue, Severity, Threshold, Unmeasured};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
    }

    fn metric(def: MetricDefinition, value: CurrentValue, status: MetricStatus) -> Metric {
        Metric::new(Arc::new(def), value, status, now())
    }

    fn sample_report() -> MonitoringReport {
        let schools = MetricDefinition::new("total_schools", "schools", Measure::RowCount, MetricUnit::Count, Threshold::min(5.0), Severity::Critical);
        let duration = MetricDefinition::new(
            "avg_scrape_duration_ms",
            "scrape_runs",
            Measure::Average {
                column: "duration_ms".into(),
                order_by: "started_at".into(),
                window: 20,
            },
            MetricUnit::Milliseconds,
            Threshold::max(30000.0),
            Severity::Warning,
        )
        .with_group(MetricGroup::Performance);

        aggregate(
            vec![
                metric(schools, CurrentValue::Measured(MetricValue::Number(3.0)), MetricStatus::Critical),
                metric(duration, CurrentValue::Unmeasured(Unmeasured::EmptyWindow), MetricStatus::Ok),
            ],
            now(),
        )
    }

    #[test]
    fn test_generate_plain() {
        let mut output = String::new();
        generate(&sample_report(), false, &mut output).unwrap();

        assert!(output.contains("Recruiting Data Health"));
        assert!(output.contains("2024-03-01 06:00:00 UTC"));
        assert!(output.contains("Core Data"));
        assert!(output.contains("Performance"));
        assert!(!output.contains("Integrity"));
        assert!(output.contains("total_schools"));
        assert!(output.contains(">= 5"));
        assert!(output.contains("CRITICAL"));
        assert!(output.contains("empty window"));
        assert!(output.contains("2 metric(s): 1 ok, 0 warning, 1 critical, 1 unmeasured"));
        assert!(output.contains("Overall status: CRITICAL"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_generate_colored() {
        let mut output = String::new();
        generate(&sample_report(), true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_generate_empty_report() {
        let report = aggregate(Vec::new(), now());
        let mut output = String::new();
        generate(&report, false, &mut output).unwrap();

        assert!(output.contains("0 metric(s)"));
        assert!(output.contains("Overall status: HEALTHY"));
    }
}
