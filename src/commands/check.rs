use super::common::{ColorMode, FailOn, LogLevel, init_logging};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::facts::{Collector, snapshot::SnapshotSource};
use crate::health::MonitoringReport;
use crate::reports::{generate_console, generate_json, generate_markdown};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::{IsTerminal, Write, stderr, stdout};

/// Exit code used when the overall status meets `--fail-on`
pub const UNHEALTHY_EXIT_CODE: i32 = 2;

const PROGRESS_DELAY: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory holding the table exports (`<table>.json` or `<table>.csv`)
    #[arg(long, short = 'd', value_name = "PATH", default_value = "data")]
    pub data_dir: Utf8PathBuf,

    /// Path to configuration file (default is `recruit-monitor.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Overall status at which the command exits with a non-zero code
    #[arg(long, value_name = "STATUS", default_value = "critical")]
    pub fail_on: FailOn,

    /// Output the report to a Markdown file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub markdown: Option<Utf8PathBuf>,

    /// Output the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the report to the console. Implied when no other report is generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

pub async fn check<H: Host>(host: &mut H, args: &CheckArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let registry = config.registry()?;
    let now = Utc::now();

    let source = SnapshotSource::new(args.data_dir.clone(), now);
    let mut collector = Collector::new(&source, config.collector_options());
    if args.log_level == LogLevel::None && stderr().is_terminal() {
        collector = collector.with_progress(ProgressReporter::new(PROGRESS_DELAY, args.color.use_colors(true)));
    }

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            futures::future::pending::<()>().await;
        }
    };

    let report = match collector.run_until(&registry, now, cancel).await {
        Ok(report) => report,
        Err(failure) => {
            let _ = writeln!(host.error(), "❌ {failure}");
            return Err(app_err!("monitoring run failed: {failure}"));
        }
    };

    write_reports(host, args, &report)?;

    if args.fail_on.fails(report.overall_status) {
        log::info!("Overall status {} meets --fail-on {:?}", report.overall_status, args.fail_on);
        host.exit(UNHEALTHY_EXIT_CODE);
    }

    Ok(())
}

fn write_reports<H: Host>(host: &mut H, args: &CheckArgs, report: &MonitoringReport) -> Result<()> {
    if let Some(filename) = &args.markdown {
        let mut markdown = String::new();
        generate_markdown(report, &mut markdown)?;
        fs::write(filename, markdown).into_app_err_with(|| format!("writing Markdown report to '{filename}'"))?;
    }

    if let Some(filename) = &args.json {
        let mut json = String::new();
        generate_json(report, &mut json)?;
        fs::write(filename, json).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    let generating_files = args.markdown.is_some() || args.json.is_some();
    if args.console || !generating_files {
        let mut console = String::new();
        generate_console(report, args.color.use_colors(stdout().is_terminal()), &mut console)?;
        let _ = write!(host.output(), "{console}");
    }

    Ok(())
}
