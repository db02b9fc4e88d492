//! Data-quality health checks for a sports-recruiting dataset.
//!
//! # Overview
//!
//! `recruit-monitor` samples exports of the recruiting tables (schools, players, coaches,
//! scrape runs, ...), evaluates each configured metric against its threshold and prints a
//! single health verdict: healthy, warning or critical.
//!
//! # Quick Start
//!
//! Write a configuration file and check a directory of exports:
//!
//! ```bash
//! recruit-monitor init
//! recruit-monitor check --data-dir exports
//! ```
//!
//! Each table is read from `<table>.json` (an array of objects) or `<table>.csv` (a header row
//! followed by records).
//!
//! # Reports
//!
//! ```bash
//! recruit-monitor check --markdown health.md --json health.json --console
//! ```
//!
//! Console output is shown when no file report is requested, or when `--console` is given.
//!
//! # Exit Codes
//!
//! - `0`: the run completed and the overall status is below `--fail-on` (default `critical`)
//! - `1`: the run could not produce a report, or the configuration is invalid
//! - `2`: the overall status meets `--fail-on`
//!
//! # Configuration
//!
//! `recruit-monitor.toml` in the working directory is used when present, otherwise the
//! embedded default. Validate a file with:
//!
//! ```bash
//! recruit-monitor validate --config recruit-monitor.toml
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use recruit_monitor::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real terminal and process.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
