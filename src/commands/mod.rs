//! Command-line interface
//!
//! Each subcommand lives in its own module and writes through a [`Host`] so that output and
//! process exit can be captured in tests. `check` is the orchestration point: it loads the
//! configuration, builds the registry, runs the collector against a
//! [`SnapshotSource`](crate::facts::snapshot::SnapshotSource) and renders the report.

mod check;
mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;
mod validate;

pub use check::{CheckArgs, UNHEALTHY_EXIT_CODE, check};
pub use common::{ColorMode, FailOn, LogLevel};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
