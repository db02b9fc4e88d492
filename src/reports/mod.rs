//! Report generation for monitoring runs
//!
//! Three generators turn a [`MonitoringReport`](crate::health::MonitoringReport) into output
//! for people and for other programs, each accessed through a `generate` function:
//! - **Console**: Terminal summary grouped by metric group, with optional ANSI colors
//! - **Markdown**: A document with a summary table and one table per group
//! - **JSON**: Machine-readable structured data
//!
//! Unmeasured metrics are always listed, with the reason in place of a value. Numbers
//! with a fractional part are shown with two decimals, integers without.

mod common;
mod console;
mod json;
mod markdown;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use markdown::generate as generate_markdown;
