//! Integration tests for the `check` command.
//!
//! Each test writes a fresh set of table exports into a temporary directory, with timestamps
//! relative to the current time, and runs the full command against the embedded default
//! configuration.

use camino::Utf8PathBuf;
use chrono::{TimeDelta, Utc};
use core::fmt::Write as _;
use recruit_monitor::Host;
use recruit_monitor::commands::UNHEALTHY_EXIT_CODE;
use serde_json::{Value, json};
use std::fs;

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

struct Exports {
    _guard: tempfile::TempDir,
    dir: Utf8PathBuf,
}

impl Exports {
    fn new() -> Self {
        let guard = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(guard.path().to_path_buf()).unwrap();
        Self { _guard: guard, dir }
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.dir.join(name), contents).unwrap();
    }
}

fn hours_ago(hours: i64) -> String {
    (Utc::now() - TimeDelta::hours(hours)).to_rfc3339()
}

/// Exports that satisfy every metric in the default configuration.
fn healthy_exports() -> Exports {
    let exports = Exports::new();

    let schools: Vec<_> = (0..6)
        .map(|i| json!({ "name": format!("School {i}"), "website": if i < 4 { json!(format!("https://s{i}.example")) } else { Value::Null } }))
        .collect();
    exports.write("schools.json", &Value::Array(schools).to_string());

    let mut players = String::from("name,position,school_id,created_at\n");
    for i in 0..12 {
        let position = if i < 10 { "guard" } else { "" };
        let _ = writeln!(players, "Player {i},{position},{},{}", i % 6, hours_ago(i * 24));
    }
    exports.write("players.csv", &players);

    let mut coaches = String::from("name,school_id\n");
    for i in 0..5 {
        let _ = writeln!(coaches, "Coach {i},{i}");
    }
    exports.write("coaches.csv", &coaches);

    write_scrape_runs(&exports, &["success"; 10], 1_000);
    exports
}

fn write_scrape_runs(exports: &Exports, statuses: &[&str], duration_ms: u64) {
    let runs: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let age = i64::try_from(i).unwrap() + 1;
            json!({ "started_at": hours_ago(age), "status": status, "duration_ms": duration_ms })
        })
        .collect();
    exports.write("scrape_runs.json", &Value::Array(runs).to_string());
}

async fn check(exports: &Exports, extra: &[&str]) -> (TestHost, recruit_monitor::Result<()>) {
    let mut args = vec!["recruit-monitor", "check", "--color", "never", "--data-dir", exports.dir.as_str()];
    args.extend_from_slice(extra);

    let mut host = TestHost::default();
    let result = recruit_monitor::run(&mut host, args).await;
    (host, result)
}

#[tokio::test]
async fn test_healthy_dataset() {
    let exports = healthy_exports();
    let json_path = exports.dir.join("health.json");

    let (host, result) = check(&exports, &["--json", json_path.as_str(), "--console"]).await;
    result.unwrap();

    assert_eq!(host.exit_code, None);
    let console = host.output_str();
    assert!(console.contains("Overall status: HEALTHY"), "{console}");

    let report: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report["overall_status"], "healthy");
    assert_eq!(report["total_metrics"], 13);
    assert_eq!(report["ok"], 13);
    assert_eq!(report["unmeasured"], 1);

    let metrics = report["metrics"].as_array().unwrap();
    assert_eq!(metrics[0]["name"], "total_schools");
    assert_eq!(metrics[0]["value"], 6.0);

    let games = metrics.iter().find(|m| m["name"] == "total_games").unwrap();
    assert_eq!(games["value"], Value::Null);
    assert_eq!(games["status"], "ok");
}

#[tokio::test]
async fn test_failed_scrapes_are_critical() {
    let exports = healthy_exports();
    let mut statuses = ["success"; 10];
    statuses[0] = "failed";
    statuses[1] = "failed";
    statuses[2] = "failed";
    write_scrape_runs(&exports, &statuses, 1_000);

    let (host, result) = check(&exports, &[]).await;
    result.unwrap();

    let console = host.output_str();
    assert!(console.contains("scrape_success_rate"));
    assert!(console.contains("Overall status: CRITICAL"), "{console}");
    assert_eq!(host.exit_code, Some(UNHEALTHY_EXIT_CODE));
}

#[tokio::test]
async fn test_slow_scrapes_are_a_warning() {
    let exports = healthy_exports();
    write_scrape_runs(&exports, &["success"; 10], 45_000);

    let (host, result) = check(&exports, &["--fail-on", "warning"]).await;
    result.unwrap();

    assert!(host.output_str().contains("Overall status: WARNING"));
    assert_eq!(host.exit_code, Some(UNHEALTHY_EXIT_CODE));
}

#[tokio::test]
async fn test_missing_coaches_table_is_unmeasured() {
    let exports = healthy_exports();
    fs::remove_file(exports.dir.join("coaches.csv")).unwrap();
    let markdown_path = exports.dir.join("health.md");

    let (host, result) = check(&exports, &["--markdown", markdown_path.as_str()]).await;
    result.unwrap();

    assert!(host.output_str().is_empty());
    let markdown = fs::read_to_string(&markdown_path).unwrap();
    assert!(markdown.contains("total_coaches"));
    assert!(markdown.contains("- **Overall status:** HEALTHY"), "{markdown}");
}

#[tokio::test]
async fn test_empty_directory_fails_the_run() {
    let exports = Exports::new();

    let (host, result) = check(&exports, &[]).await;

    let _ = result.unwrap_err();
    assert!(host.output_str().is_empty());
    assert!(String::from_utf8_lossy(&host.error_buf).contains("observation source is unavailable"));
}
