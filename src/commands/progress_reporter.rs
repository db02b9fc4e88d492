use crate::facts::Progress;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Instant;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";

/// A progress bar on stderr that stays hidden until a run has taken longer than a delay.
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visible_after: Instant,
    visible: AtomicBool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=> "));
        }

        Self {
            bar,
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
        }
    }

    fn reveal_if_due(&self) {
        if !self.visible.load(Ordering::Relaxed) && Instant::now() >= self.visible_after {
            self.visible.store(true, Ordering::Relaxed);
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }
}

impl Progress for ProgressReporter {
    fn start(&self, phase: &str, total: u64) {
        self.bar.set_prefix(phase.to_string());
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_message(format!("sampled 0/{total} metrics"));
        self.reveal_if_due();
    }

    fn advance(&self, label: &str) {
        self.bar.inc(1);
        let total = self.bar.length().unwrap_or_default();
        self.bar.set_message(format!("sampled {}/{total} metrics, last: {label}", self.bar.position()));
        self.reveal_if_due();
    }

    fn done(&self) {
        if self.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_position() {
        let reporter = ProgressReporter::new(Duration::from_secs(3600), false);
        reporter.start("Sampling", 3);
        reporter.advance("total_schools");
        reporter.advance("total_players");

        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.length(), Some(3));
        assert!(!reporter.visible.load(Ordering::Relaxed));
        reporter.done();
    }
}
