//! Command-line settings shared between commands.

use crate::health::OverallStatus;
use clap::ValueEnum;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Resolve the mode against whether the destination is a terminal.
    #[must_use]
    pub const fn use_colors(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// The overall status at which `check` reports failure through its exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Fail only when the overall status is critical
    Critical,

    /// Fail when the overall status is warning or critical
    Warning,

    /// Never fail because of the overall status
    Never,
}

impl FailOn {
    #[must_use]
    pub const fn fails(self, status: OverallStatus) -> bool {
        match self {
            Self::Critical => matches!(status, OverallStatus::Critical),
            Self::Warning => matches!(status, OverallStatus::Warning | OverallStatus::Critical),
            Self::Never => false,
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_on() {
        assert!(FailOn::Critical.fails(OverallStatus::Critical));
        assert!(!FailOn::Critical.fails(OverallStatus::Warning));
        assert!(FailOn::Warning.fails(OverallStatus::Warning));
        assert!(FailOn::Warning.fails(OverallStatus::Critical));
        assert!(!FailOn::Warning.fails(OverallStatus::Healthy));
        assert!(!FailOn::Never.fails(OverallStatus::Critical));
    }

    #[test]
    fn test_color_mode() {
        assert!(ColorMode::Always.use_colors(false));
        assert!(!ColorMode::Never.use_colors(true));
        assert!(ColorMode::Auto.use_colors(true));
        assert!(!ColorMode::Auto.use_colors(false));
    }
}
