use crate::Result;
use crate::facts::CollectorOptions;
use crate::metrics::{MetricDefinition, Registry};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The configuration file looked for in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "recruit-monitor.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How long a single metric's fetch may take
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// How long a whole run may take
    #[serde(default = "default_run_timeout", with = "humantime_serde")]
    pub run_timeout: Option<Duration>,

    /// Maximum number of fetches in flight at once
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Default tolerance for numeric `exact` thresholds
    #[serde(default)]
    pub exact_tolerance: f64,

    /// The metric registry, in report order
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,

    /// Where the configuration was read from, `None` for the embedded default
    #[serde(skip)]
    pub origin: Option<Utf8PathBuf>,
}

const fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

#[expect(clippy::unnecessary_wraps, reason = "serde default functions must return the field type")]
const fn default_run_timeout() -> Option<Duration> {
    Some(Duration::from_secs(120))
}

const fn default_max_concurrent_fetches() -> usize {
    8
}

impl Config {
    /// Load configuration from a file or use the embedded default
    ///
    /// With no explicit path, `recruit-monitor.toml` in `base_dir` is used when present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No '{path}' found, using the default configuration");
                    return Self::embedded();
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let mut config = Self::parse(&text, final_path.as_str())?;
        config.origin = Some(final_path);
        Ok(config)
    }

    /// The configuration embedded in the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG_TOML, "default_config.toml")
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).into_app_err_with(|| format!("parsing configuration file '{origin}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Build the metric registry, validating every definition.
    pub fn registry(&self) -> Result<Registry> {
        Registry::new(self.metrics.iter().cloned())
    }

    #[must_use]
    pub const fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            fetch_timeout: self.fetch_timeout,
            run_timeout: self.run_timeout,
            max_concurrent_fetches: self.max_concurrent_fetches,
            exact_tolerance: self.exact_tolerance,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.fetch_timeout.is_zero() {
            return Err(app_err!("fetch_timeout must be greater than zero"));
        }

        if self.run_timeout.is_some_and(|t| t.is_zero()) {
            return Err(app_err!("run_timeout must be greater than zero"));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(app_err!("max_concurrent_fetches must be at least 1"));
        }

        if !self.exact_tolerance.is_finite() || self.exact_tolerance < 0.0 {
            return Err(app_err!("exact_tolerance must be a non-negative number, got {}", self.exact_tolerance));
        }

        let _ = self.registry()?;
        Ok(())
    }
}
