use super::Host;
use super::config::Config;
use crate::Result;
use crate::metrics::{MetricGroup, Registry};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `recruit-monitor.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Config, Registry)> {
    let config = Config::load(base_dir, config_path)?;
    let registry = config.registry()?;
    Ok((config, registry))
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match validate_config_inner(Utf8Path::new("."), args.config.as_ref()) {
        Ok((config, registry)) => {
            let mut out = host.output();
            let _ = writeln!(out, "Configuration file is valid");
            if let Some(path) = &config.origin {
                let _ = writeln!(out, "Config file: {path}");
            } else {
                let _ = writeln!(out, "Using default configuration (no config file found)");
            }

            let _ = writeln!(out, "{} metric(s), {} enabled", registry.len(), registry.enabled_count());
            for group in MetricGroup::iter() {
                let count = registry.in_group(group).count();
                if count > 0 {
                    let _ = writeln!(out, "  {group}: {count}");
                }
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
