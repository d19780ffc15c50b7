//! Runner configuration
//!
//! The configuration is read from the `config.toml` file at the root of the workspace, or from the
//! file passed with `--config`. Command line arguments take precedence over the file.

use std::fs;
use std::path::PathBuf;

use log::LevelFilter;
use serde::Deserialize;

use crate::path::get_workspace_path;

/// Number of emissions printed by `run` when not configured.
pub const DEFAULT_EMISSIONS: usize = 65;
/// Number of ticks simulated by `check` when not configured.
pub const DEFAULT_TICKS: usize = 10_000;
/// Target triple used to build the demo when not configured.
pub const DEFAULT_TARGET: &str = "armv4t-none-eabi";

// ——————————————————————————— Config Definition ———————————————————————————— //

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub simulation: Simulation,
    #[serde(default)]
    pub target: Target,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Log {
    pub level: Option<String>,
    pub color: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    pub emissions: Option<usize>,
    pub ticks: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub triple: Option<String>,
    pub profile: Option<Profiles>,
    pub start_address: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profiles {
    Debug,
    Release,
}

impl Log {
    /// Returns the configured log level, `info` by default.
    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        match &self.level {
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|_| format!("Invalid log level '{}'", level)),
            None => Ok(LevelFilter::Info),
        }
    }
}

impl Target {
    pub fn triple(&self) -> &str {
        self.triple.as_deref().unwrap_or(DEFAULT_TARGET)
    }
}

// ————————————————————————————— Config Loader —————————————————————————————— //

/// Read the configuration.
///
/// A missing `config.toml` at the root of the workspace results in the default configuration,
/// while an explicit path must exist.
pub fn read_config(path: &Option<PathBuf>) -> Result<Config, String> {
    let config = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Could not read '{}': {}", path.display(), err))?,
        None => {
            let mut config_path = get_workspace_path();
            config_path.push("config.toml");
            // Creating a default config if there is none
            fs::read_to_string(config_path).unwrap_or_default()
        }
    };

    parse_config(&config)
}

fn parse_config(config: &str) -> Result<Config, String> {
    toml::from_str::<Config>(config)
        .map_err(|err| format!("Failed to parse configuration:\n{}", err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.log.level_filter(), Ok(LevelFilter::Info));
        assert_eq!(cfg.log.color, None);
        assert_eq!(cfg.simulation.emissions, None);
        assert_eq!(cfg.target.triple(), DEFAULT_TARGET);
        assert_eq!(cfg.target.profile, None);
    }

    #[test]
    fn full_config() {
        let cfg = parse_config(
            r#"
            [log]
            level = "debug"
            color = false

            [simulation]
            emissions = 100
            ticks = 500

            [target]
            triple = "armv5te-none-eabi"
            profile = "release"
            start_address = 0x1000
            "#,
        )
        .unwrap();

        assert_eq!(cfg.log.level_filter(), Ok(LevelFilter::Debug));
        assert_eq!(cfg.log.color, Some(false));
        assert_eq!(cfg.simulation.emissions, Some(100));
        assert_eq!(cfg.simulation.ticks, Some(500));
        assert_eq!(cfg.target.triple(), "armv5te-none-eabi");
        assert_eq!(cfg.target.profile, Some(Profiles::Release));
        assert_eq!(cfg.target.start_address, Some(0x1000));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_config("[log]\nverbosity = 3\n").is_err());
        assert!(parse_config("[qemu]\nmachine = \"virt\"\n").is_err());
    }

    #[test]
    fn invalid_level() {
        let cfg = parse_config("[log]\nlevel = \"loud\"\n").unwrap();
        assert!(cfg.log.level_filter().is_err());
    }

    #[test]
    fn missing_explicit_config() {
        let path = Some(PathBuf::from("/this/config/does/not/exist.toml"));
        assert!(read_config(&path).is_err());
    }
}
