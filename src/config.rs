//! Dashboard configuration
//!
//! Built-in defaults, overridden by a `.env` file, the process environment
//! and finally the command line.

use std::path::PathBuf;

use crate::error::{DashboardError, Result};

/// Location of the incident table relative to the working directory.
pub const DEFAULT_DATA_PATH: &str =
    "Cybersecurity_Threats(2015-2024)/Global_Cybersecurity_Threats_2015-2024.csv";

/// Attack type selected when the dashboard opens.
pub const DEFAULT_ATTACK_TYPE: &str = "SQL Injection";

pub const ENV_DATA_PATH: &str = "THREAT_LENS_DATA";
pub const ENV_DEFAULT_ATTACK: &str = "THREAT_LENS_DEFAULT_ATTACK";
pub const ENV_DEBUG: &str = "THREAT_LENS_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Incident table to load at startup (`.csv`, `.json` or `.parquet`).
    pub data_path: PathBuf,
    /// Must be one of the attack types in the table.
    pub default_attack_type: String,
    /// Raise the default log level to `debug`.
    pub debug: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_attack_type: DEFAULT_ATTACK_TYPE.to_string(),
            debug: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `.env`, the environment and `std::env::args`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Build configuration from explicit CLI arguments (program name
    /// excluded) and an environment lookup.
    pub fn from_sources<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = env(ENV_DATA_PATH).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(attack) = env(ENV_DEFAULT_ATTACK).filter(|a| !a.trim().is_empty()) {
            config.default_attack_type = attack;
        }
        if let Some(flag) = env(ENV_DEBUG) {
            config.debug = parse_bool(ENV_DEBUG, &flag)?;
        }

        for arg in args {
            match arg.as_str() {
                "--debug" | "-d" => config.debug = true,
                other => {
                    return Err(DashboardError::config(format!(
                        "unrecognised argument '{other}' (usage: threat-lens [--debug])"
                    )))
                }
            }
        }

        Ok(config)
    }

    /// Default `env_logger` filter for this configuration.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(DashboardError::config(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = DashboardConfig::from_sources(args(&[]), lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.default_attack_type, "SQL Injection");
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = DashboardConfig::from_sources(
            args(&[]),
            lookup(&[
                (ENV_DATA_PATH, "data/incidents.parquet"),
                (ENV_DEFAULT_ATTACK, "Phishing"),
                (ENV_DEBUG, "yes"),
            ]),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/incidents.parquet"));
        assert_eq!(config.default_attack_type, "Phishing");
        assert!(config.debug);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn debug_flag_wins_over_environment() {
        let config =
            DashboardConfig::from_sources(args(&["-d"]), lookup(&[(ENV_DEBUG, "0")])).unwrap();
        assert!(config.debug);
    }

    #[test]
    fn bad_inputs_are_config_errors() {
        let err = DashboardConfig::from_sources(args(&["--port"]), lookup(&[])).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));

        let err =
            DashboardConfig::from_sources(args(&[]), lookup(&[(ENV_DEBUG, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_DEBUG));
    }
}
