use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "SEO_AGENT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_LIGHTHOUSE_BIN: &str = "lighthouse";
const DEFAULT_FULL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_REDUCED_TIMEOUT_SECS: u64 = 45;
const DEFAULT_HEURISTIC_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Per-tier probe budgets and tool location
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Lighthouse executable (resolved through PATH if not absolute)
    #[serde(default = "default_lighthouse_bin")]
    pub lighthouse_bin: String,
    /// Sub-timeout for the full lighthouse tier
    #[serde(default = "default_full_timeout")]
    pub full_timeout_secs: u64,
    /// Sub-timeout for the reduced lighthouse tier
    #[serde(default = "default_reduced_timeout")]
    pub reduced_timeout_secs: u64,
    /// Sub-timeout for the browser heuristic tier
    #[serde(default = "default_heuristic_timeout")]
    pub heuristic_timeout_secs: u64,
    /// Per-viewport navigation budget for screenshots
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,
}

fn default_lighthouse_bin() -> String {
    DEFAULT_LIGHTHOUSE_BIN.to_string()
}
fn default_full_timeout() -> u64 {
    DEFAULT_FULL_TIMEOUT_SECS
}
fn default_reduced_timeout() -> u64 {
    DEFAULT_REDUCED_TIMEOUT_SECS
}
fn default_heuristic_timeout() -> u64 {
    DEFAULT_HEURISTIC_TIMEOUT_SECS
}
fn default_navigation_timeout() -> u64 {
    DEFAULT_NAVIGATION_TIMEOUT_SECS
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            lighthouse_bin: default_lighthouse_bin(),
            full_timeout_secs: default_full_timeout(),
            reduced_timeout_secs: default_reduced_timeout(),
            heuristic_timeout_secs: default_heuristic_timeout(),
            navigation_timeout_secs: default_navigation_timeout(),
        }
    }
}

impl ProbeConfig {
    pub fn full_timeout(&self) -> Duration {
        Duration::from_secs(self.full_timeout_secs)
    }

    pub fn reduced_timeout(&self) -> Duration {
        Duration::from_secs(self.reduced_timeout_secs)
    }

    pub fn heuristic_timeout(&self) -> Duration {
        Duration::from_secs(self.heuristic_timeout_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub probe: Option<ProbeConfig>,
}

/// Application configuration, constructed once at startup and read-only after
#[derive(Debug, Clone)]
pub struct Config {
    pub probe: ProbeConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe: ProbeConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let probe = Self::load_config_file(&config_path)
            .and_then(|cf| cf.probe)
            .unwrap_or_default();

        Self { probe, port, host }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_defaults() {
        let probe = ProbeConfig::default();
        assert_eq!(probe.full_timeout(), Duration::from_secs(60));
        assert_eq!(probe.reduced_timeout(), Duration::from_secs(45));
        assert_eq!(probe.heuristic_timeout(), Duration::from_secs(30));
        assert_eq!(probe.lighthouse_bin, "lighthouse");
    }

    #[test]
    fn config_file_partial_probe_section() {
        let cf: ConfigFile = serde_yaml::from_str("probe:\n  full_timeout_secs: 10\n").unwrap();
        let probe = cf.probe.unwrap();
        assert_eq!(probe.full_timeout_secs, 10);
        assert_eq!(probe.reduced_timeout_secs, DEFAULT_REDUCED_TIMEOUT_SECS);
    }
}
