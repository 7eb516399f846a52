// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

/// The name of the application.
pub const APP_NAME: &str = "schedcal";

const SCHEDCAL_CONFIG_ENV: &str = "SCHEDCAL_CONFIG";

/// Load the configuration from `--config`, `$SCHEDCAL_CONFIG`, or the user
/// config directory, in that order.
///
/// An explicitly given file must exist. Without one, a missing default file
/// yields the default configuration.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(SCHEDCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = match get_config_dir() {
            Ok(dir) => dir.join(format!("{APP_NAME}/config.toml")),
            Err(e) => {
                tracing::warn!("{e}, using default configuration");
                return Ok(Config::default());
            }
        };
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()
}

/// Configuration for the schedcal application.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default period the recurrences repeat across.
    pub period: PeriodConfig,

    /// Output preferences.
    pub output: OutputConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| format!("Failed to parse config: {e}").into())
    }
}

/// Default period bounds, in any format accepted by `--start` and `--end`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Start of the period
    pub start: Option<String>,

    /// End of the period
    pub end: Option<String>,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Wrap iCalendar events in a `VCALENDAR`.
    pub calendar: bool,

    /// Pretty-print JSCalendar output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            calendar: false,
            pretty: true,
        }
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    const FULL_CONFIG: &str = r#"
[period]
start = "2025-03-10"
end = "2025-06-10"

[output]
calendar = true
pretty = false
"#;

    #[test]
    fn parses_full_config() {
        let config: Config = FULL_CONFIG.parse().unwrap();
        assert_eq!(config.period.start.as_deref(), Some("2025-03-10"));
        assert_eq!(config.period.end.as_deref(), Some("2025-06-10"));
        assert!(config.output.calendar);
        assert!(!config.output.pretty);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.output.calendar);
        assert!(config.output.pretty);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = "[output]\ncalendar = true\n".parse().unwrap();
        assert_eq!(config.period, PeriodConfig::default());
        assert!(config.output.calendar);
        assert!(config.output.pretty);
    }

    #[test]
    fn rejects_malformed_config() {
        let err = "[period\nstart = 1".parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[period]\nstart = \"2025-01-01\"\n").unwrap();

        let env_path = temp_dir.path().join("env_config.toml");
        fs::write(&env_path, "[period]\nstart = \"2030-01-01\"\n").unwrap();

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::set_var(SCHEDCAL_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let config = parse_config(Some(config_path.clone())).await.unwrap();
            assert_eq!(config.period.start.as_deref(), Some("2025-01-01"));

            unsafe {
                std::env::remove_var(SCHEDCAL_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn env_var_overrides_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = temp_dir.path().join("env_config.toml");
        fs::write(&env_path, FULL_CONFIG).unwrap();

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::set_var(SCHEDCAL_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let config = parse_config(None).await.unwrap();
            assert!(config.output.calendar);

            unsafe {
                std::env::remove_var(SCHEDCAL_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let _guard = env_lock().lock().await;
        let err = parse_config(Some(missing)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn uses_default_location_when_no_cli_or_env() {
        let temp_dir = TempDir::new().unwrap();
        let default_config_dir = temp_dir.path().join(APP_NAME);
        fs::create_dir_all(&default_config_dir).unwrap();
        fs::write(default_config_dir.join("config.toml"), FULL_CONFIG).unwrap();

        let xdg_config_home = temp_dir.path().to_str().unwrap().to_string();
        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SCHEDCAL_CONFIG_ENV);
                std::env::set_var("XDG_CONFIG_HOME", xdg_config_home);
            }

            let config = parse_config(None).await.unwrap();
            assert_eq!(config.period.end.as_deref(), Some("2025-06-10"));

            unsafe {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn falls_back_to_defaults_when_nothing_found() {
        let temp_dir = TempDir::new().unwrap();
        let xdg_config_home = temp_dir.path().to_str().unwrap().to_string();
        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SCHEDCAL_CONFIG_ENV);
                std::env::set_var("XDG_CONFIG_HOME", xdg_config_home);
            }

            let config = parse_config(None).await.unwrap();
            assert_eq!(config, Config::default());

            unsafe {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }
}
