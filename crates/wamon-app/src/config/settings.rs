//! Settings loading for wamon.toml
//!
//! Lookup order: `wamon.toml` in the working directory, then
//! `~/.config/wamon/config.toml`. Environment variables override file
//! values; CLI flags override both (applied by the binary).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use wamon_core::prelude::*;

const LOCAL_CONFIG: &str = "wamon.toml";
const USER_CONFIG_DIR: &str = "wamon";
const USER_CONFIG: &str = "config.toml";

pub const ENV_GATEWAY_URL: &str = "WAMON_GATEWAY_URL";
pub const ENV_API_KEY: &str = "WAMON_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub pairing: PairingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Base URL of the gateway
    pub base_url: String,
    /// Shared key sent as the `apikey` header
    pub api_key: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: "mude-me".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingSettings {
    /// Seconds between connection-state queries
    pub poll_interval_secs: u64,
    /// Poll ticks before a pairing session times out
    pub max_poll_ticks: u64,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            max_poll_ticks: 60,
        }
    }
}

impl Settings {
    /// Load settings from the first config file found, falling back to
    /// defaults, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::find_config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        settings.apply_env_from(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parse settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        let user = dirs::config_dir()?.join(USER_CONFIG_DIR).join(USER_CONFIG);
        user.is_file().then_some(user)
    }

    /// Apply environment overrides through a lookup function (injectable
    /// for tests).
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get(ENV_GATEWAY_URL) {
            self.gateway.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.gateway.api_key = key;
        }
    }

    /// Apply command-line overrides. Flags win over both the config file
    /// and the environment.
    pub fn apply_cli(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = base_url {
            self.gateway.base_url = url;
        }
        if let Some(key) = api_key {
            self.gateway.api_key = key;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.gateway.base_url, "http://localhost:8080");
        assert_eq!(settings.gateway.api_key, "mude-me");
        assert_eq!(settings.gateway.request_timeout_secs, 30);
        assert_eq!(settings.pairing.poll_interval_secs, 5);
        assert_eq!(settings.pairing.max_poll_ticks, 60);
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [gateway]
            base_url = "http://gateway.internal:9090"
            api_key = "secret"
            request_timeout_secs = 10

            [pairing]
            poll_interval_secs = 2
            max_poll_ticks = 10
            "#,
        );

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.gateway.base_url, "http://gateway.internal:9090");
        assert_eq!(settings.gateway.api_key, "secret");
        assert_eq!(settings.pairing.poll_interval_secs, 2);
        assert_eq!(settings.pairing.max_poll_ticks, 10);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config(
            r#"
            [gateway]
            api_key = "secret"
            "#,
        );

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.gateway.api_key, "secret");
        assert_eq!(settings.gateway.base_url, "http://localhost:8080");
        assert_eq!(settings.pairing.poll_interval_secs, 5);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let file = write_config("gateway = not toml");
        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut settings = Settings::default();
        settings.apply_env_from(|key| match key {
            ENV_GATEWAY_URL => Some("http://override:8080".to_string()),
            ENV_API_KEY => Some("env-key".to_string()),
            _ => None,
        });
        assert_eq!(settings.gateway.base_url, "http://override:8080");
        assert_eq!(settings.gateway.api_key, "env-key");
    }

    #[test]
    fn test_cli_flags_override_env_and_file() {
        let file = write_config(
            r#"
            [gateway]
            base_url = "http://file:8080"
            api_key = "file-key"
            "#,
        );
        let mut settings = Settings::load_from(file.path()).unwrap();
        settings.apply_env_from(|key| {
            (key == ENV_GATEWAY_URL).then(|| "http://env:8080".to_string())
        });
        assert_eq!(settings.gateway.base_url, "http://env:8080");

        settings.apply_cli(Some("http://cli:8080".to_string()), None);
        assert_eq!(settings.gateway.base_url, "http://cli:8080");
        // Absent flag leaves the file value in place
        assert_eq!(settings.gateway.api_key, "file-key");

        settings.apply_cli(None, Some("cli-key".to_string()));
        assert_eq!(settings.gateway.base_url, "http://cli:8080");
        assert_eq!(settings.gateway.api_key, "cli-key");
    }

    #[test]
    fn test_env_absent_keeps_values() {
        let mut settings = Settings::default();
        settings.apply_env_from(|_| None);
        assert_eq!(settings, Settings::default());
    }
}
