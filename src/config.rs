//! todocal configuration.
//!
//! Read from ~/.config/todocal/config.toml, then overridden by environment
//! variables such as `TODOCAL__SERVER__PORT=9000`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "TODOCAL";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub prioritizer: PrioritizerConfig,
    pub calendar: CalendarConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritizerConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for PrioritizerConfig {
    fn default() -> Self {
        PrioritizerConfig {
            url: todocal_server::prioritizer::DEFAULT_URL.to_string(),
            timeout_secs: todocal_server::prioritizer::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl PrioritizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub api_base: String,
    pub calendar_id: String,
    pub max_results: u32,
    pub timeout_secs: u64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        use todocal_provider_google::calendar::{
            DEFAULT_API_BASE, DEFAULT_CALENDAR_ID, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT,
        };

        CalendarConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl CalendarConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// OAuth client JSON downloaded from the Google Cloud console
    pub client_secret_path: String,
    /// Where the access/refresh token is kept between runs
    pub token_path: String,
    /// Open a browser for consent when no usable token exists
    pub interactive_consent: bool,
    /// Give up on the browser flow after this long
    pub consent_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        GoogleConfig {
            client_secret_path: default_file("client_secret.json"),
            token_path: default_file("token.json"),
            interactive_consent: true,
            consent_timeout_secs: todocal_provider_google::consent::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl GoogleConfig {
    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    pub fn client_secret_path(&self) -> PathBuf {
        expand(&self.client_secret_path)
    }

    pub fn token_path(&self) -> PathBuf {
        expand(&self.token_path)
    }
}

fn default_file(name: &str) -> String {
    match dirs::config_dir() {
        Some(dir) => dir.join("todocal").join(name).to_string_lossy().into_owned(),
        None => format!("~/.config/todocal/{}", name),
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Get the config file path (~/.config/todocal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("todocal")
        .join("config.toml"))
}

/// Load the config file (if any) and apply environment overrides.
pub fn load(path: &Path) -> Result<Config> {
    let settings = ::config::Config::builder()
        .add_source(
            ::config::File::from(path)
                .format(::config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid config in {}", path.display()))
}

/// Create a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }

    let defaults = Config::default();
    let contents = format!(
        "\
# todocal configuration

[server]
# host = \"{host}\"
# port = {port}

[prioritizer]
# url = \"{prioritizer_url}\"
# timeout_secs = {prioritizer_timeout}

[calendar]
# api_base = \"{api_base}\"
# calendar_id = \"{calendar_id}\"
# max_results = {max_results}
# timeout_secs = {calendar_timeout}

[google]
# client_secret_path = \"{client_secret}\"
# token_path = \"{token}\"
# interactive_consent = true
# consent_timeout_secs = {consent_timeout}
",
        host = defaults.server.host,
        port = defaults.server.port,
        prioritizer_url = defaults.prioritizer.url,
        prioritizer_timeout = defaults.prioritizer.timeout_secs,
        api_base = defaults.calendar.api_base,
        calendar_id = defaults.calendar.calendar_id,
        max_results = defaults.calendar.max_results,
        calendar_timeout = defaults.calendar.timeout_secs,
        client_secret = defaults.google.client_secret_path,
        token = defaults.google.token_path,
        consent_timeout = defaults.google.consent_timeout_secs,
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create config directory {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Could not write config file {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.prioritizer.url, "http://localhost:8001/prioritize");
        assert_eq!(cfg.prioritizer.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.calendar.calendar_id, "primary");
        assert_eq!(cfg.calendar.max_results, 20);
        assert!(cfg.google.interactive_consent);
        assert_eq!(cfg.google.consent_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn file_overrides_some_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[prioritizer]\nurl = \"http://scorer:9000/rank\"\n\n[google]\ninteractive_consent = false\n",
        )
        .unwrap();

        let cfg = load(&path).unwrap();

        assert_eq!(cfg.prioritizer.url, "http://scorer:9000/rank");
        assert_eq!(cfg.prioritizer.timeout_secs, 10);
        assert!(!cfg.google.interactive_consent);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn tilde_is_expanded() {
        let google = GoogleConfig {
            token_path: "~/tokens/token.json".to_string(),
            ..Default::default()
        };

        assert!(!google.token_path().starts_with("~"));
        assert!(google.token_path().ends_with("tokens/token.json"));
    }

    #[test]
    fn default_file_loads_back_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todocal").join("config.toml");

        create_default_config(&path).unwrap();
        let cfg = load(&path).unwrap();

        assert_eq!(cfg.server.port, 8000);
        assert!(create_default_config(&path).is_err());
    }
}
