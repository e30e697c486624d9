//! Configuration model and resolution
//!
//! Each setting is resolved per field in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Only binaries resolve configuration. Libraries receive an already resolved
//! [`ProviderSettings`] and never read the environment or the filesystem.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "bkx";

pub const ENV_CATALOG_URL: &str = "BKX_CATALOG_URL";
pub const ENV_SEARCH_URL: &str = "BKX_SEARCH_URL";
pub const ENV_COVER_URL: &str = "BKX_COVER_URL";
pub const ENV_ENCYCLOPEDIA_URL: &str = "BKX_ENCYCLOPEDIA_URL";
pub const ENV_USER_AGENT: &str = "BKX_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "BKX_LOG_LEVEL";

/// Standard User-Agent for every outbound request.
///
/// The encyclopedia provider rejects anonymous clients, so this string must
/// identify the application.
pub fn get_user_agent() -> String {
    format!("BookExplorer/{} (book-explorer)", env!("CARGO_PKG_VERSION"))
}

/// Upstream provider endpoints and HTTP behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base for work, author and ratings records (`{base}{workId}.json`)
    pub catalog_base_url: String,
    /// Base for `/search.json`
    pub search_base_url: String,
    /// Base for constructed cover image URLs
    pub cover_base_url: String,
    /// Base for `/page/summary/{name}`
    pub encyclopedia_base_url: String,
    pub user_agent: String,
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Maximum number of search results requested
    pub search_limit: usize,
    /// Optional client-side limit per provider; `None` disables limiting
    pub requests_per_second: Option<u32>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://openlibrary.org".to_string(),
            search_base_url: "https://openlibrary.org".to_string(),
            cover_base_url: "https://covers.openlibrary.org".to_string(),
            encyclopedia_base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            user_agent: get_user_agent(),
            timeout_secs: 15,
            connect_timeout_secs: 5,
            search_limit: 10,
            requests_per_second: None,
        }
    }
}

impl ProviderSettings {
    /// Validate and normalize settings.
    ///
    /// Base URLs must be http(s) and lose any trailing slash, since upstream
    /// keys (`/works/OL1W`) already start with one.
    pub fn validated(mut self) -> Result<Self> {
        for (name, url) in [
            ("catalog_base_url", &mut self.catalog_base_url),
            ("search_base_url", &mut self.search_base_url),
            ("cover_base_url", &mut self.cover_base_url),
            ("encyclopedia_base_url", &mut self.encyclopedia_base_url),
        ] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
            *url = trimmed;
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("user_agent must not be empty".to_string()));
        }

        if self.search_limit == 0 {
            return Err(Error::Config("search_limit must be at least 1".to_string()));
        }

        if self.requests_per_second == Some(0) {
            return Err(Error::Config(
                "requests_per_second must be at least 1 when set".to_string(),
            ));
        }

        Ok(self)
    }
}

/// Caller-side search discipline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchUiSettings {
    /// Quiet period before a typed query is sent
    pub debounce_ms: u64,
}

impl Default for SearchUiSettings {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level (`RUST_LOG` still overrides)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// On-disk configuration file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub providers: ProviderSettings,
    pub search: SearchUiSettings,
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a TOML file. Missing or malformed files are errors here;
    /// see [`ConfigResolver`] for the tolerant path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Platform config file location (`~/.config/bkx/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub catalog_url: Option<String>,
    pub search_url: Option<String>,
    pub cover_url: Option<String>,
    pub encyclopedia_url: Option<String>,
    pub user_agent: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub providers: ProviderSettings,
    pub search: SearchUiSettings,
    pub logging: LoggingConfig,
}

/// Resolves configuration from CLI, environment, TOML and defaults
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// `explicit_path` comes from `--config`; when absent the platform
    /// default location is tried.
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    pub fn resolve(&self, cli: &CliOverrides) -> Result<ResolvedConfig> {
        let toml_config = self.load_toml()?;

        let mut providers = toml_config.providers;
        override_field(
            &mut providers.catalog_base_url,
            cli.catalog_url.as_deref(),
            ENV_CATALOG_URL,
        );
        override_field(
            &mut providers.search_base_url,
            cli.search_url.as_deref(),
            ENV_SEARCH_URL,
        );
        override_field(
            &mut providers.cover_base_url,
            cli.cover_url.as_deref(),
            ENV_COVER_URL,
        );
        override_field(
            &mut providers.encyclopedia_base_url,
            cli.encyclopedia_url.as_deref(),
            ENV_ENCYCLOPEDIA_URL,
        );
        override_field(
            &mut providers.user_agent,
            cli.user_agent.as_deref(),
            ENV_USER_AGENT,
        );

        let mut logging = toml_config.logging;
        override_field(&mut logging.level, cli.log_level.as_deref(), ENV_LOG_LEVEL);

        Ok(ResolvedConfig {
            providers: providers.validated()?,
            search: toml_config.search,
            logging,
        })
    }

    fn load_toml(&self) -> Result<TomlConfig> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
            return TomlConfig::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                TomlConfig::load(&path)
            }
            Some(path) => {
                debug!(
                    "No config file at {}, using compiled defaults",
                    path.display()
                );
                Ok(TomlConfig::default())
            }
            None => {
                warn!("Could not determine config directory, using compiled defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Apply CLI then ENV over the TOML/default value already in `field`
fn override_field(field: &mut String, cli: Option<&str>, env_var: &str) {
    if let Some(value) = cli.filter(|v| !v.trim().is_empty()) {
        *field = value.to_string();
        return;
    }

    if let Some(value) = std::env::var(env_var).ok().filter(|v| !v.trim().is_empty()) {
        debug!("{} taken from environment", env_var);
        *field = value;
    }
}
