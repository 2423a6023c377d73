//! Configuration management
//!
//! Loads and saves the s3lens configuration file, which holds output
//! defaults and the named storage endpoints the CLI can analyse. The
//! file is TOML at ~/.config/s3lens/config.toml; the SL_CONFIG_DIR
//! environment variable overrides the directory for tests and scripts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

const DEFAULT_OUTPUT: &str = "human";
const DEFAULT_COLOR: &str = "auto";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Configured storage endpoints
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,

    /// Show progress spinners
    #[serde(default = "default_true")]
    pub progress: bool,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            progress: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            endpoints: Vec::new(),
        }
    }
}

/// A named S3-compatible storage endpoint with its credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Unique name for this endpoint
    pub name: String,

    /// Endpoint URL
    pub url: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Region
    #[serde(default = "default_region")]
    pub region: String,

    /// Use path-style bucket addressing (required by most self-hosted
    /// backends)
    #[serde(default = "default_true")]
    pub path_style: bool,
}

impl Endpoint {
    /// Create a new endpoint with default region and path-style lookup
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: default_region(),
            path_style: true,
        }
    }

    /// Validate the endpoint definition.
    ///
    /// The URL must parse and use an http or https scheme; name and
    /// access key must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config("Endpoint name cannot be empty".into()));
        }
        if self.access_key.is_empty() {
            return Err(Error::Config("Access key cannot be empty".into()));
        }

        let url = url::Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "Endpoint URL must be http or https, got '{other}'"
            ))),
        }
    }
}

/// Handles loading and saving the configuration file and looking up
/// endpoints within it.
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with the default config path.
    ///
    /// SL_CONFIG_DIR takes precedence over the platform config dir.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os("SL_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3lens"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// A missing file yields the default configuration. A file written
    /// by a newer s3lens is rejected rather than silently misread.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3lens.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates parent directories if needed and restricts the file to
    /// owner read/write, since it carries credentials.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }

    /// List all configured endpoints
    pub fn endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.load()?.endpoints)
    }

    /// Get an endpoint by name
    pub fn endpoint(&self, name: &str) -> Result<Endpoint> {
        self.load()?
            .endpoints
            .into_iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::EndpointNotFound(name.to_string()))
    }

    /// Add or replace an endpoint
    pub fn set_endpoint(&self, endpoint: Endpoint) -> Result<()> {
        endpoint.validate()?;

        let mut config = self.load()?;
        config.endpoints.retain(|e| e.name != endpoint.name);
        config.endpoints.push(endpoint);
        self.save(&config)
    }

    /// Remove an endpoint by name
    pub fn remove_endpoint(&self, name: &str) -> Result<()> {
        let mut config = self.load()?;
        let original_len = config.endpoints.len();

        config.endpoints.retain(|e| e.name != name);
        if config.endpoints.len() == original_len {
            return Err(Error::EndpointNotFound(name.to_string()));
        }

        self.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        (ConfigManager::with_path(config_path), temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.color, "auto");
        assert!(config.defaults.progress);
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_set_and_get_endpoint() {
        let (manager, _temp_dir) = temp_config_manager();

        let endpoint = Endpoint::new("minio", "http://localhost:9000", "minioadmin", "minioadmin");
        manager.set_endpoint(endpoint).unwrap();

        let loaded = manager.endpoint("minio").unwrap();
        assert_eq!(loaded.url, "http://localhost:9000");
        assert_eq!(loaded.region, "us-east-1");
        assert!(loaded.path_style);
    }

    #[test]
    fn test_set_endpoint_replaces_existing() {
        let (manager, _temp_dir) = temp_config_manager();

        manager
            .set_endpoint(Endpoint::new("e", "http://old:9000", "a", "b"))
            .unwrap();
        manager
            .set_endpoint(Endpoint::new("e", "http://new:9000", "c", "d"))
            .unwrap();

        let endpoints = manager.endpoints().unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].url, "http://new:9000");
    }

    #[test]
    fn test_remove_endpoint() {
        let (manager, _temp_dir) = temp_config_manager();

        manager
            .set_endpoint(Endpoint::new("e", "http://localhost:9000", "a", "b"))
            .unwrap();
        manager.remove_endpoint("e").unwrap();
        assert!(manager.endpoints().unwrap().is_empty());

        let result = manager.remove_endpoint("e");
        assert!(matches!(result, Err(Error::EndpointNotFound(_))));
    }

    #[test]
    fn test_endpoint_not_found() {
        let (manager, _temp_dir) = temp_config_manager();
        let result = manager.endpoint("nope");
        assert!(matches!(result, Err(Error::EndpointNotFound(_))));
    }

    #[test]
    fn test_endpoint_validation() {
        let valid = Endpoint::new("e", "https://s3.amazonaws.com", "key", "secret");
        assert!(valid.validate().is_ok());

        let bad_scheme = Endpoint::new("e", "ftp://host", "key", "secret");
        assert!(matches!(bad_scheme.validate(), Err(Error::Config(_))));

        let bad_url = Endpoint::new("e", "not a url", "key", "secret");
        assert!(matches!(bad_url.validate(), Err(Error::InvalidUrl(_))));

        let no_name = Endpoint::new("", "http://host", "key", "secret");
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }
}
