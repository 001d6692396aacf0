use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options for the bookmarks service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP_*` environment variables, in that order of precedence.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_version")]
    pub app_version: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// SQLite database path. Empty or missing selects the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Allows falling back to the in-memory store when the database is
    /// unavailable at startup.
    #[serde(default)]
    pub debug: bool,
}

fn default_app_name() -> String {
    "Bookmarks API".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            address: default_address(),
            port: default_port(),
            database_url: None,
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Builds the layered configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Configured database path, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = ServerConfig {
            database_url: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(config.database_url(), None);

        let config = ServerConfig {
            database_url: Some("bookmarks.db".into()),
            ..Default::default()
        };
        assert_eq!(config.database_url(), Some("bookmarks.db"));
    }

    #[test]
    fn yaml_source_fills_missing_keys_with_defaults() {
        let config: ServerConfig = Config::builder()
            .add_source(File::from_str("port: 9000\ndebug: true", config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.debug);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.database_url(), None);
    }
}
