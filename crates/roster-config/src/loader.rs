//! Configuration loader with layered sources.

use crate::AppConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use roster_core::RosterError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Plain variables honoured on top of every other source.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASS", "database.password"),
    ("DB_NAME", "database.name"),
    ("REDIS_HOST", "redis.host"),
    ("REDIS_PORT", "redis.port"),
];

/// Configuration loader with layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. Built-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/{ROSTER_ENVIRONMENT}.toml`
    /// 4. `config/local.toml`
    /// 5. Environment variables with `ROSTER__` prefix (`ROSTER__DATABASE__HOST`)
    /// 6. `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`, `DB_NAME`, `REDIS_HOST`, `REDIS_PORT`
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, RosterError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config = Self::load_config(config_dir.as_ref(), &process_env())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from `config_dir`, reading variables from `env`.
    fn load_config(config_dir: &str, env: &Map<String, String>) -> Result<AppConfig, RosterError> {
        let environment = env
            .get("ROSTER_ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        builder = apply_legacy_env(builder, env).map_err(config_error_to_roster_error)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_roster_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), RosterError> {
        if config.database.host.trim().is_empty() {
            return Err(RosterError::Configuration("Database host is required".to_string()));
        }

        if config.database.name.trim().is_empty() {
            return Err(RosterError::Configuration("Database name is required".to_string()));
        }

        if config.database.port == 0 || config.server.port == 0 {
            return Err(RosterError::Configuration("Ports must be non-zero".to_string()));
        }

        if config.database.max_connections == 0 {
            return Err(RosterError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if config.cache.ttl_secs == 0 {
            return Err(RosterError::Configuration("cache.ttl_secs must be positive".to_string()));
        }

        if config.app.environment == "production" && config.database.password == "postgres" {
            warn!("Using the default database password in production");
        }

        if !config.redis.enabled() {
            info!("REDIS_HOST not set; read-through cache disabled");
        }

        Ok(())
    }
}

fn process_env() -> Map<String, String> {
    std::env::vars().collect()
}

fn apply_legacy_env(
    mut builder: ConfigBuilder<DefaultState>,
    env: &Map<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in LEGACY_ENV_KEYS {
        if let Some(value) = env.get(*var).filter(|v| !v.is_empty()) {
            debug!("Applying {} to {}", var, key);
            builder = builder.set_override(*key, value.clone())?;
        }
    }
    Ok(builder)
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_files_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &Map::new()).unwrap();

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(!config.redis.enabled());
    }

    #[test]
    fn test_legacy_variables_override_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nhost = \"from-file\"\nname = \"filedb\"\n",
        )
        .unwrap();

        let vars = env(&[
            ("DB_HOST", "pg"),
            ("DB_USER", "app"),
            ("DB_PASS", "secret"),
            ("DB_NAME", "users"),
            ("REDIS_HOST", "redis"),
        ]);
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &vars).unwrap();

        assert_eq!(config.database.host, "pg");
        assert_eq!(config.database.user, "app");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.name, "users");
        assert_eq!(config.redis.url().as_deref(), Some("redis://redis:6379/0"));
    }

    #[test]
    fn test_environment_file_layers_over_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
        fs::write(dir.path().join("staging.toml"), "[cache]\nttl_secs = 60\n").unwrap();

        let vars = env(&[("ROSTER_ENVIRONMENT", "staging")]);
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &vars).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.ttl_secs, 60);
    }

    #[test]
    fn test_prefixed_variables() {
        let dir = tempfile::tempdir().unwrap();
        let vars = env(&[("ROSTER__SERVER__PORT", "7000")]);
        let config = ConfigLoader::load_config(dir.path().to_str().unwrap(), &vars).unwrap();

        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 0\n").unwrap();

        let err = ConfigLoader::load_config(dir.path().to_str().unwrap(), &Map::new()).unwrap_err();
        assert!(matches!(err, RosterError::Configuration(_)));
    }

    #[test]
    fn test_new_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 42\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(loader.config().cache.ttl_secs, 42);
        assert_eq!(loader.into_config().cache.ttl(), std::time::Duration::from_secs(42));
    }

    #[test]
    fn test_empty_database_name_is_rejected() {
        let mut config = AppConfig::default();
        config.database.name = String::new();
        assert!(ConfigLoader::validate_config(&config).is_err());
    }
}
