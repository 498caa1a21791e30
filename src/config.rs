use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use rollcall_attendance::{ActivityPolicy, DEFAULT_ACTIVITY_THRESHOLD};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub activity: ActivityPolicy,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_ms: u64,
}

/// Shared secret and claims expected from the upstream identity provider.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ROLLCALL__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.request_timeout_secs", 10)?
            .set_default("database.url", "sqlite:rollcall.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("database.busy_timeout_ms", 5000)?
            .set_default("identity.issuer", "rollcall-auth")?
            .set_default("identity.audience", "rollcall")?
            .set_default("activity.threshold", i64::from(DEFAULT_ACTIVITY_THRESHOLD))?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ROLLCALL")
                .separator("__")
                .try_parsing(true),
        );

        // Unprefixed names used by most deployment tooling
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(secret) = env::var("IDENTITY_SECRET") {
            builder = builder.set_override("identity.secret", secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.identity.secret.len() < 32 {
            return Err("Identity secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.database.acquire_timeout_secs == 0 || self.database.busy_timeout_ms == 0 {
            return Err("Database timeouts must be greater than 0".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.server.request_timeout_secs == 0 {
            return Err("Server request_timeout_secs must be greater than 0".to_string());
        }
        if self.activity.threshold == 0 {
            return Err("Activity threshold must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                request_timeout_secs: 10,
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
                acquire_timeout_secs: 5,
                busy_timeout_ms: 5000,
            },
            identity: IdentityConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_string(),
                issuer: "rollcall-auth".to_string(),
                audience: "rollcall".to_string(),
            },
            activity: ActivityPolicy::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = valid_config();
        config.identity.secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeouts() {
        let mut config = valid_config();
        config.database.busy_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_threshold() {
        let mut config = valid_config();
        config.activity = ActivityPolicy::new(0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("rollcall.toml");
        std::fs::write(
            &path,
            r#"
[identity]
secret = "file_secret_key_minimum_32_characters_long"

[activity]
threshold = 3
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_string_lossy().into_owned())).unwrap();

        assert_eq!(config.activity.threshold, 3);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.identity.audience, "rollcall");
        assert!(config.validate().is_ok());
    }
}
