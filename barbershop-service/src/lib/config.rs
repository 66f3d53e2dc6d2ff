use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

/// Argon2 work factor; unset fields keep the library defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PasswordConfig {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

impl PasswordConfig {
    pub fn hashing_cost(&self) -> auth::HashingCost {
        let defaults = auth::HashingCost::default();
        auth::HashingCost {
            memory_kib: self.memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            parallelism: self.parallelism.unwrap_or(defaults.parallelism),
        }
    }
}

impl Config {
    /// HS256 keys shorter than the hash output are rejected.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Mode assumed when `RUN_MODE` is unset. It has no config file, so the
    /// signing secret must come from the environment.
    pub const DEFAULT_RUN_MODE: &'static str = "production";

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// There is no built-in signing secret: loading fails unless one is
    /// supplied by a file or the environment. The development secret is only
    /// read with `RUN_MODE=development`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(env::vars().collect())
    }

    /// Same as [`Config::load`], reading variables from `vars` instead of the
    /// process environment.
    pub fn load_from(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .map(|mode| mode.trim().to_string())
            .filter(|mode| !mode.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_RUN_MODE.to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").source(Some(vars)))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < Self::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                Self::MIN_SECRET_BYTES
            )));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/barbershop".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_strong_secret() {
        assert!(config(&"k".repeat(32), 24).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_or_missing_secret() {
        assert!(config("", 24).validate().is_err());
        assert!(config("short-secret", 24).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiration() {
        assert!(config(&"k".repeat(32), 0).validate().is_err());
        assert!(config(&"k".repeat(32), -1).validate().is_err());
    }

    const OPERATOR_SECRET: &str = "operator-supplied-production-secret-0123456789";

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_load_reads_secret_from_environment() {
        let config = Config::load_from(vars(&[("JWT__SECRET", OPERATOR_SECRET)]))
            .expect("config should load");

        assert_eq!(config.jwt.secret, OPERATOR_SECRET);
        assert_eq!(config.jwt.expiration_hours, 24);
    }

    #[test]
    fn test_load_environment_overrides_files() {
        let config = Config::load_from(vars(&[
            ("RUN_MODE", "development"),
            ("JWT__SECRET", OPERATOR_SECRET),
            ("DATABASE__URL", "postgres://db.internal/barbershop"),
            ("DATABASE__MAX_CONNECTIONS", "12"),
        ]))
        .expect("config should load");

        assert_eq!(config.jwt.secret, OPERATOR_SECRET);
        assert_eq!(config.database.url, "postgres://db.internal/barbershop");
        assert_eq!(config.database.max_connections, 12);
    }

    #[test]
    fn test_load_without_run_mode_requires_secret() {
        assert!(Config::load_from(vars(&[])).is_err());
        assert!(Config::load_from(vars(&[("RUN_MODE", "")])).is_err());
        assert!(Config::load_from(vars(&[("RUN_MODE", "production")])).is_err());
    }

    #[test]
    fn test_load_development_mode_is_opt_in() {
        let config = Config::load_from(vars(&[("RUN_MODE", "development")]))
            .expect("config should load");

        assert!(config.jwt.secret.len() >= Config::MIN_SECRET_BYTES);
    }

    #[test]
    fn test_load_production_mode_with_secret() {
        let config = Config::load_from(vars(&[
            ("RUN_MODE", "production"),
            ("JWT__SECRET", OPERATOR_SECRET),
        ]))
        .expect("config should load");

        assert_eq!(config.jwt.secret, OPERATOR_SECRET);
    }

    #[test]
    fn test_hashing_cost_overrides() {
        let password = PasswordConfig {
            memory_kib: Some(1024),
            iterations: None,
            parallelism: None,
        };
        let cost = password.hashing_cost();

        assert_eq!(cost.memory_kib, 1024);
        assert_eq!(cost.iterations, auth::HashingCost::default().iterations);
    }
}
