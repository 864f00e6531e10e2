//! Configuration module
//!
//! Environment-driven configuration for the service: HTTP listener, document
//! store backend and pool, and the ingestion limits handed to the validators.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const IDLE_TIMEOUT_SECS: u64 = 600;
const MAX_LIFETIME_SECS: u64 = 1800;
const SPRITE_MAX_BYTES: usize = 10 * 1024 * 1024;
const AUDIO_MAX_BYTES: usize = 50 * 1024 * 1024;
const SCORE_NAME_PATTERN: &str = "^[A-Za-z0-9_]+$";
const SCORE_MIN: i64 = 0;
const SCORE_MAX: i64 = 10_000;
const MAX_BATCH_ITEMS: usize = 100;

/// Document store backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Limits applied by the per-kind validators.
///
/// None of these values is a protocol constant; every one can be overridden
/// from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestLimits {
    pub sprite_max_bytes: usize,
    pub audio_max_bytes: usize,
    pub score_name_pattern: String,
    pub score_min: i64,
    pub score_max: i64,
    pub max_batch_items: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            sprite_max_bytes: SPRITE_MAX_BYTES,
            audio_max_bytes: AUDIO_MAX_BYTES,
            score_name_pattern: SCORE_NAME_PATTERN.to_string(),
            score_min: SCORE_MIN,
            score_max: SCORE_MAX,
            max_batch_items: MAX_BATCH_ITEMS,
        }
    }
}

impl IngestLimits {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.sprite_max_bytes == 0 || self.audio_max_bytes == 0 {
            return Err(anyhow::anyhow!(
                "SPRITE_MAX_BYTES and AUDIO_MAX_BYTES must be greater than 0"
            ));
        }

        if self.score_min > self.score_max {
            return Err(anyhow::anyhow!(
                "SCORE_MIN ({}) cannot exceed SCORE_MAX ({})",
                self.score_min,
                self.score_max
            ));
        }

        if self.max_batch_items == 0 {
            return Err(anyhow::anyhow!("MAX_BATCH_ITEMS must be greater than 0"));
        }

        regex::Regex::new(&self.score_name_pattern).map_err(|e| {
            anyhow::anyhow!(
                "SCORE_NAME_PATTERN is not a valid regular expression: {}",
                e
            )
        })?;

        Ok(())
    }
}

/// Service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub db_idle_timeout_seconds: u64,
    pub db_max_lifetime_seconds: u64,
    pub limits: IngestLimits,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_service().environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().environment
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.as_service().store_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_service().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().db_timeout_seconds
    }

    pub fn db_idle_timeout_seconds(&self) -> u64 {
        self.as_service().db_idle_timeout_seconds
    }

    pub fn db_max_lifetime_seconds(&self) -> u64 {
        self.as_service().db_max_lifetime_seconds
    }

    pub fn limits(&self) -> &IngestLimits {
        &self.as_service().limits
    }

    /// Largest request body the HTTP layer should accept: one full batch of the largest binary kind.
    pub fn max_request_body_bytes(&self) -> usize {
        let limits = self.limits();
        limits
            .sprite_max_bytes
            .max(limits.audio_max_bytes)
            .saturating_mul(limits.max_batch_items)
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse::<StoreBackend>()?,
            Err(_) => StoreBackend::Postgres,
        };

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let limits = IngestLimits {
            sprite_max_bytes: env_or("SPRITE_MAX_BYTES", SPRITE_MAX_BYTES),
            audio_max_bytes: env_or("AUDIO_MAX_BYTES", AUDIO_MAX_BYTES),
            score_name_pattern: env::var("SCORE_NAME_PATTERN")
                .unwrap_or_else(|_| SCORE_NAME_PATTERN.to_string()),
            score_min: env_or("SCORE_MIN", SCORE_MIN),
            score_max: env_or("SCORE_MAX", SCORE_MAX),
            max_batch_items: env_or("MAX_BATCH_ITEMS", MAX_BATCH_ITEMS),
        };

        Ok(ServiceConfig {
            server_port,
            cors_origins,
            environment,
            store_backend,
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_or("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            db_idle_timeout_seconds: env_or("DB_IDLE_TIMEOUT_SECONDS", IDLE_TIMEOUT_SECS),
            db_max_lifetime_seconds: env_or("DB_MAX_LIFETIME_SECONDS", MAX_LIFETIME_SECS),
            limits,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.store_backend == StoreBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when STORE_BACKEND=postgres"
                    ))
                }
                Some(url) if !url.starts_with("postgres://") && !url.starts_with("postgresql://") => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ))
                }
                Some(_) => {}
            }

            if self.db_max_connections == 0 {
                return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
            }

            if self.db_timeout_seconds == 0 {
                return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
            }

            if self.db_idle_timeout_seconds > self.db_max_lifetime_seconds {
                return Err(anyhow::anyhow!(
                    "DB_IDLE_TIMEOUT_SECONDS ({}) cannot exceed DB_MAX_LIFETIME_SECONDS ({})",
                    self.db_idle_timeout_seconds,
                    self.db_max_lifetime_seconds
                ));
            }
        }

        if is_production_name(&self.environment) && self.store_backend == StoreBackend::Memory {
            return Err(anyhow::anyhow!(
                "STORE_BACKEND=memory is not allowed in production"
            ));
        }

        self.limits.validate()
    }
}
