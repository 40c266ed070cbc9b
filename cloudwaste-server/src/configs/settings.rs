use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

const DEFAULTS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/server.toml"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
}

impl Settings {
    /// Embedded defaults, then `configs/server.<RUN_MODE>.toml` when present,
    /// then `CLOUDWASTE__<SECTION>__<KEY>` variables, then `PORT` and `DATABASE_URL`.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let config = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::with_name(&format!("configs/server.{run_mode}")).required(false))
            .add_source(Environment::with_prefix("CLOUDWASTE").prefix_separator("__").separator("__"))
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;

        if let Some(migrate) = &settings.database.migration_path {
            if Path::new(migrate).is_dir() {
                let migrate_path = normalize_path(migrate)
                    .map_err(|e| ConfigError::Message(e.to_string()))?
                    .to_string_lossy()
                    .to_string();

                settings.database.migration_path = Some(migrate_path);
            } else {
                tracing::warn!("migration path {} not found, skipping migrations", migrate);
                settings.database.migration_path = None;
            }
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_overrides() {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .set_override("server.port", "8080")
            .unwrap()
            .set_override("database.url", "sqlite::memory:")
            .unwrap()
            .build()
            .unwrap();

        let settings = Settings::from_config(config).unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert!(!settings.database.clean_start);
    }

    #[test]
    fn test_missing_migration_directory_is_skipped() {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .set_override("database.migration_path", "no/such/migrations")
            .unwrap()
            .build()
            .unwrap();

        let settings = Settings::from_config(config).unwrap();

        assert!(settings.database.migration_path.is_none());
    }
}
