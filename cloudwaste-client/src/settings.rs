use std::env;
use std::time::Duration;

use cloudwaste_api::models::Id;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULTS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/client.toml"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    /// Server root, e.g. `http://localhost:3000`; request paths add `/api/...`
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub poll_interval_secs: u64,
    /// Driver recorded on collections confirmed from this dashboard
    pub driver_id: Id,
}

impl Dashboard {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    pub dashboard: Dashboard,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Ok(layered_config("client", DEFAULTS)?.try_deserialize()?)
    }
}

/// Embedded `defaults`, then `configs/<name>.<RUN_MODE>.toml` when present,
/// then `CLOUDWASTE_<SECTION>_<KEY>` variables such as `CLOUDWASTE_API_URL`.
pub fn layered_config(name: &str, defaults: &str) -> Result<Config> {
    let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

    Ok(Config::builder()
        .add_source(File::from_str(defaults, FileFormat::Toml))
        .add_source(File::with_name(&format!("configs/{name}.{run_mode}")).required(false))
        .add_source(Environment::with_prefix("CLOUDWASTE").separator("_"))
        .build()?)
}
