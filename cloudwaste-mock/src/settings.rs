use std::time::Duration;

use cloudwaste_api::models::TruckId;
use cloudwaste_client::Result;
use cloudwaste_client::settings::layered_config;
use serde::{Deserialize, Serialize};

const DEFAULTS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/mock.toml"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub bin_count: usize,
    pub bin_interval_secs: u64,
    pub truck_ids: Vec<TruckId>,
    pub truck_interval_secs: u64,
}

impl Simulation {
    pub fn bin_interval(&self) -> Duration {
        Duration::from_secs(self.bin_interval_secs.max(1))
    }

    pub fn truck_interval(&self) -> Duration {
        Duration::from_secs(self.truck_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    pub simulation: Simulation,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Ok(layered_config("mock", DEFAULTS)?.try_deserialize()?)
    }
}
