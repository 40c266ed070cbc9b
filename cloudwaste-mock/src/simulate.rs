use std::f64::consts::PI;

use cloudwaste_api::models::{BinId, SensorDataRequest, TruckId, TruckLocationRequest};
use rand::Rng;
use rand_distr::{Distribution, Normal};

pub const INITIAL_BATTERY: i32 = 85;
pub const MAX_FILL_LEVEL: i32 = 100;

/// Area the simulated fleet operates in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

pub const NLONGKAK: BoundingBox = BoundingBox {
    min_lat: 3.8600,
    max_lat: 3.8900,
    min_lng: 11.5050,
    max_lng: 11.5300,
};

impl BoundingBox {
    pub fn contains(&self, (lat, lng): (f64, f64)) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }

    pub fn random_point<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        (
            rng.random_range(self.min_lat..=self.max_lat),
            rng.random_range(self.min_lng..=self.max_lng),
        )
    }
}

/// `BIN-001` for index 0.
pub fn bin_label(index: usize) -> BinId {
    format!("BIN-{:03}", index + 1)
}

/// Ambient temperature in °C for a fraction of the local day, peaking
/// mid-afternoon around 30 and bottoming out before dawn around 18.
pub fn daily_temperature(day_fraction: f64) -> f64 {
    24.0 + 6.0 * ((day_fraction - 0.375) * 2.0 * PI).sin()
}

#[derive(Debug, Clone)]
pub struct SimulatedBin {
    pub id: BinId,
    pub fill_level: i32,
    pub battery: i32,
    pub position: (f64, f64),
}

impl SimulatedBin {
    pub fn new<R: Rng>(index: usize, area: &BoundingBox, rng: &mut R) -> Self {
        Self {
            id: bin_label(index),
            fill_level: rng.random_range(20..60),
            battery: INITIAL_BATTERY,
            position: area.random_point(rng),
        }
    }

    /// Produces the current reading, then advances fill level and battery for
    /// the next report.
    pub fn next_reading<R: Rng>(&mut self, day_fraction: f64, noise: &Normal<f64>, rng: &mut R) -> SensorDataRequest {
        let temperature = daily_temperature(day_fraction) + noise.sample(rng);

        let reading = SensorDataRequest {
            fill_level: self.fill_level,
            temperature: Some((temperature * 10.0).round() / 10.0),
            battery: Some(self.battery),
            lat: Some(self.position.0),
            lng: Some(self.position.1),
        };

        self.fill_level = (self.fill_level + rng.random_range(5..20)).min(MAX_FILL_LEVEL);
        if rng.random_bool(0.1) {
            self.battery = (self.battery - 1).max(0);
        }

        reading
    }
}

/// Truck following the random waypoint model.
#[derive(Debug, Clone)]
pub struct SimulatedTruck {
    pub id: TruckId,
    pub position: (f64, f64),
    waypoint: (f64, f64),
    /// Degrees travelled per tick on the current leg
    step: f64,
    pause_ticks: u32,
}

impl SimulatedTruck {
    pub fn new<R: Rng>(id: TruckId, area: &BoundingBox, rng: &mut R) -> Self {
        Self {
            id,
            position: area.random_point(rng),
            waypoint: area.random_point(rng),
            step: leg_step(rng),
            pause_ticks: 0,
        }
    }

    pub fn advance<R: Rng>(&mut self, area: &BoundingBox, rng: &mut R) -> TruckLocationRequest {
        if self.pause_ticks > 0 {
            self.pause_ticks -= 1;
        } else {
            let (lat, lng) = self.position;
            let (d_lat, d_lng) = (self.waypoint.0 - lat, self.waypoint.1 - lng);
            let distance = d_lat.hypot(d_lng);

            if distance <= self.step {
                self.position = self.waypoint;
                self.waypoint = area.random_point(rng);
                self.step = leg_step(rng);
                self.pause_ticks = 1;
            } else {
                let ratio = self.step / distance;
                self.position = (lat + d_lat * ratio, lng + d_lng * ratio);
            }
        }

        TruckLocationRequest {
            lat: self.position.0,
            lng: self.position.1,
            location_name: String::from("Nlongkak"),
        }
    }
}

// 10 to 30 metres per tick, about 5 to 15 m/s at the default interval.
fn leg_step<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(0.00009..0.00027)
}
