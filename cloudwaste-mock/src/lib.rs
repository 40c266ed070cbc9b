use std::sync::Arc;

use cloudwaste_client::{ApiClient, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Normal;
use time::macros::offset;
use time::OffsetDateTime;
use tokio::time::interval;

use crate::settings::{Settings, Simulation};
use crate::simulate::{NLONGKAK, SimulatedBin, SimulatedTruck};

pub mod settings;
pub mod simulate;

/// Standard deviation of the sensor temperature noise, in °C.
const TEMPERATURE_NOISE: f64 = 0.8;

pub async fn run(settings: &Arc<Settings>) -> Result<()> {
    let client = Arc::new(ApiClient::new(&settings.api.url)?);

    tracing::info!(
        "simulating {} bins and {} trucks against {}",
        settings.simulation.bin_count,
        settings.simulation.truck_ids.len(),
        settings.api.url
    );

    let bins = tokio::spawn(simulate_bins(client.clone(), settings.simulation.clone()));
    let trucks = tokio::spawn(simulate_trucks(client, settings.simulation.clone()));

    shutdown_signal().await;

    bins.abort();
    trucks.abort();

    Ok(())
}

async fn simulate_bins(client: Arc<ApiClient>, simulation: Simulation) {
    let mut rng = StdRng::from_os_rng();
    let noise = match Normal::new(0.0, TEMPERATURE_NOISE) {
        Ok(noise) => noise,
        Err(e) => {
            tracing::error!("invalid temperature noise: {}", e);
            return;
        }
    };

    let mut bins: Vec<SimulatedBin> = (0..simulation.bin_count)
        .map(|index| SimulatedBin::new(index, &NLONGKAK, &mut rng))
        .collect();

    let mut ticker = interval(simulation.bin_interval());
    loop {
        ticker.tick().await;

        let day_fraction = local_day_fraction(OffsetDateTime::now_utc());
        let accepted = push_bin_round(&client, &mut bins, day_fraction, &noise, &mut rng).await;
        tracing::info!("{}/{} bin readings accepted", accepted, bins.len());
    }
}

async fn simulate_trucks(client: Arc<ApiClient>, simulation: Simulation) {
    let mut rng = StdRng::from_os_rng();
    let mut trucks: Vec<SimulatedTruck> = simulation
        .truck_ids
        .iter()
        .map(|id| SimulatedTruck::new(id.clone(), &NLONGKAK, &mut rng))
        .collect();

    let mut ticker = interval(simulation.truck_interval());
    loop {
        ticker.tick().await;
        push_truck_round(&client, &mut trucks, &mut rng).await;
    }
}

/// Sends one reading per bin and returns how many the server accepted.
/// Failures are logged and do not stop the round.
pub async fn push_bin_round(
    client: &ApiClient,
    bins: &mut [SimulatedBin],
    day_fraction: f64,
    noise: &Normal<f64>,
    rng: &mut StdRng,
) -> usize {
    let mut accepted = 0;

    for bin in bins.iter_mut() {
        let reading = bin.next_reading(day_fraction, noise, rng);

        match client.send_sensor_data(&bin.id, &reading).await {
            Ok(response) => {
                tracing::debug!("{} sent fill {}% ({})", bin.id, reading.fill_level, response.status);
                accepted += 1;
            }
            Err(e) => tracing::warn!("failed to push reading for {}: {}", bin.id, e),
        }
    }

    accepted
}

/// Moves every truck one tick and reports its position.
pub async fn push_truck_round(client: &ApiClient, trucks: &mut [SimulatedTruck], rng: &mut StdRng) -> usize {
    let mut accepted = 0;

    for truck in trucks.iter_mut() {
        let update = truck.advance(&NLONGKAK, rng);

        match client.update_truck_location(&truck.id, &update).await {
            Ok(_) => {
                tracing::trace!("{} at {:.5},{:.5}", truck.id, update.lat, update.lng);
                accepted += 1;
            }
            Err(e) => tracing::warn!("failed to push location for {}: {}", truck.id, e),
        }
    }

    accepted
}

/// Fraction of the day elapsed in Yaoundé (UTC+1).
pub fn local_day_fraction(now: OffsetDateTime) -> f64 {
    let (hour, minute, second) = now.to_offset(offset!(+1)).to_hms();
    let seconds = u32::from(hour) * 3600 + u32::from(minute) * 60 + u32::from(second);

    f64::from(seconds) / 86_400.0
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_local_day_fraction_uses_west_africa_time() {
        assert_eq!(local_day_fraction(datetime!(2026-10-16 23:00 UTC)), 0.0);
        assert_eq!(local_day_fraction(datetime!(2026-10-16 11:00 UTC)), 0.5);
    }
}
