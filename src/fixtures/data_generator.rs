use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::constant::{DEPOT_LAT, DEPOT_LNG};
use crate::domain::types::{Location, Order, ProblemInstance, Vehicle};
use crate::error::{Result, VrpError};
use crate::setup::init::setup;
use crate::setup::init_types::OrderRecord;

/// Reads orders from a CSV file with header `id,weight,volume,lat,lng`.
pub fn load_orders_csv(path: impl AsRef<Path>) -> Result<Vec<Order>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VrpError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let orders = parse_orders_csv(file)?;
    info!("Loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

pub fn parse_orders_csv<R: Read>(reader: R) -> Result<Vec<Order>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut orders = Vec::new();
    for (row, record) in reader.deserialize::<OrderRecord>().enumerate() {
        // Row numbers count the header as line 1.
        let record = record.map_err(|e| {
            VrpError::invalid_input(format!("orders csv line {}", row + 2), e.to_string())
        })?;
        orders.push(Order::from(record));
    }
    Ok(orders)
}

/// Builds a reproducible instance with orders scattered within about half a
/// degree of the default depot. Demand fills 80% of the fleet capacity.
pub fn generate_random_instance(
    num_orders: usize,
    num_vehicles: usize,
    seed: u64,
) -> Result<ProblemInstance> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let depot = Location::new(DEPOT_LAT, DEPOT_LNG);

    let orders: Vec<Order> = (0..num_orders)
        .map(|i| Order {
            id: i as u64 + 1,
            weight: rng.gen_range(1.0..20.0),
            volume: rng.gen_range(1.0..50.0),
            location: Location::new(
                DEPOT_LAT + rng.gen_range(-0.5..0.5),
                DEPOT_LNG + rng.gen_range(-0.5..0.5),
            ),
        })
        .collect();

    let total_weight: f64 = orders.iter().map(|o| o.weight).sum();
    let total_volume: f64 = orders.iter().map(|o| o.volume).sum();
    let usable_fleet = num_vehicles.max(1) as f64 * 0.8;

    // Every vehicle must still be able to carry the largest single order.
    let capacity_weight = (total_weight / usable_fleet).max(20.0);
    let capacity_volume = (total_volume / usable_fleet).max(50.0);

    let vehicles: Vec<Vehicle> = (0..num_vehicles)
        .map(|i| Vehicle {
            id: i as u64 + 1,
            capacity_weight,
            capacity_volume,
        })
        .collect();

    info!(
        "Generated {} orders (weight {:.1}, volume {:.1}) for {} vehicles",
        num_orders, total_weight, total_volume, num_vehicles
    );

    setup(vehicles, orders, depot)
}
