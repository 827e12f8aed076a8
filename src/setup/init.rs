use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::ParameterOverrides;
use crate::distance::matrix::print_dist_matrix;
use crate::distance::DistanceMatrix;
use crate::domain::solution::deal_round_robin;
use crate::domain::types::{Assignment, Location, Order, ProblemInstance, Vehicle};
use crate::error::{Result, VrpError};
use crate::setup::init_types::ProblemDocument;

/// Validates the raw input and builds the problem instance.
///
/// Fails before any search starts on malformed values, duplicate ids, or
/// demand that cannot fit into the fleet.
pub fn setup(
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    depot: Location,
) -> Result<ProblemInstance> {
    info!(
        "Starting setup with {} vehicles, {} orders",
        vehicles.len(),
        orders.len()
    );

    validate_location("depot_location", &depot)?;
    validate_vehicles(&vehicles)?;
    validate_orders(&orders)?;
    check_fleet_capacity(&vehicles, &orders)?;

    let distance_matrix = DistanceMatrix::haversine(&depot, &orders);
    print_dist_matrix(&distance_matrix);

    info!("Setup completed successfully");

    Ok(ProblemInstance {
        vehicles,
        orders,
        depot,
        distance_matrix,
    })
}

/// Shuffles all orders and deals them round-robin over the vehicles.
/// The result is not checked for feasibility.
pub fn initial_solution<R: Rng + ?Sized>(instance: &ProblemInstance, rng: &mut R) -> Assignment {
    let mut order_indices: Vec<usize> = (0..instance.orders.len()).collect();
    order_indices.shuffle(rng);
    debug!("Initial order permutation: {:?}", order_indices);

    deal_round_robin(&order_indices, instance.num_of_vehicles())
}

impl ProblemDocument {
    pub fn into_instance(self) -> Result<(ProblemInstance, Option<ParameterOverrides>)> {
        let instance = setup(self.vehicles, self.orders, self.depot_location)?;
        Ok((instance, self.parameters))
    }
}

pub fn parse_problem_json(content: &str) -> Result<ProblemDocument> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_problem_json(path: impl AsRef<Path>) -> Result<ProblemDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| VrpError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Loaded problem document from {}", path.display());
    parse_problem_json(&content)
}

fn validate_location(field: &str, location: &Location) -> Result<()> {
    if !location.lat.is_finite() || !(-90.0..=90.0).contains(&location.lat) {
        return Err(VrpError::invalid_input(
            format!("{field}.lat"),
            format!("must be within [-90, 90], got {}", location.lat),
        ));
    }
    if !location.lng.is_finite() || !(-180.0..=180.0).contains(&location.lng) {
        return Err(VrpError::invalid_input(
            format!("{field}.lng"),
            format!("must be within [-180, 180], got {}", location.lng),
        ));
    }
    Ok(())
}

fn validate_amount(field: String, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(VrpError::invalid_input(
            field,
            format!("must be a non-negative finite number, got {value}"),
        ));
    }
    Ok(())
}

fn validate_vehicles(vehicles: &[Vehicle]) -> Result<()> {
    if vehicles.is_empty() {
        return Err(VrpError::invalid_input(
            "vehicles",
            "at least one vehicle is required",
        ));
    }

    let mut seen = HashSet::new();
    for (i, vehicle) in vehicles.iter().enumerate() {
        validate_amount(
            format!("vehicles[{i}].capacity_weight"),
            vehicle.capacity_weight,
        )?;
        validate_amount(
            format!("vehicles[{i}].capacity_volume"),
            vehicle.capacity_volume,
        )?;
        if !seen.insert(vehicle.id) {
            return Err(VrpError::invalid_input(
                format!("vehicles[{i}].id"),
                format!("duplicate vehicle id {}", vehicle.id),
            ));
        }
    }
    Ok(())
}

fn validate_orders(orders: &[Order]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, order) in orders.iter().enumerate() {
        validate_amount(format!("orders[{i}].weight"), order.weight)?;
        validate_amount(format!("orders[{i}].volume"), order.volume)?;
        validate_location(&format!("orders[{i}].location"), &order.location)?;
        if !seen.insert(order.id) {
            return Err(VrpError::invalid_input(
                format!("orders[{i}].id"),
                format!("duplicate order id {}", order.id),
            ));
        }
    }
    Ok(())
}

fn check_fleet_capacity(vehicles: &[Vehicle], orders: &[Order]) -> Result<()> {
    let total_weight: f64 = orders.iter().map(|o| o.weight).sum();
    let total_volume: f64 = orders.iter().map(|o| o.volume).sum();
    let fleet_weight: f64 = vehicles.iter().map(|v| v.capacity_weight).sum();
    let fleet_volume: f64 = vehicles.iter().map(|v| v.capacity_volume).sum();

    info!(
        "Total demand: weight {:.2} / {:.2}, volume {:.2} / {:.2}",
        total_weight, fleet_weight, total_volume, fleet_volume
    );

    if total_weight > fleet_weight {
        return Err(VrpError::InfeasibleInstance {
            resource: "total weight".into(),
            demand: total_weight,
            capacity: fleet_weight,
        });
    }
    if total_volume > fleet_volume {
        return Err(VrpError::InfeasibleInstance {
            resource: "total volume".into(),
            demand: total_volume,
            capacity: fleet_volume,
        });
    }

    let largest_weight = vehicles
        .iter()
        .map(|v| v.capacity_weight)
        .fold(0.0, f64::max);
    let largest_volume = vehicles
        .iter()
        .map(|v| v.capacity_volume)
        .fold(0.0, f64::max);
    for order in orders {
        if order.weight > largest_weight {
            return Err(VrpError::InfeasibleInstance {
                resource: format!("order {} weight", order.id),
                demand: order.weight,
                capacity: largest_weight,
            });
        }
        if order.volume > largest_volume {
            return Err(VrpError::InfeasibleInstance {
                resource: format!("order {} volume", order.id),
                demand: order.volume,
                capacity: largest_volume,
            });
        }
    }

    if total_weight > 0.9 * fleet_weight || total_volume > 0.9 * fleet_volume {
        warn!("Demand is above 90% of fleet capacity; feasible neighbours may be rare");
    }
    Ok(())
}
