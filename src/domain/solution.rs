use serde::Serialize;

use crate::domain::types::{Assignment, Order, ProblemInstance, Route, RouteLoad, Vehicle};
use crate::evaluation::fitness::Score;

/// Deal orders onto vehicles by position modulo the vehicle count.
pub fn deal_round_robin(order_indices: &[usize], num_of_vehicles: usize) -> Assignment {
    let mut assignment = Assignment::empty(num_of_vehicles);
    if num_of_vehicles == 0 {
        return assignment;
    }
    for (position, &order) in order_indices.iter().enumerate() {
        assignment.routes[position % num_of_vehicles].orders.push(order);
    }
    assignment
}

pub fn route_load(route: &Route, orders: &[Order], vehicle: &Vehicle) -> RouteLoad {
    let (weight, volume) = route
        .orders
        .iter()
        .map(|&i| &orders[i])
        .fold((0.0, 0.0), |(w, v), order| {
            (w + order.weight, v + order.volume)
        });

    RouteLoad {
        weight,
        volume,
        capacity_weight: vehicle.capacity_weight,
        capacity_volume: vehicle.capacity_volume,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub vehicle_id: u64,
    pub order_ids: Vec<u64>,
    pub load_weight: f64,
    pub load_volume: f64,
    pub capacity_weight: f64,
    pub capacity_volume: f64,
    /// Load above capacity, zero when the route fits.
    pub excess_weight: f64,
    pub excess_volume: f64,
}

impl RouteSummary {
    pub fn is_overloaded(&self) -> bool {
        self.excess_weight > 0.0 || self.excess_volume > 0.0
    }
}

/// Assignment resolved to identifiers, for printing and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub cost: f64,
    pub total_distance: f64,
    pub total_time: f64,
    pub feasible: bool,
    pub routes: Vec<RouteSummary>,
}

impl Solution {
    pub fn new(assignment: &Assignment, score: &Score, instance: &ProblemInstance) -> Self {
        let routes: Vec<RouteSummary> = assignment
            .routes
            .iter()
            .zip(&instance.vehicles)
            .map(|(route, vehicle)| {
                let load = route_load(route, &instance.orders, vehicle);
                RouteSummary {
                    vehicle_id: vehicle.id,
                    order_ids: route
                        .orders
                        .iter()
                        .map(|&i| instance.orders[i].id)
                        .collect(),
                    load_weight: load.weight,
                    load_volume: load.volume,
                    capacity_weight: load.capacity_weight,
                    capacity_volume: load.capacity_volume,
                    excess_weight: load.excess_weight(),
                    excess_volume: load.excess_volume(),
                }
            })
            .collect();

        let feasible = !routes.iter().any(RouteSummary::is_overloaded);

        Self {
            cost: score.cost,
            total_distance: score.distance,
            total_time: score.time,
            feasible,
            routes,
        }
    }
}
