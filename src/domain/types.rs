use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub weight: f64,
    pub volume: f64,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub capacity_weight: f64,
    pub capacity_volume: f64,
}

/// Orders visited by one vehicle, as indices into [`ProblemInstance::orders`].
/// The depot is implicit at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub orders: Vec<usize>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// One route per vehicle; `routes[i]` is driven by `vehicles[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub routes: Vec<Route>,
}

impl Assignment {
    pub fn empty(num_of_vehicles: usize) -> Self {
        Self {
            routes: vec![Route::default(); num_of_vehicles],
        }
    }

    pub fn order_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }
}

/// Summed demand of a route next to the capacity of its vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLoad {
    pub weight: f64,
    pub volume: f64,
    pub capacity_weight: f64,
    pub capacity_volume: f64,
}

impl RouteLoad {
    pub fn fits(&self) -> bool {
        self.weight <= self.capacity_weight && self.volume <= self.capacity_volume
    }

    pub fn excess_weight(&self) -> f64 {
        (self.weight - self.capacity_weight).max(0.0)
    }

    pub fn excess_volume(&self) -> f64 {
        (self.volume - self.capacity_volume).max(0.0)
    }
}

/// Validated problem data. Built through [`crate::setup::init::setup`].
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
    pub depot: Location,
    pub distance_matrix: DistanceMatrix,
}

impl ProblemInstance {
    pub fn num_of_vehicles(&self) -> usize {
        self.vehicles.len()
    }
}
