use itertools::Itertools;
use serde::Serialize;

use crate::distance::matrix::{DistanceMatrix, DEPOT_NODE};
use crate::distance::travel_time;
use crate::domain::types::{Assignment, Route};

/// Weighted objective together with its raw components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Score {
    pub cost: f64,
    /// Kilometers.
    pub distance: f64,
    /// Hours.
    pub time: f64,
}

/// Scores every route as a depot -> orders -> depot tour.
///
/// `cost = weight_distance * distance + weight_time * time`; empty routes add
/// nothing.
pub fn score(
    assignment: &Assignment,
    dm: &DistanceMatrix,
    weight_distance: f64,
    weight_time: f64,
) -> Score {
    let mut total_distance = 0.0;
    let mut total_time = 0.0;

    for route in assignment.routes.iter().filter(|r| !r.is_empty()) {
        let distance = route_distance(route, dm);
        total_distance += distance;
        total_time += travel_time(distance);
    }

    Score {
        cost: weight_distance * total_distance + weight_time * total_time,
        distance: total_distance,
        time: total_time,
    }
}

/// Tour length of a single route in kilometers.
pub fn route_distance(route: &Route, dm: &DistanceMatrix) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    route_legs(route, dm).sum()
}

fn route_legs<'a>(route: &'a Route, dm: &'a DistanceMatrix) -> impl Iterator<Item = f64> + 'a {
    std::iter::once(DEPOT_NODE)
        .chain(route.orders.iter().map(|&i| DistanceMatrix::order_node(i)))
        .chain(std::iter::once(DEPOT_NODE))
        .tuple_windows()
        .map(|(from, to)| dm.between(from, to))
}
