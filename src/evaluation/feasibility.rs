use crate::domain::solution::route_load;
use crate::domain::types::{Assignment, Order, Vehicle};

/// `true` when every route fits the weight and volume capacity of its
/// vehicle. A single overloaded route rejects the whole assignment.
pub fn is_valid(assignment: &Assignment, orders: &[Order], vehicles: &[Vehicle]) -> bool {
    assignment.routes.len() == vehicles.len()
        && assignment
            .routes
            .iter()
            .zip(vehicles)
            .all(|(route, vehicle)| route_load(route, orders, vehicle).fits())
}
