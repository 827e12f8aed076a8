use tracing::{debug, info};

use crate::domain::types::{Location, Order};
use crate::distance::haversine::haversine_distance;

/// Row-major great-circle distances between the depot and every order.
///
/// Node 0 is the depot; order `i` is node `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<f64>,
}

pub const DEPOT_NODE: usize = 0;

impl DistanceMatrix {
    pub fn haversine(depot: &Location, orders: &[Order]) -> Self {
        let points: Vec<&Location> = std::iter::once(depot)
            .chain(orders.iter().map(|o| &o.location))
            .collect();
        let size = points.len();

        info!("Creating {}x{} haversine distance matrix", size, size);

        let mut distances = vec![0.0; size * size];
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate().skip(i + 1) {
                let d = haversine_distance(from, to);
                distances[i * size + j] = d;
                distances[j * size + i] = d;
            }
        }

        Self { size, distances }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn between(&self, from_node: usize, to_node: usize) -> f64 {
        self.distances[from_node * self.size + to_node]
    }

    /// Node of the order at `order_index` in the problem's order table.
    pub fn order_node(order_index: usize) -> usize {
        order_index + 1
    }
}

// Print distance matrix for debugging
pub fn print_dist_matrix(dm: &DistanceMatrix) {
    debug!("Distance matrix:");
    for row in dm.distances.chunks(dm.size().max(1)) {
        debug!("{:?}", row);
    }
}
