pub mod haversine;
pub mod matrix;

pub use haversine::{haversine_distance, travel_time};
pub use matrix::DistanceMatrix;
