use serde::Deserialize;

use crate::config::ParameterOverrides;
use crate::domain::types::{Location, Order, Vehicle};

/// Input document: fleet, orders, depot and optional search parameters.
#[derive(Debug, Deserialize)]
pub struct ProblemDocument {
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,
    pub depot_location: Location,
    #[serde(default)]
    pub parameters: Option<ParameterOverrides>,
}

/// One row of an orders CSV: `id,weight,volume,lat,lng`.
#[derive(Debug, Deserialize)]
pub struct OrderRecord {
    pub id: u64,
    pub weight: f64,
    pub volume: f64,
    pub lat: f64,
    pub lng: f64,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order {
            id: record.id,
            weight: record.weight,
            volume: record.volume,
            location: Location::new(record.lat, record.lng),
        }
    }
}
