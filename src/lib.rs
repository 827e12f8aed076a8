//! Capacitated vehicle routing by simulated annealing.
//!
//! Orders are dealt onto a fixed fleet and the assignment is improved with
//! swap, relocate and 2-opt moves under per-vehicle weight and volume limits.
//! The objective mixes great-circle travel distance with travel time at a
//! constant average speed.

pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod setup;
pub mod solver;
pub mod utils;

pub use config::AnnealingConfig;
pub use domain::types::{Assignment, Location, Order, ProblemInstance, Route, Vehicle};
pub use error::{Result, VrpError};
pub use solver::annealing::{run, run_independent, run_with_cancel, AnnealingResult};

/// Validates the input, runs one search and returns the best assignment with
/// its cost.
pub fn solve(
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    depot: Location,
    config: &AnnealingConfig,
) -> Result<(Assignment, f64)> {
    config.validate()?;
    let instance = setup::init::setup(vehicles, orders, depot)?;
    let result = run(&instance, config)?;
    Ok((result.best, result.best_score.cost))
}
