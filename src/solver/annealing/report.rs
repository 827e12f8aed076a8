use std::path::Path;

use csv::Writer;
use tracing::{debug, info, warn};

use crate::domain::solution::Solution;
use crate::error::{Result, VrpError};

use super::moves::MoveKind;
use super::search::AnnealingResult;

pub fn print_solution(solution: &Solution) {
    if solution.feasible {
        info!(
            "Distance: {:.2} km, Time: {:.2} h, Cost: {:.4}",
            solution.total_distance, solution.total_time, solution.cost
        );
    } else {
        warn!(
            "Distance: {:.2} km, Time: {:.2} h, Cost: {:.4} (over capacity)",
            solution.total_distance, solution.total_time, solution.cost
        );
    }

    for route in &solution.routes {
        debug!(
            "vehicle {}: weight {:.2} / {:.2}, volume {:.2} / {:.2} : {:?}",
            route.vehicle_id,
            route.load_weight,
            route.capacity_weight,
            route.load_volume,
            route.capacity_volume,
            route.order_ids
        );
        if route.is_overloaded() {
            warn!(
                "vehicle {} over capacity by {:.2} weight, {:.2} volume",
                route.vehicle_id, route.excess_weight, route.excess_volume
            );
        }
    }
}

/// Report final statistics and results
pub fn report_final_stats(result: &AnnealingResult) {
    info!(
        "Optimization complete after {} iterations ({:?}), final temperature {:.6}",
        result.iterations, result.termination, result.final_temperature
    );
    if result.cancelled() {
        warn!("Search was cancelled; reporting the best assignment found so far");
    }
    info!(
        "Moves - accepted: {}, improving: {}, over capacity: {}",
        result.accepted_moves, result.improving_moves, result.infeasible_moves
    );
    for kind in MoveKind::ALL {
        let tally = result.move_tallies[kind.index()];
        info!(
            "{}: proposed {}, over capacity {}, accepted {}",
            kind.name(),
            tally.proposed,
            tally.infeasible,
            tally.accepted
        );
    }
    if let Some((iteration, cost)) = result.best_cost_history.last() {
        info!("Best cost {:.4} reached at iteration {}", cost, iteration);
    }
}

/// Writes the best-cost trajectory as `iteration,best_cost` rows.
pub fn save_to_csv(best_cost_history: &[(usize, f64)], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = Writer::from_path(path.as_ref())?;

    wtr.write_record(["iteration", "best_cost"])?;
    for (iteration, cost) in best_cost_history {
        wtr.write_record([iteration.to_string(), cost.to_string()])?;
    }

    wtr.flush().map_err(|source| VrpError::Io {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    info!("Best-cost history written to {}", path.as_ref().display());
    Ok(())
}
