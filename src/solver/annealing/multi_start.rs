use rayon::prelude::*;
use tracing::info;

use crate::config::AnnealingConfig;
use crate::domain::types::ProblemInstance;
use crate::error::{Result, VrpError};

use super::search::{run, AnnealingResult};

/// Runs `config.runs` independent searches in parallel with seeds
/// `seed, seed + 1, ...` and keeps the best one.
///
/// Feasible results win over infeasible ones; among equals the lower cost
/// and then the lower seed wins, so the outcome does not depend on thread
/// scheduling.
pub fn run_independent(
    instance: &ProblemInstance,
    config: &AnnealingConfig,
) -> Result<AnnealingResult> {
    config.validate()?;

    info!("Starting {} independent annealing runs", config.runs);

    let results: Vec<AnnealingResult> = (0..config.runs as u64)
        .into_par_iter()
        .map(|offset| {
            let run_config = config.clone().with_seed(config.seed.wrapping_add(offset));
            run(instance, &run_config)
        })
        .collect::<Result<Vec<_>>>()?;

    for result in &results {
        info!(
            "Run with seed {} finished: cost {:.4}, feasible {}",
            result.seed,
            result.best_cost(),
            result.feasible
        );
    }

    let best = results
        .into_iter()
        .min_by(|a, b| {
            b.feasible
                .cmp(&a.feasible)
                .then(a.best_cost().total_cmp(&b.best_cost()))
                .then(a.seed.cmp(&b.seed))
        })
        .ok_or_else(|| VrpError::parameter("runs", "at least one run is required"))?;

    info!("Best of runs: seed {} with cost {:.4}", best.seed, best.best_cost());
    Ok(best)
}
