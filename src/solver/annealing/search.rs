use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, trace, warn, Level};

use crate::config::AnnealingConfig;
use crate::domain::solution::Solution;
use crate::domain::types::{Assignment, ProblemInstance};
use crate::error::Result;
use crate::evaluation::{is_valid, score, Score};
use crate::setup::init::initial_solution;

use super::moves::generate_neighbor;
use super::schedule::{acceptance_probability, Temperature};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    IterationBudget,
    /// Temperature reached zero before the budget ran out.
    Frozen,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveTally {
    pub proposed: usize,
    pub infeasible: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone)]
pub struct AnnealingResult {
    pub best: Assignment,
    pub best_score: Score,
    /// Only `false` when the initial assignment was overloaded and no
    /// feasible candidate ever improved on it.
    pub feasible: bool,
    pub seed: u64,
    /// Iterations actually executed.
    pub iterations: usize,
    pub final_temperature: f64,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    pub infeasible_moves: usize,
    pub move_tallies: [MoveTally; 4],
    pub termination: Termination,
    /// `(iteration, best cost)` at start (iteration 0) and on every strict improvement.
    pub best_cost_history: Vec<(usize, f64)>,
}

impl AnnealingResult {
    pub fn best_cost(&self) -> f64 {
        self.best_score.cost
    }

    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }

    pub fn solution(&self, instance: &ProblemInstance) -> Solution {
        Solution::new(&self.best, &self.best_score, instance)
    }
}

/// Mutable state of one running search.
struct SearchState {
    current: Assignment,
    current_score: Score,
    best: Assignment,
    best_score: Score,
    best_iteration: usize,
    temperature: Temperature,
    rng: ChaCha8Rng,
    accepted_moves: usize,
    improving_moves: usize,
    infeasible_moves: usize,
    move_tallies: [MoveTally; 4],
    best_cost_history: Vec<(usize, f64)>,
}

impl SearchState {
    fn new(
        initial: Assignment,
        initial_score: Score,
        config: &AnnealingConfig,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            best: initial.clone(),
            best_score: initial_score,
            best_iteration: 0,
            current: initial,
            current_score: initial_score,
            temperature: Temperature::new(config.initial_temp, config.cooling_rate),
            rng,
            accepted_moves: 0,
            improving_moves: 0,
            infeasible_moves: 0,
            move_tallies: [MoveTally::default(); 4],
            best_cost_history: vec![(0, initial_score.cost)],
        }
    }
}

/// Runs one annealing search seeded from `config.seed`.
pub fn run(instance: &ProblemInstance, config: &AnnealingConfig) -> Result<AnnealingResult> {
    run_with_cancel(instance, config, None)
}

/// Like [`run`], checking `cancel` once per iteration.
pub fn run_with_cancel(
    instance: &ProblemInstance,
    config: &AnnealingConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<AnnealingResult> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let initial = initial_solution(instance, &mut rng);
    let initial_score = evaluate(&initial, instance, config);

    if !is_valid(&initial, &instance.orders, &instance.vehicles) {
        warn!("Initial assignment exceeds vehicle capacity; it is kept as the starting best");
    }
    info!(
        "Initial cost {:.4} (distance {:.2} km, time {:.2} h)",
        initial_score.cost, initial_score.distance, initial_score.time
    );

    let mut state = SearchState::new(initial, initial_score, config, rng);
    let mut termination = Termination::IterationBudget;
    let mut iterations = 0;

    let loop_span = span!(
        Level::INFO,
        "annealing",
        seed = config.seed,
        max_iterations = config.max_iterations
    );
    let _loop_guard = loop_span.enter();

    for iteration in 1..=config.max_iterations {
        if cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            info!("Cancelled before iteration {}", iteration);
            termination = Termination::Cancelled;
            break;
        }
        if state.temperature.is_frozen() {
            info!("Temperature reached zero before iteration {}", iteration);
            termination = Termination::Frozen;
            break;
        }

        perform_iteration(iteration, &mut state, instance, config);
        iterations = iteration;
    }

    debug_assert_eq!(state.best.order_count(), instance.orders.len());
    let feasible = is_valid(&state.best, &instance.orders, &instance.vehicles);
    info!(
        "Search finished after {} iterations ({:?}); best cost {:.4} found at iteration {}",
        iterations, termination, state.best_score.cost, state.best_iteration
    );

    Ok(AnnealingResult {
        best: state.best,
        best_score: state.best_score,
        feasible,
        seed: config.seed,
        iterations,
        final_temperature: state.temperature.current(),
        accepted_moves: state.accepted_moves,
        improving_moves: state.improving_moves,
        infeasible_moves: state.infeasible_moves,
        move_tallies: state.move_tallies,
        termination,
        best_cost_history: state.best_cost_history,
    })
}

/// One generate -> validate -> score -> accept step, then cooling.
///
/// Infeasible candidates are dropped but still consume the iteration and the
/// cooling step.
fn perform_iteration(
    iteration: usize,
    state: &mut SearchState,
    instance: &ProblemInstance,
    config: &AnnealingConfig,
) {
    let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
    let _iter_guard = iter_span.enter();

    let (kind, candidate) = generate_neighbor(&state.current, &mut state.rng);
    state.move_tallies[kind.index()].proposed += 1;

    if !is_valid(&candidate, &instance.orders, &instance.vehicles) {
        state.move_tallies[kind.index()].infeasible += 1;
        state.infeasible_moves += 1;
        trace!("{} candidate rejected: over capacity", kind.name());
    } else {
        let candidate_score = evaluate(&candidate, instance, config);
        let accepted = if candidate_score.cost < state.current_score.cost {
            state.improving_moves += 1;
            true
        } else {
            let probability = acceptance_probability(
                state.current_score.cost,
                candidate_score.cost,
                state.temperature.current(),
            );
            state.rng.gen::<f64>() < probability
        };

        debug!(
            "{} candidate {:.4} vs current {:.4} at T={:.6}: {}",
            kind.name(),
            candidate_score.cost,
            state.current_score.cost,
            state.temperature.current(),
            if accepted { "accepted" } else { "rejected" }
        );

        if accepted {
            state.move_tallies[kind.index()].accepted += 1;
            state.accepted_moves += 1;
            state.current = candidate;
            state.current_score = candidate_score;
        }

        if state.current_score.cost < state.best_score.cost {
            state.best = state.current.clone();
            state.best_score = state.current_score;
            state.best_iteration = iteration;
            state.best_cost_history.push((iteration, state.best_score.cost));
            debug!("New best at iteration {}: cost = {:.4}", iteration, state.best_score.cost);
        }
    }

    debug_assert!(state.best_score.cost <= state.current_score.cost);
    state.temperature.cool();
}

fn evaluate(
    assignment: &Assignment,
    instance: &ProblemInstance,
    config: &AnnealingConfig,
) -> Score {
    score(
        assignment,
        &instance.distance_matrix,
        config.weight_distance,
        config.weight_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Location, Order, Vehicle};
    use crate::setup::init::setup;

    fn ring_instance(num_orders: usize, num_vehicles: usize, capacity: f64) -> ProblemInstance {
        let vehicles = (0..num_vehicles)
            .map(|i| Vehicle {
                id: i as u64 + 1,
                capacity_weight: capacity,
                capacity_volume: capacity,
            })
            .collect();
        let orders = (0..num_orders)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / num_orders as f64;
                Order {
                    id: i as u64 + 1,
                    weight: 1.0,
                    volume: 1.0,
                    location: Location::new(angle.sin(), angle.cos()),
                }
            })
            .collect();
        setup(vehicles, orders, Location::new(0.0, 0.0)).unwrap()
    }

    #[test]
    fn zero_budget_returns_the_initial_assignment() {
        let instance = ring_instance(8, 2, 100.0);
        let config = AnnealingConfig::default()
            .with_max_iterations(0)
            .with_seed(5);
        let result = run(&instance, &config).unwrap();

        let initial = initial_solution(&instance, &mut ChaCha8Rng::seed_from_u64(5));
        let initial_score = evaluate(&initial, &instance, &config);

        assert_eq!(result.best, initial);
        assert_eq!(result.best_score, initial_score);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.final_temperature, config.initial_temp);
        assert_eq!(result.termination, Termination::IterationBudget);
    }

    #[test]
    fn temperature_decays_once_per_iteration() {
        let instance = ring_instance(6, 2, 4.0);
        let config = AnnealingConfig::default()
            .with_initial_temp(50.0)
            .with_cooling_rate(0.9)
            .with_max_iterations(137)
            .with_seed(1);
        let result = run(&instance, &config).unwrap();

        let mut expected = 50.0;
        for _ in 0..result.iterations {
            expected *= 0.9;
        }
        assert_eq!(result.iterations, 137);
        assert_eq!(result.final_temperature, expected);
    }

    #[test]
    fn infeasible_candidates_still_cool() {
        // Capacity 3 per vehicle with 6 unit orders: every relocate overloads.
        let instance = ring_instance(6, 2, 3.0);
        let config = AnnealingConfig::default()
            .with_initial_temp(10.0)
            .with_cooling_rate(0.5)
            .with_max_iterations(40)
            .with_seed(9);
        let result = run(&instance, &config).unwrap();

        assert!(result.infeasible_moves > 0);
        assert_eq!(result.iterations, 40);
        assert_eq!(result.final_temperature, 10.0 * 0.5f64.powi(40));
        assert!(result.feasible);
    }

    #[test]
    fn stops_when_temperature_underflows() {
        let instance = ring_instance(5, 2, 100.0);
        let config = AnnealingConfig::default()
            .with_initial_temp(1.0)
            .with_cooling_rate(1e-200)
            .with_max_iterations(100)
            .with_seed(3);
        let result = run(&instance, &config).unwrap();

        assert_eq!(result.termination, Termination::Frozen);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.final_temperature, 0.0);
    }

    #[test]
    fn best_cost_history_strictly_decreases() {
        let instance = ring_instance(20, 3, 100.0);
        let config = AnnealingConfig::default()
            .with_max_iterations(3_000)
            .with_seed(11);
        let result = run(&instance, &config).unwrap();

        assert_eq!(result.best_cost_history[0].0, 0);
        for pair in result.best_cost_history.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 < pair[0].1, "{:?}", pair);
        }
        let last = result.best_cost_history.last().unwrap();
        assert_eq!(last.1, result.best_cost());
    }

    #[test]
    fn search_improves_a_random_start() {
        let instance = ring_instance(20, 2, 100.0);
        let config = AnnealingConfig::default()
            .with_initial_temp(1_000.0)
            .with_cooling_rate(0.999)
            .with_max_iterations(10_000)
            .with_seed(42);
        let result = run(&instance, &config).unwrap();

        let initial_cost = result.best_cost_history[0].1;
        assert!(result.best_cost() < initial_cost);
        assert!(result.feasible);
        assert!(result.improving_moves > 0);
    }

    #[test]
    fn same_seed_same_result() {
        let instance = ring_instance(12, 3, 100.0);
        let config = AnnealingConfig::default()
            .with_max_iterations(500)
            .with_seed(77);
        let a = run(&instance, &config).unwrap();
        let b = run(&instance, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn tallies_add_up() {
        let instance = ring_instance(10, 2, 6.0);
        let config = AnnealingConfig::default()
            .with_max_iterations(400)
            .with_seed(21);
        let result = run(&instance, &config).unwrap();

        let proposed: usize = result.move_tallies.iter().map(|t| t.proposed).sum();
        let infeasible: usize = result.move_tallies.iter().map(|t| t.infeasible).sum();
        let accepted: usize = result.move_tallies.iter().map(|t| t.accepted).sum();
        assert_eq!(proposed, result.iterations);
        assert_eq!(infeasible, result.infeasible_moves);
        assert_eq!(accepted, result.accepted_moves);
    }

    #[test]
    fn pre_set_cancel_flag_stops_immediately() {
        let instance = ring_instance(8, 2, 100.0);
        let config = AnnealingConfig::default().with_seed(2);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = run_with_cancel(&instance, &config, Some(cancel)).unwrap();

        assert!(result.cancelled());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn invalid_config_fails_before_searching() {
        let instance = ring_instance(4, 2, 100.0);
        let config = AnnealingConfig::default().with_cooling_rate(1.5);
        assert!(run(&instance, &config).is_err());
    }
}
