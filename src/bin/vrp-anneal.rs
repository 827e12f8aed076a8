use std::env;
use std::error::Error;

use colored::*;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vrp_anneal::config::constant::{RANDOM_ORDER_COUNT, RANDOM_VEHICLE_COUNT, SEED};
use vrp_anneal::config::{AnnealingConfig, ParameterOverrides};
use vrp_anneal::domain::solution::Solution;
use vrp_anneal::fixtures::data_generator::{generate_random_instance, load_orders_csv};
use vrp_anneal::setup::init::{load_problem_json, setup};
use vrp_anneal::solver::annealing::report::{print_solution, report_final_stats, save_to_csv};
use vrp_anneal::solver::annealing::{run, run_independent};

/// Initialize tracing and environment
fn init_tracing_and_env() {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_summary(solution: &Solution) {
    let headline = format!(
        "Best cost: {:.4} (distance {:.2} km, time {:.2} h)",
        solution.cost, solution.total_distance, solution.total_time
    );
    if solution.feasible {
        eprintln!("{}", headline.green());
    } else {
        eprintln!("{} {}", headline.red(), "[over capacity]".red().bold());
    }

    for route in &solution.routes {
        let load = format!(
            "{:.1}/{:.1} kg, {:.1}/{:.1} vol",
            route.load_weight, route.capacity_weight, route.load_volume, route.capacity_volume
        );
        eprintln!("  vehicle {} [{}]: {:?}", route.vehicle_id, load.cyan(), route.order_ids);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();

    let input = env::args().nth(1).or_else(|| env::var("VRP_INPUT").ok());
    let (mut instance, document_parameters) = match input {
        Some(path) => load_problem_json(&path)?.into_instance()?,
        None => {
            warn!(
                "No input document given; generating {} random orders for {} vehicles",
                RANDOM_ORDER_COUNT, RANDOM_VEHICLE_COUNT
            );
            let instance =
                generate_random_instance(RANDOM_ORDER_COUNT, RANDOM_VEHICLE_COUNT, SEED)?;
            (instance, None)
        }
    };

    if let Ok(csv_path) = env::var("VRP_ORDERS_CSV") {
        let orders = load_orders_csv(&csv_path)?;
        info!("Replacing document orders with {} orders from CSV", orders.len());
        instance = setup(instance.vehicles, orders, instance.depot)?;
    }

    let mut config = AnnealingConfig::default();
    if let Some(parameters) = &document_parameters {
        config = config.apply(parameters)?;
    }
    config = config.apply(&ParameterOverrides::from_env()?)?;
    config.validate()?;
    info!("Annealing parameters: {:?}", config);

    let result = if config.runs > 1 {
        run_independent(&instance, &config)?
    } else {
        run(&instance, &config)?
    };

    let solution = result.solution(&instance);
    print_solution(&solution);
    report_final_stats(&result);

    if let Ok(path) = env::var("VRP_HISTORY_CSV") {
        save_to_csv(&result.best_cost_history, path)?;
    }

    print_summary(&solution);
    println!("{}", serde_json::to_string_pretty(&solution)?);
    Ok(())
}
