use vrp_anneal::config::{AnnealingConfig, ParameterOverrides};
use vrp_anneal::distance::haversine_distance;
use vrp_anneal::evaluation::is_valid;
use vrp_anneal::setup::init::{parse_problem_json, setup};
use vrp_anneal::solver::annealing::{run, Termination};
use vrp_anneal::{solve, Assignment, Location, Order, Vehicle, VrpError};

fn vehicle(id: u64, capacity_weight: f64, capacity_volume: f64) -> Vehicle {
    Vehicle {
        id,
        capacity_weight,
        capacity_volume,
    }
}

/// Sorted ids of every order placed in `assignment`.
fn order_ids(assignment: &Assignment, orders: &[Order]) -> Vec<u64> {
    let mut ids: Vec<u64> = assignment
        .routes
        .iter()
        .flat_map(|route| route.orders.iter().map(|&i| orders[i].id))
        .collect();
    ids.sort_unstable();
    ids
}

fn order(id: u64, weight: f64, volume: f64, lat: f64, lng: f64) -> Order {
    Order {
        id,
        weight,
        volume,
        location: Location::new(lat, lng),
    }
}

#[test]
fn single_vehicle_single_order_costs_one_round_trip() {
    let depot = Location::new(0.0, 0.0);
    let target = order(1, 5.0, 5.0, 0.3, 0.4);
    let d = haversine_distance(&depot, &target.location);

    let config = AnnealingConfig::default()
        .with_max_iterations(200)
        .with_weights(0.6, 0.4);
    let instance = setup(vec![vehicle(1, 1000.0, 1000.0)], vec![target], depot).unwrap();
    let result = run(&instance, &config).unwrap();

    assert_eq!(result.best.routes.len(), 1);
    assert_eq!(result.best.routes[0].orders, vec![0]);

    let expected = 0.6 * 2.0 * d + 0.4 * 2.0 * d / 30.0;
    assert!(
        (result.best_cost() - expected).abs() < 1e-9,
        "got {}, expected {}",
        result.best_cost(),
        expected
    );
}

#[test]
fn two_vehicles_three_orders_stay_feasible() {
    let depot = Location::new(12.9716, 77.5946);
    let orders = vec![
        order(1, 10.0, 30.0, 13.1, 77.7),
        order(2, 15.0, 50.0, 12.8, 77.4),
        order(3, 25.0, 70.0, 13.0, 77.9),
    ];
    let vehicles = vec![
        vehicle(1, 10_000.0, 20_000.0),
        vehicle(2, 10_000.0, 20_000.0),
    ];
    let instance = setup(vehicles, orders, depot).unwrap();

    for seed in 0..10 {
        let config = AnnealingConfig::default()
            .with_max_iterations(2_000)
            .with_seed(seed);
        let result = run(&instance, &config).unwrap();

        assert!(result.feasible);
        assert!(is_valid(&result.best, &instance.orders, &instance.vehicles));
        assert_eq!(order_ids(&result.best, &instance.orders), vec![1, 2, 3]);
        assert!(result.best_cost().is_finite());

        let initial_cost = result.best_cost_history[0].1;
        assert!(result.best_cost() <= initial_cost);
    }
}

#[test]
fn solve_rejects_demand_beyond_the_fleet() {
    let err = solve(
        vec![vehicle(1, 10.0, 10.0)],
        vec![order(1, 6.0, 1.0, 1.0, 1.0), order(2, 6.0, 1.0, 2.0, 2.0)],
        Location::new(0.0, 0.0),
        &AnnealingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, VrpError::InfeasibleInstance { .. }));
}

#[test]
fn solve_rejects_bad_parameters_before_reading_input() {
    let err = solve(
        vec![],
        vec![],
        Location::new(0.0, 0.0),
        &AnnealingConfig::default().with_initial_temp(-5.0),
    )
    .unwrap_err();
    assert!(matches!(err, VrpError::Parameter { ref field, .. } if field == "initial_temp"));
}

#[test]
fn solve_places_every_order() {
    let orders: Vec<Order> = (0..15)
        .map(|i| order(i + 1, 1.0, 1.0, 12.9 + i as f64 * 0.01, 77.5 - i as f64 * 0.02))
        .collect();
    let vehicles = vec![vehicle(1, 8.0, 8.0), vehicle(2, 8.0, 8.0)];

    let (best, cost) = solve(
        vehicles.clone(),
        orders.clone(),
        Location::new(12.9716, 77.5946),
        &AnnealingConfig::default().with_max_iterations(3_000),
    )
    .unwrap();

    assert!(cost > 0.0);
    assert_eq!(best.order_count(), 15);
    assert_eq!(order_ids(&best, &orders), (1..=15).collect::<Vec<u64>>());
    assert!(is_valid(&best, &orders, &vehicles));
}

#[test]
fn document_parameters_drive_the_search() {
    let doc = parse_problem_json(
        r#"{
            "vehicles": [
                {"id": 1, "capacity_weight": 100, "capacity_volume": 100},
                {"id": 2, "capacity_weight": 100, "capacity_volume": 100}
            ],
            "orders": [
                {"id": 10, "weight": 1, "volume": 2, "location": {"lat": 12.95, "lng": 77.60}},
                {"id": 11, "weight": 1, "volume": 2, "location": {"lat": 12.99, "lng": 77.58}},
                {"id": 12, "weight": 1, "volume": 2, "location": {"lat": 13.01, "lng": 77.62}},
                {"id": 13, "weight": 1, "volume": 2, "location": {"lat": 12.93, "lng": 77.55}}
            ],
            "depot_location": {"lat": 12.9716, "lng": 77.5946},
            "parameters": {"max_iterations": 25, "seed": 3}
        }"#,
    )
    .unwrap();

    let (instance, parameters) = doc.into_instance().unwrap();
    let config = AnnealingConfig::default()
        .apply(&parameters.unwrap_or_default())
        .unwrap();
    let result = run(&instance, &config).unwrap();

    assert_eq!(result.seed, 3);
    assert_eq!(result.iterations, 25);
    assert_eq!(result.termination, Termination::IterationBudget);

    let solution = result.solution(&instance);
    assert_eq!(solution.routes.len(), 2);
    assert_eq!(solution.routes[0].vehicle_id, 1);
    let mut ids: Vec<u64> = solution
        .routes
        .iter()
        .flat_map(|r| r.order_ids.clone())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![10, 11, 12, 13]);
}

#[test]
fn negative_iteration_budget_in_document_is_rejected() {
    let overrides = ParameterOverrides {
        max_iterations: Some(-10),
        ..Default::default()
    };
    let err = AnnealingConfig::default().apply(&overrides).unwrap_err();
    assert!(matches!(err, VrpError::Parameter { .. }));
}

#[test]
fn antipodal_depot_and_order_give_a_finite_cost() {
    let depot = Location::new(-82.0, -180.0);
    let instance = setup(
        vec![vehicle(1, 10.0, 10.0)],
        vec![order(1, 1.0, 1.0, 82.0, 0.0)],
        depot,
    )
    .unwrap();
    let config = AnnealingConfig::default().with_max_iterations(200);
    let result = run(&instance, &config).unwrap();

    assert!(result.best_cost().is_finite());
    let half = std::f64::consts::PI * 6371.0;
    assert!((result.best_score.distance - 2.0 * half).abs() < 1e-2);
}
