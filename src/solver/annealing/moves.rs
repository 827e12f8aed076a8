//! Neighbourhood moves over an [`Assignment`].
//!
//! Every move works on a fresh copy of its input and only exchanges,
//! relocates or reorders order indices, so each order stays in exactly one
//! route.

use rand::Rng;

use crate::domain::types::{Assignment, Route};
use crate::utils::{pick_two_distinct, pick_two_sorted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Exchange one order between two routes.
    Swap,
    /// Move one order into another route at any position.
    Relocate,
    /// Reverse a segment inside one route.
    TwoOpt,
    /// Two to four independent swaps.
    MultipleSwap,
}

impl MoveKind {
    pub const ALL: [MoveKind; 4] = [
        MoveKind::Swap,
        MoveKind::Relocate,
        MoveKind::TwoOpt,
        MoveKind::MultipleSwap,
    ];

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn apply<R: Rng + ?Sized>(self, assignment: &Assignment, rng: &mut R) -> Assignment {
        match self {
            MoveKind::Swap => swap_move(assignment, rng),
            MoveKind::Relocate => relocate_move(assignment, rng),
            MoveKind::TwoOpt => two_opt_move(assignment, rng),
            MoveKind::MultipleSwap => multiple_swap_move(assignment, rng),
        }
    }

    /// Position of this kind in [`MoveKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            MoveKind::Swap => 0,
            MoveKind::Relocate => 1,
            MoveKind::TwoOpt => 2,
            MoveKind::MultipleSwap => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Swap => "swap",
            MoveKind::Relocate => "relocate",
            MoveKind::TwoOpt => "2-opt",
            MoveKind::MultipleSwap => "multiple_swap",
        }
    }
}

/// Draws a move uniformly and applies it to a copy of `assignment`.
pub fn generate_neighbor<R: Rng + ?Sized>(
    assignment: &Assignment,
    rng: &mut R,
) -> (MoveKind, Assignment) {
    let kind = MoveKind::sample(rng);
    (kind, kind.apply(assignment, rng))
}

pub fn swap_move<R: Rng + ?Sized>(assignment: &Assignment, rng: &mut R) -> Assignment {
    let mut candidate = assignment.clone();
    swap_between_routes(&mut candidate.routes, rng);
    candidate
}

pub fn multiple_swap_move<R: Rng + ?Sized>(assignment: &Assignment, rng: &mut R) -> Assignment {
    let mut candidate = assignment.clone();
    let swaps = rng.gen_range(2..=4);
    for _ in 0..swaps {
        swap_between_routes(&mut candidate.routes, rng);
    }
    candidate
}

pub fn relocate_move<R: Rng + ?Sized>(assignment: &Assignment, rng: &mut R) -> Assignment {
    let mut candidate = assignment.clone();
    let Some((source, destination)) = pick_two_distinct(rng, candidate.routes.len()) else {
        return candidate;
    };
    if candidate.routes[source].is_empty() {
        return candidate;
    }

    let from = rng.gen_range(0..candidate.routes[source].len());
    let order = candidate.routes[source].orders.remove(from);
    let to = rng.gen_range(0..=candidate.routes[destination].len());
    candidate.routes[destination].orders.insert(to, order);
    candidate
}

pub fn two_opt_move<R: Rng + ?Sized>(assignment: &Assignment, rng: &mut R) -> Assignment {
    let mut candidate = assignment.clone();
    if candidate.routes.is_empty() {
        return candidate;
    }

    let r = rng.gen_range(0..candidate.routes.len());
    let route: &mut Route = &mut candidate.routes[r];
    if route.len() > 2 {
        if let Some((i, j)) = pick_two_sorted(rng, route.len()) {
            route.orders[i..=j].reverse();
        }
    }
    candidate
}

/// No-op when fewer than two routes exist or either chosen route is empty.
fn swap_between_routes<R: Rng + ?Sized>(routes: &mut [Route], rng: &mut R) {
    let Some((first, second)) = pick_two_distinct(rng, routes.len()) else {
        return;
    };
    if routes[first].is_empty() || routes[second].is_empty() {
        return;
    }

    let i = rng.gen_range(0..routes[first].len());
    let j = rng.gen_range(0..routes[second].len());

    let tmp = routes[first].orders[i];
    routes[first].orders[i] = routes[second].orders[j];
    routes[second].orders[j] = tmp;
}
