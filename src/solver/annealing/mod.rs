//! Simulated annealing over vehicle assignments.
//!
//! A search starts from a shuffled round-robin assignment and repeatedly
//! proposes a neighbour, drops it if any vehicle is overloaded, and accepts
//! it by the Metropolis rule. Temperature decays geometrically once per
//! iteration.

pub mod moves;
pub mod multi_start;
pub mod report;
pub mod schedule;
pub mod search;

pub use moves::{generate_neighbor, MoveKind};
pub use multi_start::run_independent;
pub use schedule::{acceptance_probability, Temperature};
pub use search::{run, run_with_cancel, AnnealingResult, MoveTally, Termination};
