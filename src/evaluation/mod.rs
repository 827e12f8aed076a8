pub mod feasibility;
pub mod fitness;

pub use feasibility::is_valid;
pub use fitness::{score, Score};
