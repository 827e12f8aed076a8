/// Geometric cooling: `T_{k+1} = T_k * cooling_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    current: f64,
    cooling_rate: f64,
}

impl Temperature {
    pub fn new(initial: f64, cooling_rate: f64) -> Self {
        Self {
            current: initial,
            cooling_rate,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// The search stops once the temperature reaches zero.
    pub fn is_frozen(&self) -> bool {
        self.current <= 0.0
    }

    pub fn cool(&mut self) {
        self.current *= self.cooling_rate;
    }
}

/// Metropolis criterion, `min(1, exp((current - candidate) / T))`.
pub fn acceptance_probability(current_cost: f64, candidate_cost: f64, temperature: f64) -> f64 {
    if candidate_cost < current_cost {
        return 1.0;
    }
    ((current_cost - candidate_cost) / temperature).exp()
}
