use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VrpError};

pub mod constant {
    pub const INITIAL_TEMP: f64 = 10_000.0;
    pub const COOLING_RATE: f64 = 0.995;
    pub const MAX_ITERATIONS: usize = 10_000;
    pub const WEIGHT_DISTANCE: f64 = 0.5;
    pub const WEIGHT_TIME: f64 = 0.5;
    pub const SEED: u64 = 42;
    pub const RUNS: usize = 1;

    /// Assumed constant travel speed, km/h.
    pub const AVERAGE_SPEED_KMH: f64 = 30.0;
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    pub const DEPOT_LAT: f64 = 12.9716;
    pub const DEPOT_LNG: f64 = 77.5946;

    pub const RANDOM_ORDER_COUNT: usize = 100;
    pub const RANDOM_VEHICLE_COUNT: usize = 2;
}

/// Parameters of one annealing search.
///
/// Values are checked by [`AnnealingConfig::validate`] before any search
/// starts; the runners call it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub initial_temp: f64,
    /// Multiplicative decay applied once per iteration, in (0, 1].
    pub cooling_rate: f64,
    pub max_iterations: usize,
    pub weight_distance: f64,
    pub weight_time: f64,
    pub seed: u64,
    /// Number of independent searches for multi-start runs.
    pub runs: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temp: constant::INITIAL_TEMP,
            cooling_rate: constant::COOLING_RATE,
            max_iterations: constant::MAX_ITERATIONS,
            weight_distance: constant::WEIGHT_DISTANCE,
            weight_time: constant::WEIGHT_TIME,
            seed: constant::SEED,
            runs: constant::RUNS,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temp(mut self, t: f64) -> Self {
        self.initial_temp = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_weights(mut self, weight_distance: f64, weight_time: f64) -> Self {
        self.weight_distance = weight_distance;
        self.weight_time = weight_time;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.initial_temp.is_finite() || self.initial_temp <= 0.0 {
            return Err(VrpError::parameter(
                "initial_temp",
                format!("must be a positive finite number, got {}", self.initial_temp),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(VrpError::parameter(
                "cooling_rate",
                format!("must be in (0, 1], got {}", self.cooling_rate),
            ));
        }
        for (field, value) in [
            ("weight_distance", self.weight_distance),
            ("weight_time", self.weight_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VrpError::parameter(
                    field,
                    format!("must be a non-negative finite number, got {value}"),
                ));
            }
        }
        if self.runs == 0 {
            return Err(VrpError::parameter("runs", "at least one run is required"));
        }
        Ok(())
    }

    /// Layers `overrides` on top of this configuration.
    ///
    /// Integer fields arrive signed so that negative counts surface as
    /// parameter errors rather than parse failures.
    pub fn apply(mut self, overrides: &ParameterOverrides) -> Result<Self> {
        if let Some(t) = overrides.initial_temp {
            self.initial_temp = t;
        }
        if let Some(rate) = overrides.cooling_rate {
            self.cooling_rate = rate;
        }
        if let Some(n) = overrides.max_iterations {
            self.max_iterations = non_negative("max_iterations", n)?;
        }
        if let Some(w) = overrides.weight_distance {
            self.weight_distance = w;
        }
        if let Some(w) = overrides.weight_time {
            self.weight_time = w;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(runs) = overrides.runs {
            self.runs = non_negative("runs", runs)?;
        }
        Ok(self)
    }
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        VrpError::parameter(field, format!("must be non-negative, got {value}"))
    })
}

/// Partial parameter set, as found in an input document or the environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterOverrides {
    pub initial_temp: Option<f64>,
    pub cooling_rate: Option<f64>,
    pub max_iterations: Option<i64>,
    pub weight_distance: Option<f64>,
    pub weight_time: Option<f64>,
    pub seed: Option<u64>,
    pub runs: Option<i64>,
}

impl ParameterOverrides {
    /// Reads `VRP_*` variables. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Self {
            initial_temp: parse_var(&lookup, "VRP_INITIAL_TEMP")?,
            cooling_rate: parse_var(&lookup, "VRP_COOLING_RATE")?,
            max_iterations: parse_var(&lookup, "VRP_MAX_ITERATIONS")?,
            weight_distance: parse_var(&lookup, "VRP_WEIGHT_DISTANCE")?,
            weight_time: parse_var(&lookup, "VRP_WEIGHT_TIME")?,
            seed: parse_var(&lookup, "VRP_SEED")?,
            runs: parse_var(&lookup, "VRP_RUNS")?,
        };
        debug!("Parameter overrides from environment: {:?}", overrides);
        Ok(overrides)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| {
                VrpError::parameter(key, format!("cannot parse {raw:?}: {e}"))
            }),
    }
}
