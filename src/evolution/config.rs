// src/evolution/config.rs

use crate::error::{DispatchError, Result};
use crate::simulation::engine::StallPolicy;
use crate::strategy::operators::{CrossOver, Mutation, Selection, Succession};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Settings for one evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub selection: Selection,
    pub mutation: Mutation,
    pub crossover: CrossOver,
    pub succession: Succession,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Range initial coefficients are drawn from.
    pub weight_range: (f64, f64),
    pub stall_policy: StallPolicy,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 10,
            selection: Selection::Tournament { size: 3 },
            mutation: Mutation::Gaussian { sigma: 0.5 },
            crossover: CrossOver::Linear,
            succession: Succession::Elite { count: 2 },
            seed: None,
            weight_range: (-1.0, 1.0),
            stall_policy: StallPolicy::Wait,
        }
    }
}

impl GeneticConfig {
    /// Defaults overlaid with `DRONE_GA_*` environment variables.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_value("DRONE_GA_POPULATION") {
            cfg.population_size = v;
        }
        if let Some(v) = env_value("DRONE_GA_GENERATIONS") {
            cfg.max_generations = v;
        }
        if let Some(v) = env_value("DRONE_GA_SEED") {
            cfg.seed = Some(v);
        }
        if let Some(size) = env_value("DRONE_GA_TOURNAMENT") {
            cfg.selection = Selection::Tournament { size };
        }
        if let Some(sigma) = env_value("DRONE_GA_SIGMA") {
            cfg.mutation = Mutation::Gaussian { sigma };
        }
        if let Some(count) = env_value("DRONE_GA_ELITES") {
            cfg.succession = Succession::Elite { count };
        }
        if let Some(after_turns) = env_value("DRONE_GA_ABANDON_AFTER") {
            cfg.stall_policy = StallPolicy::Abandon { after_turns };
        }

        cfg
    }

    /// Checks the weight range, and the operator settings against the
    /// population size. An empty population never runs selection or
    /// succession, so those checks are skipped for it.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = self.weight_range;
        if !low.is_finite() || !high.is_finite() || low > high || !(high - low).is_finite() {
            return Err(DispatchError::Config(format!(
                "weight range ({low}, {high}) must be finite and ordered"
            )));
        }
        self.mutation.validate()?;
        if self.population_size > 0 {
            self.selection.validate()?;
            self.succession.validate(self.population_size)?;
        }
        Ok(())
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| parse_setting(key, &raw))
}

fn parse_setting<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: '{}' is not a valid value", key, raw);
            None
        }
    }
}
