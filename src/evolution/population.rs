// src/evolution/population.rs

use crate::simulation::config::SimulationParameters;
use crate::simulation::engine::{Simulation, StallPolicy};
use crate::simulation::weights::WeightVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A weight vector together with the score its simulation produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub weights: WeightVector,
    pub score: u64,
}

/// Binds every weight vector to a fresh copy of the scenario.
pub fn build_population(
    template: &SimulationParameters,
    weights: &[WeightVector],
    stall_policy: StallPolicy,
) -> Vec<Simulation> {
    weights
        .iter()
        .map(|w| Simulation::new(template, *w).with_stall_policy(stall_policy))
        .collect()
}

/// Runs every simulation in parallel and ranks the results best-first.
///
/// Nothing is returned before the last simulation has finished. Equal scores
/// keep their population order.
pub fn evaluate(mut population: Vec<Simulation>) -> Vec<Candidate> {
    population.par_iter_mut().for_each(Simulation::run);

    let mut ranking: Vec<Candidate> = population
        .iter()
        .map(|simulation| Candidate {
            weights: *simulation.weights(),
            score: simulation.score(),
        })
        .collect();
    ranking.sort_by(|a, b| b.score.cmp(&a.score));
    ranking
}
