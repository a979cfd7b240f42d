//! Evolutionary tuning of a greedy drone-dispatch heuristic.
//!
//! A [`GeneticAlgorithm`](evolution::algorithm::GeneticAlgorithm) evolves
//! [`WeightVector`](simulation::weights::WeightVector)s; each one is scored by
//! running a full delivery [`Simulation`](simulation::engine::Simulation) on a
//! private copy of the scenario.

pub mod error;
pub mod evolution;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{DispatchError, Result};
