// src/evolution/stats.rs

use crate::evolution::population::Candidate;
use serde::Serialize;

/// Score spread of one generation. The mean is rounded half to even for
/// display only; nothing compares against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub min: u64,
    pub mean: u64,
    pub max: u64,
}

impl GenerationStats {
    /// `None` for an empty ranking.
    pub fn from_ranking(generation: usize, ranking: &[Candidate]) -> Option<Self> {
        let min = ranking.iter().map(|c| c.score).min()?;
        let max = ranking.iter().map(|c| c.score).max()?;
        let total: u128 = ranking.iter().map(|c| c.score as u128).sum();
        let mean = (total as f64 / ranking.len() as f64).round_ties_even() as u64;
        Some(Self {
            generation,
            min,
            mean,
            max,
        })
    }
}

/// Everything one evolutionary run produced.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionReport {
    /// Statistics recorded at the start of every generation.
    pub history: Vec<GenerationStats>,
    /// Statistics of the population left after the last generation.
    pub final_stats: Option<GenerationStats>,
    pub best: Option<Candidate>,
    pub generations: usize,
}
