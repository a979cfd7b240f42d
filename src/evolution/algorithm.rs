// src/evolution/algorithm.rs

use crate::error::{DispatchError, Result};
use crate::evolution::config::GeneticConfig;
use crate::evolution::population::{build_population, evaluate, Candidate};
use crate::evolution::stats::{EvolutionReport, GenerationStats};
use crate::simulation::config::SimulationParameters;
use crate::simulation::weights::WeightVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Evolves weight vectors for the dispatch heuristic on one scenario.
pub struct GeneticAlgorithm {
    template: SimulationParameters,
    config: GeneticConfig,
    rng: StdRng,
}

impl GeneticAlgorithm {
    /// Fails if the operator settings do not fit the population size.
    pub fn new(template: SimulationParameters, config: GeneticConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { template, config, rng })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Runs every generation and returns the collected statistics and the
    /// best weights found.
    pub fn run(&mut self) -> Result<EvolutionReport> {
        let initial = self.initialize_weights();
        let mut ranking = self.evaluate(&initial);
        let mut history = Vec::with_capacity(self.config.max_generations);

        for generation in 0..self.config.max_generations {
            if let Some(stats) = GenerationStats::from_ranking(generation, &ranking) {
                info!(
                    "Generation {} [min/avr/max]: ({}, {}, {})",
                    generation, stats.min, stats.mean, stats.max
                );
                history.push(stats);
            }

            let next = self.next_generation(&ranking)?;
            ranking = self.evaluate(&next);
        }

        let final_stats = GenerationStats::from_ranking(self.config.max_generations, &ranking);
        let best = ranking.first().copied();

        if let (Some(stats), Some(best)) = (&final_stats, &best) {
            info!(
                "Generation {} [min/avr/max]: ({}, {}, {})",
                stats.generation, stats.min, stats.mean, stats.max
            );
            info!("Weights: {}", best.weights);
        }

        Ok(EvolutionReport {
            history,
            final_stats,
            best,
            generations: self.config.max_generations,
        })
    }

    /// Selection, mutation, crossover and succession on a best-first ranking.
    ///
    /// Errors if succession does not produce exactly `population_size` vectors.
    pub fn next_generation(&mut self, ranking: &[Candidate]) -> Result<Vec<WeightVector>> {
        let size = self.config.population_size;

        let pool = self.config.selection.select(ranking, size, &mut self.rng);
        let mutated = self.config.mutation.mutate(pool, &mut self.rng)?;
        let children = self.config.crossover.crossover(mutated, &mut self.rng);
        let next = self.config.succession.succeed(ranking, children, size);

        if next.len() != size {
            return Err(DispatchError::PopulationSize {
                expected: size,
                actual: next.len(),
            });
        }
        Ok(next)
    }

    fn initialize_weights(&mut self) -> Vec<WeightVector> {
        (0..self.config.population_size)
            .map(|_| WeightVector::random(&mut self.rng, self.config.weight_range))
            .collect()
    }

    fn evaluate(&self, weights: &[WeightVector]) -> Vec<Candidate> {
        evaluate(build_population(&self.template, weights, self.config.stall_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::operators::{Mutation, Succession};

    fn seeded(population_size: usize, max_generations: usize) -> GeneticConfig {
        GeneticConfig {
            population_size,
            max_generations,
            seed: Some(11),
            ..GeneticConfig::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let cfg = GeneticConfig {
            mutation: Mutation::Gaussian { sigma: f64::NAN },
            ..seeded(4, 1)
        };
        assert!(matches!(
            GeneticAlgorithm::new(SimulationParameters::default(), cfg),
            Err(DispatchError::Config(_))
        ));
    }

    #[test]
    fn unbounded_weight_range_is_rejected_up_front() {
        for weight_range in [(f64::NEG_INFINITY, 1.0), (f64::MIN, f64::MAX)] {
            let cfg = GeneticConfig {
                weight_range,
                ..seeded(4, 1)
            };
            assert!(matches!(
                GeneticAlgorithm::new(SimulationParameters::default(), cfg),
                Err(DispatchError::Config(_))
            ));
        }
    }

    #[test]
    fn accepted_config_is_kept() {
        let ga = GeneticAlgorithm::new(SimulationParameters::default(), seeded(6, 2)).unwrap();
        assert_eq!(ga.config().population_size, 6);
        assert_eq!(ga.config().seed, Some(11));
    }

    #[test]
    fn next_generation_has_population_size() {
        let mut ga = GeneticAlgorithm::new(SimulationParameters::default(), seeded(5, 1)).unwrap();
        let ranking: Vec<Candidate> = (0..5)
            .map(|i| Candidate {
                weights: WeightVector::new([i as f64; 5]),
                score: 10 - i,
            })
            .collect();
        assert_eq!(ga.next_generation(&ranking).unwrap().len(), 5);
    }

    #[test]
    fn missing_parents_surface_as_population_size_error() {
        let cfg = GeneticConfig {
            succession: Succession::Generational,
            ..seeded(3, 1)
        };
        let mut ga = GeneticAlgorithm::new(SimulationParameters::default(), cfg).unwrap();
        // Nothing to select from, so nothing to breed
        let err = ga.next_generation(&[]).unwrap_err();
        assert!(matches!(err, DispatchError::PopulationSize { expected: 3, actual: 0 }));
    }

    #[test]
    fn zero_generations_still_reports_the_initial_population() {
        let mut ga = GeneticAlgorithm::new(SimulationParameters::default(), seeded(3, 0)).unwrap();
        let report = ga.run().unwrap();
        assert!(report.history.is_empty());
        assert_eq!(report.final_stats.map(|s| s.generation), Some(0));
        assert!(report.best.is_some());
    }
}
