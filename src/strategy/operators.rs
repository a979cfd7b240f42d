// src/strategy/operators.rs

use crate::error::{DispatchError, Result};
use crate::evolution::population::Candidate;
use crate::simulation::weights::{Coefficient, WeightVector};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

// =========================================================================
// 1. Selection
// =========================================================================

/// Picks the reproduction pool from a best-first ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Each slot goes to the best of `size` candidates drawn with replacement.
    Tournament { size: usize },
}

impl Selection {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Selection::Tournament { size: 0 } => Err(DispatchError::Config(
                "tournament size must be at least 1".to_string(),
            )),
            Selection::Tournament { .. } => Ok(()),
        }
    }

    /// Returns `count` parents. `ranking` must be sorted best-first.
    pub fn select<R: Rng + ?Sized>(&self, ranking: &[Candidate], count: usize, rng: &mut R) -> Vec<WeightVector> {
        if ranking.is_empty() {
            return Vec::new();
        }
        match *self {
            Selection::Tournament { size } => (0..count)
                .map(|_| {
                    // Lower index means better rank, so the minimum index wins
                    // and ties go to the better-ranked candidate.
                    let winner = (0..size.max(1))
                        .map(|_| rng.gen_range(0..ranking.len()))
                        .min()
                        .unwrap_or(0);
                    ranking[winner].weights
                })
                .collect(),
        }
    }
}

// =========================================================================
// 2. Mutation
// =========================================================================

/// Perturbs the coefficients of every weight vector in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// Adds zero-mean normal noise with standard deviation `sigma` to each coefficient.
    Gaussian { sigma: f64 },
}

impl Mutation {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Mutation::Gaussian { sigma } if sigma.is_finite() && sigma >= 0.0 => Ok(()),
            Mutation::Gaussian { sigma } => Err(DispatchError::Config(format!(
                "gaussian sigma must be finite and non-negative, got {sigma}"
            ))),
        }
    }

    pub fn mutate<R: Rng + ?Sized>(&self, pool: Vec<WeightVector>, rng: &mut R) -> Result<Vec<WeightVector>> {
        match *self {
            Mutation::Gaussian { sigma } => {
                let noise = Normal::new(0.0, sigma)
                    .map_err(|e| DispatchError::Config(format!("invalid gaussian sigma {sigma}: {e}")))?;
                Ok(pool
                    .into_iter()
                    .map(|mut weights| {
                        for coefficient in Coefficient::ALL {
                            let value = weights.get(coefficient);
                            weights.set(coefficient, value + noise.sample(rng));
                        }
                        weights
                    })
                    .collect())
            }
        }
    }
}

// =========================================================================
// 3. Crossover
// =========================================================================

/// Combines parents into children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CrossOver {
    /// Consecutive parents produce two children by interpolating each
    /// coefficient with a random factor `a`: `a*p1 + (1-a)*p2` and
    /// `(1-a)*p1 + a*p2`. An unpaired last parent passes through.
    #[default]
    Linear,
}

impl CrossOver {
    /// Produces exactly as many children as there are parents.
    pub fn crossover<R: Rng + ?Sized>(&self, pool: Vec<WeightVector>, rng: &mut R) -> Vec<WeightVector> {
        match self {
            CrossOver::Linear => {
                let mut children = Vec::with_capacity(pool.len());
                for pair in pool.chunks(2) {
                    match pair {
                        [first, second] => {
                            let a: f64 = rng.gen();
                            children.push(first.zip_with(second, |x, y| a * x + (1.0 - a) * y));
                            children.push(first.zip_with(second, |x, y| (1.0 - a) * x + a * y));
                        }
                        [single] => children.push(*single),
                        _ => {}
                    }
                }
                children
            }
        }
    }
}

// =========================================================================
// 4. Succession
// =========================================================================

/// Builds the next generation from the previous ranking and the new children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Succession {
    /// The best `count` candidates of the previous ranking survive unchanged,
    /// children fill the remaining slots.
    Elite { count: usize },
    /// Children replace the whole population.
    Generational,
}

impl Succession {
    pub fn validate(&self, population_size: usize) -> Result<()> {
        match *self {
            Succession::Elite { count } if count > population_size => Err(DispatchError::Config(format!(
                "elite count {count} exceeds population size {population_size}"
            ))),
            _ => Ok(()),
        }
    }

    /// Returns up to `population_size` weight vectors. It never pads: fewer
    /// children than free slots yields a shorter generation, which the
    /// caller reports as an error.
    pub fn succeed(&self, previous: &[Candidate], children: Vec<WeightVector>, population_size: usize) -> Vec<WeightVector> {
        let elites = match *self {
            Succession::Elite { count } => count.min(previous.len()).min(population_size),
            Succession::Generational => 0,
        };

        let mut next: Vec<WeightVector> = previous[..elites].iter().map(|c| c.weights).collect();
        next.extend(children.into_iter().take(population_size - elites));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform(value: f64) -> WeightVector {
        WeightVector::new([value; 5])
    }

    fn ranking(scores: &[u64]) -> Vec<Candidate> {
        scores
            .iter()
            .map(|&score| Candidate {
                weights: uniform(score as f64),
                score,
            })
            .collect()
    }

    #[test]
    fn tournament_of_whole_population_always_picks_best() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = Selection::Tournament { size: 64 }.select(&ranking(&[9, 4, 1]), 10, &mut rng);
        assert_eq!(pool.len(), 10);
        // (2/3)^64 chance per slot of never drawing the best
        assert!(pool.iter().all(|w| *w == uniform(9.0)));
    }

    #[test]
    fn tournament_on_empty_ranking_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Selection::Tournament { size: 3 }.select(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn zero_sigma_leaves_weights_unchanged() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = vec![uniform(1.5), uniform(-2.0)];
        let mutated = Mutation::Gaussian { sigma: 0.0 }.mutate(pool.clone(), &mut rng).unwrap();
        assert_eq!(mutated, pool);
    }

    #[test]
    fn gaussian_changes_every_coefficient() {
        let mut rng = StdRng::seed_from_u64(3);
        let mutated = Mutation::Gaussian { sigma: 1.0 }
            .mutate(vec![uniform(0.0)], &mut rng)
            .unwrap();
        assert!(mutated[0].iter().all(|(_, v)| v != 0.0));
    }

    #[test]
    fn negative_sigma_is_rejected() {
        assert!(Mutation::Gaussian { sigma: -1.0 }.validate().is_err());
    }

    #[test]
    fn linear_crossover_interpolates_between_parents() {
        let mut rng = StdRng::seed_from_u64(4);
        let children = CrossOver::Linear.crossover(vec![uniform(0.0), uniform(10.0), uniform(3.0)], &mut rng);

        assert_eq!(children.len(), 3);
        for child in &children[..2] {
            let v = child.get(Coefficient::OrderAmount);
            assert!((0.0..=10.0).contains(&v));
        }
        // Complementary factors keep the pair's sum
        let sum = children[0].get(Coefficient::StockQuantity) + children[1].get(Coefficient::StockQuantity);
        assert!((sum - 10.0).abs() < 1e-9);
        assert_eq!(children[2], uniform(3.0));
    }

    #[test]
    fn elite_succession_keeps_the_best_unchanged() {
        let previous = ranking(&[10, 7, 5, 2]);
        let children = vec![uniform(-1.0); 4];
        let next = Succession::Elite { count: 1 }.succeed(&previous, children, 4);

        assert_eq!(next.len(), 4);
        assert_eq!(next[0], uniform(10.0));
        assert!(next[1..].iter().all(|w| *w == uniform(-1.0)));
    }

    #[test]
    fn succession_does_not_pad_short_children() {
        let previous = ranking(&[10, 7, 5, 2]);
        let next = Succession::Generational.succeed(&previous, vec![uniform(0.0)], 4);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn elite_count_above_population_is_rejected() {
        assert!(Succession::Elite { count: 5 }.validate(4).is_err());
        assert!(Succession::Elite { count: 4 }.validate(4).is_ok());
    }
}
