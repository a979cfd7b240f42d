mod common;

use drone_dispatch_ga::error::DispatchError;
use drone_dispatch_ga::evolution::algorithm::GeneticAlgorithm;
use drone_dispatch_ga::evolution::config::GeneticConfig;
use drone_dispatch_ga::evolution::population::{build_population, evaluate, Candidate};
use drone_dispatch_ga::simulation::config::SimulationParameters;
use drone_dispatch_ga::simulation::engine::StallPolicy;
use drone_dispatch_ga::simulation::weights::WeightVector;
use drone_dispatch_ga::strategy::operators::{Selection, Succession};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(population_size: usize, max_generations: usize, seed: u64) -> GeneticConfig {
    GeneticConfig {
        population_size,
        max_generations,
        seed: Some(seed),
        ..GeneticConfig::default()
    }
}

#[test]
fn evaluation_ranks_best_first() {
    let mut rng = StdRng::seed_from_u64(5);
    let weights: Vec<WeightVector> = (0..12).map(|_| WeightVector::random(&mut rng, (-5.0, 5.0))).collect();

    let ranking = evaluate(build_population(&common::city(), &weights, StallPolicy::Wait));

    assert_eq!(ranking.len(), 12);
    assert!(ranking.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn generation_stats_are_ordered() {
    let mut ga = GeneticAlgorithm::new(common::city(), config(8, 4, 17)).unwrap();
    let report = ga.run().unwrap();

    assert_eq!(report.history.len(), 4);
    assert_eq!(report.generations, 4);
    for (index, stats) in report.history.iter().enumerate() {
        assert_eq!(stats.generation, index);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max, "{stats:?}");
    }

    let best = report.best.expect("non-empty population has a best candidate");
    assert_eq!(Some(best.score), report.final_stats.map(|s| s.max));
}

#[test]
fn elitism_never_loses_the_best_score() {
    let mut ga = GeneticAlgorithm::new(common::city(), config(6, 5, 3)).unwrap();
    let report = ga.run().unwrap();

    // Two elites are re-evaluated on a fresh scenario copy and score the same
    let maxima: Vec<u64> = report
        .history
        .iter()
        .map(|s| s.max)
        .chain(report.final_stats.map(|s| s.max))
        .collect();
    assert!(maxima.windows(2).all(|pair| pair[0] <= pair[1]), "{maxima:?}");
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = GeneticAlgorithm::new(common::city(), config(6, 3, 99)).unwrap().run().unwrap();
    let second = GeneticAlgorithm::new(common::city(), config(6, 3, 99)).unwrap().run().unwrap();

    assert_eq!(first.history, second.history);
    assert_eq!(first.best, second.best);
}

#[test]
fn elite_succession_carries_the_top_weights_unchanged() {
    let cfg = GeneticConfig {
        succession: Succession::Elite { count: 1 },
        ..config(4, 1, 8)
    };
    let mut ga = GeneticAlgorithm::new(SimulationParameters::default(), cfg).unwrap();

    let ranking: Vec<Candidate> = [10, 7, 5, 2]
        .iter()
        .enumerate()
        .map(|(i, &score)| Candidate {
            weights: WeightVector::new([i as f64 + 0.25; 5]),
            score,
        })
        .collect();

    for _ in 0..20 {
        let next = ga.next_generation(&ranking).unwrap();
        assert_eq!(next.len(), 4);
        assert!(next.contains(&ranking[0].weights));
    }
}

#[test]
fn succession_always_fills_the_population() {
    for population_size in [1, 2, 5, 9] {
        for succession in [Succession::Generational, Succession::Elite { count: 1 }] {
            let cfg = GeneticConfig {
                succession,
                selection: Selection::Tournament { size: 2 },
                ..config(population_size, 2, 21)
            };
            let mut ga = GeneticAlgorithm::new(common::city(), cfg).unwrap();
            let report = ga.run().unwrap();
            assert_eq!(report.history.len(), 2);
        }
    }
}

#[test]
fn empty_population_produces_an_empty_report() {
    let mut ga = GeneticAlgorithm::new(common::city(), config(0, 3, 1)).unwrap();
    let report = ga.run().unwrap();

    assert!(report.history.is_empty());
    assert!(report.final_stats.is_none());
    assert!(report.best.is_none());
    assert_eq!(report.generations, 3);
}

#[test]
fn oversized_elite_is_a_configuration_error() {
    let cfg = GeneticConfig {
        succession: Succession::Elite { count: 7 },
        ..config(4, 1, 1)
    };
    let result = GeneticAlgorithm::new(common::city(), cfg);
    assert!(matches!(result, Err(DispatchError::Config(_))));
}
