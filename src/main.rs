use anyhow::Context;
use drone_dispatch_ga::evolution::algorithm::GeneticAlgorithm;
use drone_dispatch_ga::evolution::config::GeneticConfig;
use drone_dispatch_ga::io::{reporting, scenario};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: drone-dispatch-ga <scenario> [population] [generations] [output-dir]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. SETUP CONFIGURATION
    // Environment first, positional arguments override it.
    let args: Vec<String> = env::args().skip(1).collect();
    let scenario_path = args.first().context(USAGE)?;

    let mut config = GeneticConfig::from_env();
    if let Some(raw) = args.get(1) {
        config.population_size = raw.parse().with_context(|| format!("invalid population size '{raw}'"))?;
    }
    if let Some(raw) = args.get(2) {
        config.max_generations = raw.parse().with_context(|| format!("invalid generation count '{raw}'"))?;
    }
    let output_dir = args.get(3).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    // 2. LOAD SCENARIO
    let template = scenario::load_scenario(scenario_path)
        .with_context(|| format!("failed to load scenario '{scenario_path}'"))?;
    info!(
        drones = template.drones.len(),
        warehouses = template.warehouses.len(),
        orders = template.orders.len(),
        units = template.total_demand(),
        turns = template.max_turns,
        "Scenario loaded"
    );

    // 3. EVOLVE
    let mut algorithm = GeneticAlgorithm::new(template, config)?;
    let config = algorithm.config();
    info!(
        "Genetic algorithm (pop={}/succession={:?}/mutation={:?}/cross-over={:?}/selection={:?})",
        config.population_size, config.succession, config.mutation, config.crossover, config.selection
    );
    let report = algorithm.run()?;

    // 4. EXPORT RESULTS
    std::fs::create_dir_all(&output_dir)?;
    reporting::write_generation_history(output_dir.join("generation_history.csv"), &report.history)?;
    reporting::write_summary(output_dir.join("summary.json"), &report)?;

    match &report.best {
        Some(best) => info!("Best score {} after {} generations: {}", best.score, report.generations, best.weights),
        None => info!("Empty population, nothing to report"),
    }
    Ok(())
}
