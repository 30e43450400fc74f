use layerneat::{logging::Stats, EvolutionError, PopulationConfig};
use layerneat_nn::config;
use layerneat_nn::genomics::{GeneticConfig, LayeredGenome};
use layerneat_nn::NeatPopulation;

use log::{info, warn};
use rayon::prelude::*;

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::error::Error;
use std::{env, fs};

// Allowed error margin for neural net answers.
const ERROR_MARGIN: f32 = 0.3;
const SOLVED_FITNESS: f32 = 16.0;
const STRESS_RUNS: u64 = 200;

const XOR_TABLE: [([f32; 2], f32); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

fn evaluate_xor(genome: &LayeredGenome) -> Result<f32, Infallible> {
    let mut errors = [0.0, 0.0, 0.0, 0.0];
    for (i, (input, output)) in XOR_TABLE.iter().enumerate() {
        errors[i] = (genome.forward(input)[0] - output).abs();
        if errors[i] < ERROR_MARGIN {
            errors[i] = 0.0;
        }
    }

    Ok((4.0 - errors.iter().copied().sum::<f32>()).powf(2.0))
}

/// Usage: `xor [run|stress] [config.ron]`
///
/// The optional configuration file holds a RON map of
/// numeric settings, e.g. `{"population_size": 150.0, "seed": 3.0}`.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "run".to_string());
    let (genetic_config, population_config) = config::from_entries(load_entries(args.next())?)?;

    match mode.as_str() {
        "run" => run(genetic_config, population_config),
        "stress" => stress_test(&genetic_config, &population_config),
        other => Err(format!("unknown mode `{}`, expected `run` or `stress`", other).into()),
    }
}

fn load_entries(path: Option<String>) -> Result<BTreeMap<String, f64>, Box<dyn Error>> {
    let mut entries: BTreeMap<String, f64> = [
        ("input_nodes", 2.0),
        ("output_nodes", 1.0),
        ("population_size", 150.0),
        ("num_generations", 300.0),
        ("new_connection_rate", 0.1),
        ("new_node_rate", 0.05),
        ("new_node_layer_rate", 0.05),
        ("compatibility_threshold", 1.0),
        ("population_cut", 0.5),
    ]
    .iter()
    .map(|&(key, value)| (key.to_string(), value))
    .collect();

    if let Some(path) = path {
        let text = fs::read_to_string(&path)?;
        let overrides: BTreeMap<String, f64> = ron::from_str(&text)?;
        info!("read {} settings from {}", overrides.len(), path);
        entries.extend(overrides);
    }
    Ok(entries)
}

fn run(genetic_config: GeneticConfig, population_config: PopulationConfig) -> Result<(), Box<dyn Error>> {
    let mut population = NeatPopulation::new(population_config, genetic_config);
    match evolve_until_solved(&mut population)? {
        Some(generation) => info!("solved at generation {}", generation),
        None => warn!(
            "not solved after {} generations",
            population.generation_best().len()
        ),
    }

    let champion = population
        .champion()
        .ok_or(EvolutionError::EmptyPopulation)?;
    println!("{}", champion);
    for (input, expected) in XOR_TABLE.iter() {
        println!(
            "{:?} -> {:.3} (expected {})",
            input,
            champion.forward(input)[0],
            expected
        );
    }
    println!("{}", ron::to_string(champion)?);
    Ok(())
}

/// Runs the population until a genome reaches full fitness, and
/// returns the generation it was found at, or `None` if the
/// configured number of generations ran out first.
fn evolve_until_solved(population: &mut NeatPopulation) -> Result<Option<usize>, EvolutionError> {
    let generations = population.population_config().num_generations.get();
    for round in 0..generations {
        if round > 0 {
            population.reproduce()?;
        }
        #[cfg(feature = "parallel")]
        let best = population.par_evolve_generation(evaluate_xor)?;
        #[cfg(not(feature = "parallel"))]
        let best = population.evolve_generation(evaluate_xor)?;

        if best >= SOLVED_FITNESS {
            return Ok(Some(population.generation()));
        }
    }
    Ok(None)
}

/// Solves XOR once per seed, spread over the rayon
/// thread pool, and reports how long it took.
fn stress_test(
    genetic_config: &GeneticConfig,
    population_config: &PopulationConfig,
) -> Result<(), Box<dyn Error>> {
    let generations = (0..STRESS_RUNS)
        .into_par_iter()
        .map(|seed| {
            let population_config = PopulationConfig {
                seed,
                ..population_config.clone()
            };
            let mut population = NeatPopulation::new(population_config, genetic_config.clone());
            evolve_until_solved(&mut population)
        })
        .collect::<Result<Vec<_>, EvolutionError>>()?;

    let failures = generations.iter().filter(|g| g.is_none()).count();
    println!(
        "Successful run generation count {}, {}% failure rate over {} runs",
        Stats::summarize(generations.iter().flatten().map(|&g| g as f32)),
        failures as f32 * 100.0 / STRESS_RUNS as f32,
        STRESS_RUNS
    );
    Ok(())
}
