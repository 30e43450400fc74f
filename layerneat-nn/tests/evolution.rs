use layerneat::{ConfigError, EvolutionError};
use layerneat_nn::{config, genomics::LayeredGenome, NeatPopulation};

use std::convert::Infallible;
use std::fmt;

fn xor_fitness(genome: &LayeredGenome) -> Result<f32, Infallible> {
    let values = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];
    let error: f32 = values
        .iter()
        .map(|(input, output)| (genome.forward(input)[0] - output).abs())
        .sum();
    Ok((4.0 - error).powi(2))
}

fn population(seed: f64, speciation: bool) -> NeatPopulation {
    let (genetic_config, population_config) = config::from_entries([
        ("input_nodes", 2.0),
        ("output_nodes", 1.0),
        ("population_size", 30.0),
        ("num_generations", 8.0),
        ("new_connection_rate", 0.3),
        ("new_node_rate", 0.2),
        ("new_node_layer_rate", 0.1),
        ("compatibility_threshold", 0.8),
        ("use_speciation", if speciation { 1.0 } else { 0.0 }),
        ("seed", seed),
    ])
    .unwrap();
    NeatPopulation::new(population_config, genetic_config)
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut first = population(17.0, true);
    let mut second = population(17.0, true);
    let a = first.evolve(xor_fitness).unwrap();
    let b = second.evolve(xor_fitness).unwrap();

    assert_eq!(a.generation_best, b.generation_best);
    assert_eq!(a.best, b.best);
    assert_eq!(first.genomes(), second.genomes());
    assert_eq!(
        first.history().connection_count(),
        second.history().connection_count()
    );
}

#[test]
fn evolve_reports_every_generation() {
    let mut population = population(3.0, true);
    let outcome = population.evolve(xor_fitness).unwrap();

    assert_eq!(outcome.generation_best.len(), 8);
    assert_eq!(population.generation(), 7);
    let best = outcome
        .generation_best
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(outcome.best.fitness(), best);
    assert_eq!(population.champion(), Some(&outcome.best));
}

#[test]
fn elite_survives_reproduction() {
    let mut population = population(5.0, true);
    population.evolve_generation(xor_fitness).unwrap();
    let best = population.generation_champion().unwrap().clone();
    population.reproduce().unwrap();

    let elite = &population.genomes()[0];
    assert_eq!(elite.connections(), best.connections());
    assert_eq!(elite.hidden_layers(), best.hidden_layers());
}

#[test]
fn speciation_partitions_population() {
    let mut population = population(9.0, true);
    population.evolve(xor_fitness).unwrap();

    let genomes = population.genomes();
    let mut seen = vec![false; genomes.len()];
    for species in population.species() {
        assert!(!species.is_empty());
        for &member in species.members() {
            assert!(!seen[member], "genome {} is in two species", member);
            seen[member] = true;
        }
        let shared = species.adjusted_fitness(genomes) * species.len() as f32;
        let raw = species.raw_fitness(genomes);
        assert!((shared - raw).abs() <= 1e-3 * raw.abs().max(1.0));
    }
    assert!(seen.into_iter().all(|s| s));
}

#[test]
fn without_speciation_adjusted_is_raw() {
    let mut population = population(9.0, false);
    let outcome = population.evolve(xor_fitness).unwrap();

    assert_eq!(outcome.generation_best.len(), 8);
    assert_eq!(population.species().count(), 0);
    for genome in population.genomes() {
        assert_eq!(genome.adjusted_fitness(), genome.fitness());
    }
}

#[derive(Debug)]
struct SimulationFailed;

impl fmt::Display for SimulationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulation failed")
    }
}

impl std::error::Error for SimulationFailed {}

#[test]
fn fitness_callback_errors_stop_evolution() {
    let mut population = population(1.0, true);
    let mut calls = 0;
    let error = population
        .evolve(|_| {
            calls += 1;
            if calls == 4 {
                Err(SimulationFailed)
            } else {
                Ok(1.0)
            }
        })
        .unwrap_err();

    match error {
        EvolutionError::Fitness { index, source } => {
            assert_eq!(index, 3);
            assert_eq!(source.to_string(), "simulation failed");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(population.generation(), 0);
}

#[test]
fn non_finite_fitness_is_rejected() {
    let mut population = population(1.0, true);
    let error = population
        .evolve(|_| Ok::<_, Infallible>(f32::NAN))
        .unwrap_err();
    assert!(matches!(
        error,
        EvolutionError::NonFiniteFitness { index: 0, .. }
    ));
}

#[test]
fn config_errors_surface_before_evolution() {
    assert!(matches!(
        config::from_entries([("population_size", -3.0)]),
        Err(ConfigError::NonPositiveCount { .. })
    ));
    assert!(matches!(
        config::from_entries([("new_node_rate", 2.0)]),
        Err(ConfigError::ProbabilityOutOfRange { key: "new_node_rate", .. })
    ));
    assert!(matches!(
        config::from_entries([("gene_pool", 1.0)]),
        Err(ConfigError::UnknownKey(_))
    ));

    let error: EvolutionError = config::from_entries([("seed", f64::INFINITY)])
        .unwrap_err()
        .into();
    assert!(error.to_string().contains("seed"));
}
