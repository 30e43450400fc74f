//! An implementation of NeuroEvolution of Augmenting Topologies,
//! following the 2002 paper: <http://nn.cs.utexas.edu/keyword?stanley:ec02>
//!
//! The population engine is generic over the `Genome` trait: it drives
//! the generation loop (evaluate, speciate, share fitness, reproduce)
//! without knowing how genomes are laid out. A layered feed-forward
//! genome, with a run-scoped innovation registry, is supplied by the
//! `layerneat-nn` crate.
//!
//! Every random decision is drawn from a single seeded generator owned
//! by the population, so two runs with the same configuration produce
//! the same sequence of generations.
//!
//! # Example usage: Evolution of XOR function approximator, using `layerneat-nn`
//! ```
//! use layerneat::{EvolutionError, Population, PopulationConfig};
//! use layerneat_nn::genomics::{GeneticConfig, LayeredGenome};
//! use std::convert::Infallible;
//! use std::num::NonZeroUsize;
//!
//! fn evaluate_xor(genome: &LayeredGenome) -> Result<f32, Infallible> {
//!     let values = [
//!         ([0.0, 0.0], 0.0),
//!         ([0.0, 1.0], 1.0),
//!         ([1.0, 0.0], 1.0),
//!         ([1.0, 1.0], 0.0),
//!     ];
//!
//!     let error: f32 = values
//!         .iter()
//!         .map(|(input, output)| (genome.forward(input)[0] - output).abs())
//!         .sum();
//!
//!     Ok((4.0 - error).powi(2))
//! }
//!
//! fn main() -> Result<(), EvolutionError> {
//!     let genetic_config = GeneticConfig {
//!         input_count: NonZeroUsize::new(2).unwrap(),
//!         output_count: NonZeroUsize::new(1).unwrap(),
//!         ..GeneticConfig::default()
//!     };
//!
//!     let population_config = PopulationConfig {
//!         size: NonZeroUsize::new(30).unwrap(),
//!         num_generations: NonZeroUsize::new(5).unwrap(),
//!         seed: 7,
//!         ..PopulationConfig::default()
//!     };
//!
//!     let mut population: Population<_, _, LayeredGenome> =
//!         Population::new(population_config, genetic_config);
//!     let outcome = population.evolve(evaluate_xor)?;
//!
//!     assert_eq!(outcome.generation_best.len(), 5);
//!     println!("Best genome: {}", outcome.best);
//!     Ok(())
//! }
//! ```

mod genome;
mod populations;
mod rng;

pub use genome::*;
pub use populations::*;
pub use rng::Chance;
