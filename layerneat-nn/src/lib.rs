//! # LayerNEAT-NN
//! A layered feed-forward network implementation of the [`layerneat`] crate's `Genome` trait.
//!
//! Provides a [`LayeredGenome`] type usable in `layerneat` `Population`s,
//! which is evaluated directly with [`LayeredGenome::forward`], and the
//! run-scoped [`Registry`] that numbers its structural innovations.
//!
//! [`LayeredGenome`]: crate::genomics::LayeredGenome
//! [`LayeredGenome::forward`]: crate::genomics::LayeredGenome::forward
//! [`Registry`]: crate::genomics::Registry
//!
//! # Example usage: Evolution of XOR function approximator
//! ```
//! use layerneat_nn::{
//!     config,
//!     genomics::LayeredGenome,
//!     NeatPopulation,
//! };
//! use std::convert::Infallible;
//!
//! // Allowed error margin for neural net answers.
//! const ERROR_MARGIN: f32 = 0.3;
//!
//! fn evaluate_xor(genome: &LayeredGenome) -> Result<f32, Infallible> {
//!     let values = [
//!         ([0.0, 0.0], 0.0),
//!         ([0.0, 1.0], 1.0),
//!         ([1.0, 0.0], 1.0),
//!         ([1.0, 1.0], 0.0),
//!     ];
//!
//!     let mut errors = [0.0, 0.0, 0.0, 0.0];
//!     for (i, (input, output)) in values.iter().enumerate() {
//!         errors[i] = (genome.forward(input)[0] - output).abs();
//!         if errors[i] < ERROR_MARGIN {
//!             errors[i] = 0.0;
//!         }
//!     }
//!
//!     Ok((4.0 - errors.iter().copied().sum::<f32>()).powf(2.0))
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (genetic_config, population_config) = config::from_entries([
//!         ("input_nodes", 2.0),
//!         ("output_nodes", 1.0),
//!         ("population_size", 40.0),
//!         ("num_generations", 10.0),
//!         ("new_node_rate", 0.05),
//!         ("compatibility_threshold", 2.0),
//!         ("seed", 42.0),
//!     ])?;
//!
//!     let mut population = NeatPopulation::new(population_config, genetic_config);
//!     let outcome = population.evolve(evaluate_xor)?;
//!
//!     assert_eq!(outcome.generation_best.len(), 10);
//!     assert!(outcome.generation_best.iter().all(|&f| f <= outcome.best.fitness()));
//!     println!("{}", serde_json::to_string(&outcome.best)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod genomics;

/// Connection innovation number.
pub type Innovation = usize;
/// Node identifier. Inputs and outputs take the
/// first ids, hidden nodes are numbered by the
/// [`Registry`](genomics::Registry).
pub type NodeId = usize;

/// A population of [`LayeredGenome`](genomics::LayeredGenome)s.
pub type NeatPopulation =
    layerneat::Population<genomics::GeneticConfig, genomics::Registry, genomics::LayeredGenome>;
