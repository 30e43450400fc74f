//! The generation loop: genomes are scored by a
//! caller-supplied fitness function, grouped into
//! species by genetic distance, and bred into the
//! next generation in proportion to shared fitness.
mod config;
mod errors;
pub mod logging;
mod offspring_factory;
mod species;

use crate::{Genome, InnovationHistory};
pub use config::{parse_count, parse_probability, parse_real, PopulationConfig};
pub use errors::{BoxError, ConfigError, EvolutionError};
use offspring_factory::{population_champion, OffspringFactory};
pub use species::{Species, SpeciesID};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The result of a full [`Population::evolve`] run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionOutcome<G> {
    /// The best genome seen over the population's lifetime.
    pub best: G,
    /// Best raw fitness of each generation evaluated during the run.
    pub generation_best: Vec<f32>,
}

/// A population of genomes.
///
/// All randomness used during evolution is drawn from a
/// generator seeded with [`PopulationConfig::seed`].
pub struct Population<C, H, G> {
    genomes: Vec<G>,
    species: Vec<Species<G>>,
    history: H,
    generation: usize,
    champion: Option<G>,
    generation_best: Vec<f32>,
    population_config: PopulationConfig,
    genetic_config: C,
    rng: StdRng,
}

impl<C, H, G> Population<C, H, G>
where
    G: Genome<InnovationHistory = H, Config = C>,
    H: InnovationHistory<Config = C>,
{
    /// Builds the initial generation from the two configurations.
    ///
    /// `genetic_config` is only ever handed back to [`Genome`]
    /// methods; the population never inspects it.
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    ///
    /// let pop_config = PopulationConfig {
    ///     size: std::num::NonZeroUsize::new(10).unwrap(),
    ///     ..PopulationConfig::default()
    /// };
    /// # let genetic_config = GeneticConfig::default();
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(pop_config, genetic_config);
    /// assert_eq!(population.genomes().len(), 10);
    /// ```
    pub fn new(population_config: PopulationConfig, genetic_config: C) -> Population<C, H, G> {
        let mut rng = StdRng::seed_from_u64(population_config.seed);
        let mut history = H::new(&genetic_config);
        let genomes = (0..population_config.size.get())
            .map(|_| G::new(&genetic_config, &mut history, &mut rng))
            .collect();
        Population {
            genomes,
            species: vec![],
            history,
            generation: 0,
            champion: None,
            generation_best: vec![],
            population_config,
            genetic_config,
            rng,
        }
    }

    /// Scores every genome with `evaluator`, in order,
    /// storing the result as its raw fitness.
    ///
    /// # Errors
    /// Stops at the first genome for which the evaluator
    /// fails or returns a non-finite value. Genomes before
    /// it keep their newly assigned fitness.
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    /// use std::convert::Infallible;
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::default(),
    ///     genetic_config,
    /// );
    ///
    /// population
    ///     .evaluate_fitness(|g| {
    ///         // Networks with outputs closer to 0 are given higher scores.
    ///         Ok::<_, Infallible>(1.0 - g.forward(&[1.0])[0])
    ///     })
    ///     .unwrap();
    /// ```
    pub fn evaluate_fitness<F, E>(&mut self, mut evaluator: F) -> Result<(), EvolutionError>
    where
        F: FnMut(&G) -> Result<f32, E>,
        E: Into<BoxError>,
    {
        for (index, genome) in self.genomes.iter_mut().enumerate() {
            let fitness = checked_fitness(index, evaluator(genome))?;
            genome.set_fitness(fitness);
        }
        Ok(())
    }

    /// Evaluates the fitness of each genome on the rayon
    /// thread pool. Each worker only touches the fitness
    /// of the genome it evaluates.
    ///
    /// # Errors
    /// Same as [`evaluate_fitness`], except that which failing
    /// genome is reported depends on scheduling.
    ///
    /// [`evaluate_fitness`]: Population::evaluate_fitness
    #[cfg(feature = "parallel")]
    pub fn par_evaluate_fitness<F, E>(&mut self, evaluator: F) -> Result<(), EvolutionError>
    where
        G: Send,
        F: Fn(&G) -> Result<f32, E> + Sync,
        E: Into<BoxError>,
    {
        self.genomes
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, genome)| {
                let fitness = checked_fitness(index, evaluator(genome))?;
                genome.set_fitness(fitness);
                Ok(())
            })
    }

    /// Assigns every genome to a species.
    ///
    /// Genomes are visited in population order and join the
    /// first species whose representative is within the
    /// [distance threshold]; otherwise they found a new species.
    /// Species left without members are dropped.
    ///
    /// If speciation is [disabled], the species list is cleared.
    ///
    /// [distance threshold]: PopulationConfig::distance_threshold
    /// [disabled]: PopulationConfig::use_speciation
    pub fn speciate(&mut self) {
        if !self.population_config.use_speciation {
            self.species.clear();
            return;
        }

        let threshold = self.population_config.distance_threshold;
        let config = &self.genetic_config;
        for species in &mut self.species {
            species.members.clear();
        }

        let mut new_species = 0;
        for (index, genome) in self.genomes.iter().enumerate() {
            match self
                .species
                .iter_mut()
                .find(|s| s.genetic_distance(genome, config) <= threshold)
            {
                Some(species) => species.members.push(index),
                None => {
                    let id = SpeciesID(self.generation, new_species);
                    self.species.push(Species::new(id, index, genome.clone()));
                    new_species += 1;
                }
            }
        }

        self.species.retain(|s| !s.is_empty());
    }

    /// Sets each genome's adjusted fitness to its raw
    /// fitness divided by the size of its species.
    ///
    /// Genomes outside any species (as when speciation
    /// is disabled) keep their raw fitness.
    pub fn share_fitness(&mut self) {
        if self.species.is_empty() {
            for genome in &mut self.genomes {
                genome.set_adjusted_fitness(genome.fitness());
            }
            return;
        }

        for species in &self.species {
            let size = species.len() as f32;
            for &i in species.members() {
                let fitness = self.genomes[i].fitness();
                self.genomes[i].set_adjusted_fitness(fitness / size);
            }
        }
    }

    /// Replaces the population with a new generation.
    ///
    /// The first slot holds a copy of the current best genome.
    /// The rest are bred from parents picked by [species]
    /// or, with speciation disabled, from the top of the
    /// population. Species memberships are cleared, as they
    /// refer to the replaced genomes.
    ///
    /// # Errors
    /// Returns an error if the population is empty.
    ///
    /// [species]: Population::speciate
    pub fn reproduce(&mut self) -> Result<(), EvolutionError> {
        let offspring = OffspringFactory::new(
            &self.genomes,
            &self.species,
            &mut self.history,
            &self.genetic_config,
            &self.population_config,
            &mut self.rng,
        )
        .generate_offspring()
        .ok_or(EvolutionError::EmptyPopulation)?;

        self.genomes = offspring;
        for species in &mut self.species {
            species.members.clear();
        }
        self.generation += 1;
        Ok(())
    }

    /// Runs one round on the current genomes: evaluates,
    /// speciates and shares fitness, then records the
    /// generation's best. Returns the best raw fitness.
    ///
    /// Does not reproduce; call [`reproduce`] to move on
    /// to the next generation.
    ///
    /// # Errors
    /// Returns an error if fitness evaluation fails.
    ///
    /// [`reproduce`]: Population::reproduce
    pub fn evolve_generation<F, E>(&mut self, evaluator: F) -> Result<f32, EvolutionError>
    where
        F: FnMut(&G) -> Result<f32, E>,
        E: Into<BoxError>,
    {
        self.evaluate_fitness(evaluator)?;
        self.speciate();
        self.share_fitness();
        self.record_generation()
    }

    /// Same as [`evolve_generation`], evaluating
    /// fitness on the rayon thread pool.
    ///
    /// # Errors
    /// Returns an error if fitness evaluation fails.
    ///
    /// [`evolve_generation`]: Population::evolve_generation
    #[cfg(feature = "parallel")]
    pub fn par_evolve_generation<F, E>(&mut self, evaluator: F) -> Result<f32, EvolutionError>
    where
        G: Send,
        F: Fn(&G) -> Result<f32, E> + Sync,
        E: Into<BoxError>,
    {
        self.par_evaluate_fitness(evaluator)?;
        self.speciate();
        self.share_fitness();
        self.record_generation()
    }

    /// Evolves the population for the configured
    /// [number of generations], and returns the best genome
    /// found along with each generation's best fitness.
    ///
    /// The final generation is evaluated but not replaced,
    /// so the population can be inspected afterwards. Calling
    /// `evolve` again replaces that generation before going on.
    ///
    /// # Errors
    /// Returns an error if fitness evaluation fails.
    ///
    /// [number of generations]: PopulationConfig::num_generations
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    /// use std::convert::Infallible;
    /// use std::num::NonZeroUsize;
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(20).unwrap(),
    ///         num_generations: NonZeroUsize::new(3).unwrap(),
    ///         ..PopulationConfig::default()
    ///     },
    ///     genetic_config,
    /// );
    ///
    /// let outcome = population
    ///     .evolve(|g| Ok::<_, Infallible>(g.forward(&[1.0; 5]).iter().sum::<f32>()))
    ///     .unwrap();
    /// assert_eq!(outcome.generation_best.len(), 3);
    /// assert_eq!(population.generation(), 2);
    /// ```
    pub fn evolve<F, E>(&mut self, mut evaluator: F) -> Result<EvolutionOutcome<G>, EvolutionError>
    where
        F: FnMut(&G) -> Result<f32, E>,
        E: Into<BoxError>,
    {
        let start = self.generation_best.len();
        for round in 0..self.population_config.num_generations.get() {
            if round > 0 || start > 0 {
                self.reproduce()?;
            }
            self.evolve_generation(&mut evaluator)?;
        }

        let best = self.champion.clone().ok_or(EvolutionError::EmptyPopulation)?;
        Ok(EvolutionOutcome {
            best,
            generation_best: self.generation_best[start..].to_vec(),
        })
    }

    /// Stores the current generation's best fitness, updates
    /// the all-time champion and takes each species' best
    /// member as its representative for the next round.
    fn record_generation(&mut self) -> Result<f32, EvolutionError> {
        let best = population_champion(&self.genomes).ok_or(EvolutionError::EmptyPopulation)?;
        let best = &self.genomes[best];
        let best_fitness = best.fitness();

        if self
            .champion
            .as_ref()
            .map_or(true, |c| best_fitness > c.fitness())
        {
            self.champion = Some(best.clone());
        }
        self.generation_best.push(best_fitness);

        for species in &mut self.species {
            species.refresh(&self.genomes);
        }

        info!(
            "generation {}: best fitness {:.4}, {} species",
            self.generation,
            best_fitness,
            self.species.len()
        );
        Ok(best_fitness)
    }

    /// Resets the population to an initial randomized state,
    /// with a fresh innovation history and the seeded generator
    /// rewound.
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut population = Population::<_, _, G>::new(
    ///     PopulationConfig::default(),
    ///     genetic_config,
    /// );
    ///
    /// population.reproduce().unwrap();
    /// population.reset();
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn reset(&mut self)
    where
        C: Clone,
    {
        *self = Population::new(self.population_config.clone(), self.genetic_config.clone());
    }

    /// Returns the best genome seen so far, across
    /// all recorded generations.
    pub fn champion(&self) -> Option<&G> {
        self.champion.as_ref()
    }

    /// Returns the current genome with the highest raw fitness.
    /// Ties go to the earliest genome.
    pub fn generation_champion(&self) -> Option<&G> {
        population_champion(&self.genomes).map(|i| &self.genomes[i])
    }

    /// Returns the best raw fitness of every recorded generation.
    pub fn generation_best(&self) -> &[f32] {
        &self.generation_best
    }

    /// Returns all current genomes, in population order.
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    ///
    /// # let genetic_config = GeneticConfig::default();
    /// // With `G` a suitable type implementing `Genome`...
    /// let population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    ///
    /// for genome in population.genomes() {
    ///     println!("{}", genome);
    /// }
    /// ```
    pub fn genomes(&self) -> &[G] {
        &self.genomes
    }

    /// Returns an iterator over all current species.
    pub fn species(&self) -> impl Iterator<Item = &Species<G>> {
        self.species.iter()
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population's innovation history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the population's configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the genetic configuration handed to genomes.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }
}

fn checked_fitness<E: Into<BoxError>>(
    index: usize,
    fitness: Result<f32, E>,
) -> Result<f32, EvolutionError> {
    let value = fitness.map_err(|e| EvolutionError::Fitness {
        index,
        source: e.into(),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvolutionError::NonFiniteFitness { index, value })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use rand::Rng;

    use std::convert::Infallible;
    use std::num::NonZeroUsize;

    /// A one-gene genome. Its configuration is the
    /// spread of initial values and mutation steps.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct ScalarGenome {
        pub value: f32,
        pub fitness: f32,
        pub adjusted: f32,
    }

    pub(crate) fn genome(value: f32, fitness: f32) -> ScalarGenome {
        ScalarGenome {
            value,
            fitness,
            adjusted: 0.0,
        }
    }

    #[derive(Debug)]
    pub(crate) struct MutationCount(pub usize);

    impl InnovationHistory for MutationCount {
        type Config = f32;

        fn new(_: &f32) -> MutationCount {
            MutationCount(0)
        }
    }

    impl Genome for ScalarGenome {
        type Config = f32;
        type InnovationHistory = MutationCount;

        fn new<R: Rng + ?Sized>(spread: &f32, _: &mut MutationCount, rng: &mut R) -> Self {
            genome((rng.gen::<f32>() * 2.0 - 1.0) * spread, 0.0)
        }

        fn genetic_distance(first: &Self, second: &Self, _: &f32) -> f32 {
            (first.value - second.value).abs()
        }

        fn crossover<R: Rng + ?Sized>(strong: &Self, weak: &Self, _: &mut R) -> Self {
            genome((strong.value + weak.value) / 2.0, 0.0)
        }

        fn mutate<R: Rng + ?Sized>(
            &mut self,
            history: &mut MutationCount,
            spread: &f32,
            rng: &mut R,
        ) {
            self.value += (rng.gen::<f32>() * 2.0 - 1.0) * spread;
            history.0 += 1;
        }

        fn set_fitness(&mut self, fitness: f32) {
            self.fitness = fitness;
        }

        fn fitness(&self) -> f32 {
            self.fitness
        }

        fn set_adjusted_fitness(&mut self, fitness: f32) {
            self.adjusted = fitness;
        }

        fn adjusted_fitness(&self) -> f32 {
            self.adjusted
        }
    }

    type ScalarPopulation = Population<f32, MutationCount, ScalarGenome>;

    fn config(size: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            num_generations: NonZeroUsize::new(4).unwrap(),
            distance_threshold: 1.0,
            use_speciation: true,
            survival_threshold: 0.5,
            seed: 3,
        }
    }

    fn population_of(values: &[f32], config: PopulationConfig) -> ScalarPopulation {
        let mut population = ScalarPopulation::new(config, 0.0);
        population.genomes = values.iter().map(|&v| genome(v, v)).collect();
        population
    }

    fn closeness(g: &ScalarGenome) -> Result<f32, Infallible> {
        Ok(1.0 / (1.0 + g.value.abs()))
    }

    #[test]
    fn new() {
        let population = ScalarPopulation::new(config(12), 1.0);
        assert_eq!(population.genomes().len(), 12);
        assert_eq!(population.generation(), 0);
        assert_eq!(population.species().count(), 0);
        assert!(population.champion().is_none());
        assert!(population.genomes().iter().all(|g| g.value.abs() <= 1.0));
    }

    #[test]
    fn speciate_partitions_population() {
        let mut population = population_of(&[0.0, 0.5, 3.0, 3.2, 10.0], config(5));
        population.speciate();

        let members: Vec<&[usize]> = population.species().map(|s| s.members()).collect();
        assert_eq!(members, [&[0, 1][..], &[2, 3], &[4]]);

        let mut seen: Vec<usize> = members.concat();
        seen.sort_unstable();
        assert_eq!(seen, (0..5).collect::<Vec<_>>());
    }

    #[test]
    fn speciate_keeps_species_ids() {
        let mut population = population_of(&[0.0, 5.0], config(2));
        population.speciate();
        population.genomes = vec![genome(0.2, 0.0), genome(20.0, 0.0)];
        population.generation = 1;
        population.speciate();

        let ids: Vec<SpeciesID> = population.species().map(|s| s.id()).collect();
        assert_eq!(ids, [SpeciesID(0, 0), SpeciesID(1, 0)]);
    }

    #[test]
    fn share_fitness_divides_by_species_size() {
        let mut population = population_of(&[0.0, 0.5, 3.0, 3.2, 10.0], config(5));
        population.speciate();
        population.share_fitness();

        let adjusted: Vec<f32> = population.genomes().iter().map(|g| g.adjusted).collect();
        assert_eq!(adjusted, [0.0, 0.25, 1.5, 1.6, 10.0]);

        let raw: f32 = population.genomes().iter().map(|g| g.fitness).sum();
        let shared: f32 = population
            .species()
            .map(|s| s.adjusted_fitness(population.genomes()) * s.len() as f32)
            .sum();
        assert!((raw - shared).abs() < 1e-4);
    }

    #[test]
    fn share_fitness_without_speciation() {
        let mut population = population_of(
            &[0.0, 0.5, 3.0],
            PopulationConfig {
                use_speciation: false,
                ..config(3)
            },
        );
        population.speciate();
        population.share_fitness();

        assert_eq!(population.species().count(), 0);
        assert!(population.genomes().iter().all(|g| g.adjusted == g.fitness));
    }

    #[test]
    fn evaluator_errors_are_reported() {
        let mut population = ScalarPopulation::new(config(5), 1.0);
        let mut calls = 0;
        let result = population.evaluate_fitness(|_| {
            calls += 1;
            if calls == 3 {
                Err("simulation crashed")
            } else {
                Ok(1.0)
            }
        });

        match result {
            Err(EvolutionError::Fitness { index, source }) => {
                assert_eq!(index, 2);
                assert_eq!(source.to_string(), "simulation crashed");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_finite_fitness_is_rejected() {
        let mut population = ScalarPopulation::new(config(3), 1.0);
        let result = population.evaluate_fitness(|_| Ok::<_, Infallible>(f32::NAN));
        assert!(matches!(
            result,
            Err(EvolutionError::NonFiniteFitness { index: 0, .. })
        ));
    }

    #[test]
    fn reproduce_keeps_champion_first() {
        let mut population = population_of(&[0.0, 0.5, 3.0, 3.2, 10.0], config(5));
        population.speciate();
        population.share_fitness();
        population.reproduce().unwrap();

        assert_eq!(population.generation(), 1);
        assert_eq!(population.genomes().len(), 5);
        assert_eq!(population.genomes()[0], genome(10.0, 0.0));
        assert!(population.species().all(|s| s.is_empty()));
    }

    #[test]
    fn reproduce_mates_within_species() {
        let mut population = population_of(&[0.0, 0.5, 3.0, 3.5, 10.0], config(40));
        population.speciate();
        population.share_fitness();
        population.reproduce().unwrap();

        // Zero spread: mutation leaves values untouched.
        let allowed = [10.0, 0.25, 3.25];
        for g in population.genomes() {
            assert!(allowed.contains(&g.value), "unexpected child {}", g.value);
        }
        assert_eq!(population.history().0, 39);
    }

    #[test]
    fn reproduce_without_speciation_uses_top_genomes() {
        let values: Vec<f32> = (0..10).map(|v| v as f32).collect();
        let mut population = population_of(
            &values,
            PopulationConfig {
                use_speciation: false,
                survival_threshold: 0.2,
                ..config(10)
            },
        );
        population.speciate();
        population.share_fitness();
        population.reproduce().unwrap();

        for g in population.genomes() {
            assert!([8.0, 8.5, 9.0].contains(&g.value), "unexpected child {}", g.value);
        }
    }

    #[test]
    fn reproduce_with_zero_fitness() {
        let mut population = population_of(&[0.0, 0.0, 5.0, 5.0], config(8));
        for g in &mut population.genomes {
            g.fitness = 0.0;
        }
        population.speciate();
        population.share_fitness();
        population.reproduce().unwrap();
        assert_eq!(population.genomes().len(), 8);

        // Memberships are stale now, so breeding falls
        // back to the whole population.
        population.reproduce().unwrap();
        assert_eq!(population.genomes().len(), 8);
    }

    #[test]
    fn evolve_records_every_generation() {
        let mut population = ScalarPopulation::new(config(20), 1.0);
        let outcome = population.evolve(closeness).unwrap();

        assert_eq!(outcome.generation_best.len(), 4);
        assert_eq!(population.generation(), 3);
        let best = outcome
            .generation_best
            .iter()
            .copied()
            .fold(f32::MIN, f32::max);
        assert_eq!(outcome.best.fitness, best);
        assert_eq!(population.champion(), Some(&outcome.best));
    }

    #[test]
    fn evolve_continues_a_previous_run() {
        let mut population = ScalarPopulation::new(config(20), 1.0);
        population.evolve(closeness).unwrap();
        let outcome = population.evolve(closeness).unwrap();

        assert_eq!(outcome.generation_best.len(), 4);
        assert_eq!(population.generation(), 7);
        assert_eq!(population.generation_best().len(), 8);

        let mut manual = ScalarPopulation::new(config(20), 1.0);
        for round in 0..8 {
            if round > 0 {
                manual.reproduce().unwrap();
            }
            manual.evolve_generation(closeness).unwrap();
        }
        assert_eq!(manual.generation_best(), population.generation_best());
    }

    #[test]
    fn evolve_is_reproducible() {
        let mut first = ScalarPopulation::new(config(20), 1.0);
        let mut second = ScalarPopulation::new(config(20), 1.0);

        let first = first.evolve(closeness).unwrap();
        let second = second.evolve(closeness).unwrap();
        assert_eq!(first.generation_best, second.generation_best);
        assert_eq!(first.best, second.best);
    }

    #[test]
    fn reset() {
        let mut population = ScalarPopulation::new(config(6), 1.0);
        let initial = population.genomes().to_vec();
        population.evolve(closeness).unwrap();
        population.reset();

        assert_eq!(population.generation(), 0);
        assert_eq!(population.genomes(), &initial[..]);
        assert!(population.generation_best().is_empty());
    }
}
