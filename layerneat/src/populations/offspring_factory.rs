use super::{PopulationConfig, Species};
use crate::Genome;

use log::{debug, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Auxiliary type for offspring generation.
/// Handles all the tasks of generating a population's
/// next generation according to the specified configs.
pub(super) struct OffspringFactory<'a, C, H, G, R: ?Sized> {
    genomes: &'a [G],
    species: Vec<&'a Species<G>>,
    history: &'a mut H,
    genetic_config: &'a C,
    population_config: &'a PopulationConfig,
    rng: &'a mut R,
}

impl<'a, C, H, G, R> OffspringFactory<'a, C, H, G, R>
where
    G: Genome<Config = C, InnovationHistory = H>,
    R: Rng + ?Sized,
{
    /// Species without members are not considered for mating.
    pub(super) fn new(
        genomes: &'a [G],
        species: &'a [Species<G>],
        history: &'a mut H,
        genetic_config: &'a C,
        population_config: &'a PopulationConfig,
        rng: &'a mut R,
    ) -> OffspringFactory<'a, C, H, G, R> {
        OffspringFactory {
            genomes,
            species: species.iter().filter(|s| !s.is_empty()).collect(),
            history,
            genetic_config,
            population_config,
            rng,
        }
    }

    /// Generates a full replacement generation, or `None`
    /// if there are no genomes to breed from.
    ///
    /// The first offspring is always a copy of the
    /// population champion.
    pub(super) fn generate_offspring(mut self) -> Option<Vec<G>> {
        let size = self.population_config.size.get();
        let champion = &self.genomes[population_champion(self.genomes)?];

        let mut offspring = Vec::with_capacity(size);
        offspring.push(G::crossover(champion, champion, self.rng));

        if self.population_config.use_speciation && !self.species.is_empty() {
            self.add_speciated_offspring(&mut offspring, size);
        } else {
            self.add_truncated_offspring(&mut offspring, size);
        }

        Some(offspring)
    }

    /// Fills `offspring` by drawing species in proportion
    /// to their adjusted fitness and mating within them.
    fn add_speciated_offspring(&mut self, offspring: &mut Vec<G>, size: usize) {
        let selector = self.species_selector();
        if selector.is_none() {
            warn!(
                "species adjusted fitness is non-positive, selecting among {} species uniformly",
                self.species.len()
            );
        }

        while offspring.len() < size {
            let species = match &selector {
                Some(selector) => self.species[selector.sample(self.rng)],
                None => self.species[self.rng.gen_range(0..self.species.len())],
            };
            if let Some(child) = self.mate_within(species) {
                offspring.push(child);
            }
        }
    }

    /// Returns a distribution proportional to each species'
    /// total adjusted fitness, or `None` if no species has
    /// positive fitness. Negative totals count as zero.
    fn species_selector(&self) -> Option<WeightedIndex<f32>> {
        let weights: Vec<f32> = self
            .species
            .iter()
            .map(|s| s.adjusted_fitness(self.genomes).max(0.0))
            .collect();
        let total: f32 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }
        WeightedIndex::new(&weights).ok()
    }

    /// Mates the species' champion with another of its members
    /// (or with itself if it is alone), then mutates the child.
    fn mate_within(&mut self, species: &Species<G>) -> Option<G> {
        let strong = species.champion_index(self.genomes)?;
        let weak = if species.len() == 1 {
            strong
        } else {
            let others: Vec<usize> = species
                .members()
                .iter()
                .copied()
                .filter(|&i| i != strong)
                .collect();
            *others.choose(self.rng)?
        };
        debug!(
            "species {:?}: mating genome {} with genome {}",
            species.id(),
            strong,
            weak
        );
        Some(self.breed(strong, weak))
    }

    /// Fills `offspring` by mating random pairs taken from the top
    /// [`survival_threshold`] of the population, ranked by raw fitness.
    ///
    /// [`survival_threshold`]: PopulationConfig::survival_threshold
    fn add_truncated_offspring(&mut self, offspring: &mut Vec<G>, size: usize) {
        let mut ranked: Vec<usize> = (0..self.genomes.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.genomes[b]
                .fitness()
                .total_cmp(&self.genomes[a].fitness())
        });
        let breeders = ((ranked.len() as f32 * self.population_config.survival_threshold).ceil()
            as usize)
            .clamp(1, ranked.len());
        ranked.truncate(breeders);

        while offspring.len() < size {
            let first = ranked[self.rng.gen_range(0..ranked.len())];
            let second = ranked[self.rng.gen_range(0..ranked.len())];
            let (strong, weak) = if self.genomes[second].fitness() > self.genomes[first].fitness() {
                (second, first)
            } else {
                (first, second)
            };
            offspring.push(self.breed(strong, weak));
        }
    }

    fn breed(&mut self, strong: usize, weak: usize) -> G {
        let mut child = G::crossover(&self.genomes[strong], &self.genomes[weak], self.rng);
        child.mutate(self.history, self.genetic_config, self.rng);
        child
    }
}

/// Returns the index of the genome with the highest raw
/// fitness. Ties go to the earliest genome.
pub(super) fn population_champion<G: Genome>(genomes: &[G]) -> Option<usize> {
    (0..genomes.len()).reduce(|best, i| {
        if genomes[i].fitness() > genomes[best].fitness() {
            i
        } else {
            best
        }
    })
}
