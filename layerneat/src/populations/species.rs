use crate::Genome;

use serde::{Deserialize, Serialize};

/// Identifies a species by the generation it appeared
/// in and its position among the species founded during
/// that generation. The third species founded in
/// generation 5 is `SpeciesID(5, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesID(pub usize, pub usize);

/// A group of genomes lying within
/// [`distance_threshold`] of a shared representative.
///
/// Members are stored as indices into the population's
/// genome list. The representative is a clone, taken
/// from the founder at first and from the best member
/// after every generation.
///
/// [`distance_threshold`]: crate::PopulationConfig::distance_threshold
#[derive(Debug, Clone)]
pub struct Species<G> {
    id: SpeciesID,
    pub(super) members: Vec<usize>,
    representative: G,
    stagnation: usize,
    max_fitness: f32,
}

impl<G: Genome> Species<G> {
    /// Creates a new species with the specified ID,
    /// founded by the genome at `founder` in the population,
    /// which also becomes the representative.
    pub fn new(id: SpeciesID, founder: usize, representative: G) -> Species<G> {
        Species {
            id,
            members: vec![founder],
            representative,
            stagnation: 0,
            max_fitness: f32::MIN,
        }
    }

    pub fn id(&self) -> SpeciesID {
        self.id
    }

    /// The genome new candidates are compared against.
    pub fn representative(&self) -> &G {
        &self.representative
    }

    /// Distance from `other` to the representative.
    pub fn genetic_distance<C>(&self, other: &G, config: &C) -> f32
    where
        G: Genome<Config = C>,
    {
        G::genetic_distance(&self.representative, other, config)
    }

    /// Returns the population indices of the species' members.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns the number of members in the species.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the species has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns an iterator over the species' members,
    /// looked up in `population`.
    pub fn genomes<'a>(&'a self, population: &'a [G]) -> impl Iterator<Item = &'a G> + 'a {
        self.members.iter().map(move |&i| &population[i])
    }

    /// Returns the sum of the members' adjusted fitnesses.
    pub fn adjusted_fitness(&self, population: &[G]) -> f32 {
        self.genomes(population).map(|g| g.adjusted_fitness()).sum()
    }

    /// Returns the sum of the members' raw fitnesses.
    pub fn raw_fitness(&self, population: &[G]) -> f32 {
        self.genomes(population).map(|g| g.fitness()).sum()
    }

    /// Returns the population index of the member with the
    /// highest raw fitness, or `None` if the species is empty.
    /// Ties go to the earliest member.
    pub fn champion_index(&self, population: &[G]) -> Option<usize> {
        self.members.iter().copied().reduce(|best, i| {
            if population[i].fitness() > population[best].fitness() {
                i
            } else {
                best
            }
        })
    }

    /// Returns the best-performing member.
    pub fn champion<'a>(&self, population: &'a [G]) -> Option<&'a G> {
        self.champion_index(population).map(|i| &population[i])
    }

    /// Generations elapsed since the best fitness last improved.
    pub fn time_stagnated(&self) -> usize {
        self.stagnation
    }

    /// Takes the species' best member as the representative
    /// for the next round, and updates the stagnation count.
    pub(super) fn refresh(&mut self, population: &[G]) {
        if let Some(champion) = self.champion(population) {
            if champion.fitness() > self.max_fitness {
                self.max_fitness = champion.fitness();
                self.stagnation = 0;
            } else {
                self.stagnation += 1;
            }
            self.representative = champion.clone();
        }
    }
}
