use rand::Rng;

/// An interface for genomes that can be evolved by a [`Population`].
///
/// [`Population`]: crate::Population
pub trait Genome: Clone {
    type Config;
    type InnovationHistory: InnovationHistory<Config = Self::Config>;

    /// Returns a fresh genome, registering its initial
    /// structure in `history`.
    fn new<R: Rng + ?Sized>(
        config: &Self::Config,
        history: &mut Self::InnovationHistory,
        rng: &mut R,
    ) -> Self;

    /// Returns the compatibility distance between two genomes.
    /// Must be symmetric and zero for identical genomes.
    fn genetic_distance(first: &Self, second: &Self, config: &Self::Config) -> f32;

    /// Combines two genomes and returns their offspring.
    ///
    /// The caller guarantees that `strong` is the fitness-dominant
    /// parent; implementations are free to favour its structure.
    fn crossover<R: Rng + ?Sized>(strong: &Self, weak: &Self, rng: &mut R) -> Self;

    /// Applies one round of mutation operators to the genome.
    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    );

    /// Sets the genome's raw fitness value.
    fn set_fitness(&mut self, fitness: f32);

    /// Returns the genome's raw fitness value.
    fn fitness(&self) -> f32;

    /// Sets the genome's species-size adjusted fitness.
    fn set_adjusted_fitness(&mut self, fitness: f32);

    /// Returns the genome's species-size adjusted fitness.
    fn adjusted_fitness(&self) -> f32;
}

/// An Innovation History is used to keep track
/// of structural innovations throughout successive
/// generations of genomes, so that genomes of
/// different lineages can be aligned.
///
/// One history is scoped to one run. It must never be
/// reset while the run is in progress.
pub trait InnovationHistory {
    type Config;

    fn new(config: &Self::Config) -> Self;
}
