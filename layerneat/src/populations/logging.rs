//! In-memory snapshots of a population's progress.
//!
//! These complement the `log` records emitted during
//! evolution: a [`EvolutionLogger`] keeps its snapshots
//! so that a run can be inspected or serialized afterwards.

use super::{Population, SpeciesID};
use crate::genome::{Genome, InnovationHistory};

use serde::{Deserialize, Serialize};

use std::fmt;

/// How many genomes a snapshot clones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingLevel {
    /// Every genome, grouped by species.
    AllGenomes,
    /// The best member of each species.
    SpeciesChampions,
    /// The generation's best genome.
    GenerationChampion,
    /// No genomes, only statistics.
    StatsOnly,
}

/// The genomes kept by a snapshot,
/// according to its [`ReportingLevel`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GenomeSample<G> {
    AllGenomes(Vec<(SpeciesID, Vec<G>)>),
    SpeciesChampions(Vec<(SpeciesID, G)>),
    GenerationChampion(G),
    None,
}

/// Summary of one species at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub id: SpeciesID,
    pub size: usize,
    pub stagnation: usize,
    pub best_fitness: f32,
}

/// A snapshot of a population after a generation was evaluated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Log<G> {
    pub generation: usize,
    pub best_fitness: f32,
    pub species: Vec<SpeciesSummary>,
    pub stats: Vec<(String, Stats)>,
    pub sample: GenomeSample<G>,
}

impl<G> Log<G> {
    /// Returns the number of species alive at snapshot time.
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Returns the statistics recorded under `name`.
    pub fn stat(&self, name: &str) -> Option<&Stats> {
        self.stats
            .iter()
            .find(|(stat, _)| stat == name)
            .map(|(_, stats)| stats)
    }
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "generation {} (best {:.4}, {} species)",
            self.generation,
            self.best_fitness,
            self.species_count()
        )?;
        for s in &self.species {
            writeln!(
                f,
                "  species {:?}: {} members, best {:.4}, stagnant for {}",
                s.id, s.size, s.best_fitness, s.stagnation
            )?;
        }
        for (name, stats) in &self.stats {
            writeln!(f, "  {}: {}", name, stats)?;
        }
        Ok(())
    }
}

/// Order statistics over a sequence of values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Summarizes a sequence of values.
    /// An empty sequence yields all zeros.
    ///
    /// # Examples
    /// ```
    /// use layerneat::logging::Stats;
    ///
    /// let stats = Stats::summarize([-2.0, -1.0, 0.5, 1.0, 1.5]);
    /// assert_eq!((stats.minimum, stats.maximum), (-2.0, 1.5));
    /// assert_eq!((stats.mean, stats.median), (0.0, 0.5));
    ///
    /// let stats = Stats::summarize([4.0, 1.0, 3.0, 2.0]);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    pub fn summarize(values: impl IntoIterator<Item = f32>) -> Stats {
        let mut values: Vec<f32> = values.into_iter().collect();
        values.sort_unstable_by(f32::total_cmp);

        let (minimum, maximum) = match (values.first(), values.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => {
                return Stats {
                    maximum: 0.0,
                    minimum: 0.0,
                    mean: 0.0,
                    median: 0.0,
                }
            }
        };
        let half = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[half - 1] + values[half]) / 2.0
        } else {
            values[half]
        };
        Stats {
            maximum,
            minimum,
            mean: values.iter().sum::<f32>() / values.len() as f32,
            median,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max {:.4}, min {:.4}, mean {:.4}, median {:.4}",
            self.maximum, self.minimum, self.mean, self.median
        )
    }
}

/// Records a [`Log`] per call, cloning genomes
/// according to its [`ReportingLevel`].
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    level: ReportingLevel,
    snapshots: Vec<Log<G>>,
}

impl<G: Genome> EvolutionLogger<G> {
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::LayeredGenome as G;
    /// use layerneat::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::StatsOnly);
    /// assert!(logger.last().is_none());
    /// ```
    pub fn new(level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            level,
            snapshots: vec![],
        }
    }

    /// Takes a snapshot of `population`.
    ///
    /// Each genome is passed through `extract`, and the
    /// statistics of every resulting column are stored
    /// under the matching entry of `names`.
    ///
    /// Call it after [`Population::evolve_generation`], while
    /// species memberships still match the current genomes.
    ///
    /// # Examples
    /// ```
    /// # use layerneat_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use layerneat::{Population, PopulationConfig};
    /// use layerneat::logging::{EvolutionLogger, ReportingLevel};
    /// use std::convert::Infallible;
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = EvolutionLogger::<G>::new(ReportingLevel::StatsOnly);
    /// # let genetic_config = GeneticConfig::default();
    /// let mut population = Population::<_, _, G>::new(PopulationConfig::default(), genetic_config);
    ///
    /// population
    ///     .evolve_generation(|g| Ok::<_, Infallible>(g.forward(&[0.5])[0]))
    ///     .unwrap();
    /// logger.log(&population, &|g| [g.fitness(), g.node_count() as f32], ["fitness", "nodes"]);
    ///
    /// let snapshot = logger.last().unwrap();
    /// assert_eq!(snapshot.stat("nodes").unwrap().minimum, 9.0);
    /// ```
    pub fn log<C, H, X, const N: usize>(
        &mut self,
        population: &Population<C, H, G>,
        extract: &X,
        names: [&str; N],
    ) where
        H: InnovationHistory<Config = C>,
        G: Genome<InnovationHistory = H, Config = C>,
        X: Fn(&G) -> [f32; N],
    {
        let genomes = population.genomes();
        let mut columns: Vec<Vec<f32>> = vec![Vec::with_capacity(genomes.len()); N];
        for row in genomes.iter().map(extract) {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        let stats = names
            .iter()
            .map(|name| name.to_string())
            .zip(columns.into_iter().map(Stats::summarize))
            .collect();

        let species = population
            .species()
            .map(|s| SpeciesSummary {
                id: s.id(),
                size: s.len(),
                stagnation: s.time_stagnated(),
                best_fitness: s.champion(genomes).map_or(0.0, |g| g.fitness()),
            })
            .collect();

        let sample = match self.level {
            ReportingLevel::AllGenomes => GenomeSample::AllGenomes(
                population
                    .species()
                    .map(|s| (s.id(), s.genomes(genomes).cloned().collect()))
                    .collect(),
            ),
            ReportingLevel::SpeciesChampions => GenomeSample::SpeciesChampions(
                population
                    .species()
                    .filter_map(|s| Some((s.id(), s.champion(genomes)?.clone())))
                    .collect(),
            ),
            ReportingLevel::GenerationChampion => population
                .generation_champion()
                .map_or(GenomeSample::None, |g| GenomeSample::GenerationChampion(g.clone())),
            ReportingLevel::StatsOnly => GenomeSample::None,
        };

        self.snapshots.push(Log {
            generation: population.generation(),
            best_fitness: population.generation_champion().map_or(0.0, |g| g.fitness()),
            species,
            stats,
            sample,
        });
    }

    /// Iterates over all snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.snapshots.iter()
    }

    /// Returns the most recent snapshot.
    pub fn last(&self) -> Option<&Log<G>> {
        self.snapshots.last()
    }
}
