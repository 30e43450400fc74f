//! Layered feed-forward genomes and their genetic operators.
//! A [`LayeredGenome`] is a collection of nodes arranged in
//! layers and of connections between them, which is evaluated
//! as a feed-forward neural network. Genomes can be progressively
//! mutated, thus adding complexity and functionality.
//!
//! Every connection goes from a node to a node on a strictly
//! later layer, so the network is always acyclic.

mod alignment;
mod config;
mod genes;
mod history;
mod mutation;
mod network;
mod nodes;

pub use config::GeneticConfig;
pub use genes::Connection;
pub use history::{NodeOrigin, Registry};
pub use mutation::NodeAddition;
pub use nodes::{ActivationType, Node, NodeRole};

use crate::{Innovation, NodeId};
use network::IncomingIndex;

use ahash::RandomState;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// A mutable collection of layered nodes and connections.
///
/// Connections are kept sorted by innovation number.
/// Suports Serde for convenient genome saving and loading;
/// the incoming-connection cache is not serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayeredGenome {
    inputs: Vec<Node>,
    outputs: Vec<Node>,
    hidden_layers: Vec<Vec<Node>>,
    connections: Vec<Connection>,
    #[serde(skip)]
    incoming: OnceCell<IncomingIndex>,
    fitness: f32,
    adjusted_fitness: f32,
}

impl LayeredGenome {
    /// Builds a minimal genome for `config`.
    ///
    /// Every input is connected to every output, with
    /// uniformly random weights in `[-1, 1]`. There are no
    /// hidden layers.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut registry = Registry::new(&config);
    /// let mut rng = StdRng::seed_from_u64(0);
    ///
    /// let genome = LayeredGenome::new(&config, &mut registry, &mut rng);
    ///
    /// assert_eq!(genome.node_count(), 3 + 2);
    /// assert_eq!(genome.connections().len(), 3 * 2);
    /// assert!(genome.connections().iter().all(|c| c.weight().abs() <= 1.0));
    /// // Initial connections have innovation numbers in the range (0..6).
    /// assert!(genome.connections().iter().all(|c| (0..3 * 2).contains(&c.innovation())));
    /// ```
    pub fn new<R: Rng + ?Sized>(
        config: &GeneticConfig,
        registry: &mut Registry,
        rng: &mut R,
    ) -> LayeredGenome {
        let (input_count, output_count) = (config.input_count.get(), config.output_count.get());
        let inputs: Vec<Node> = (0..input_count).map(Node::input).collect();
        let outputs: Vec<Node> = (input_count..input_count + output_count)
            .map(|id| Node::output(id, config.output_activation))
            .collect();

        let mut connections = Vec::with_capacity(input_count * output_count);
        for input in &inputs {
            for output in &outputs {
                let innovation = registry.connection_innovation(input.id(), output.id());
                let weight = Connection::random_weight(rng);
                connections.push(Connection::new(innovation, input.id(), output.id(), weight));
            }
        }
        connections.sort_unstable_by_key(Connection::innovation);

        LayeredGenome {
            inputs,
            outputs,
            hidden_layers: vec![],
            connections,
            incoming: OnceCell::new(),
            fitness: 0.0,
            adjusted_fitness: 0.0,
        }
    }

    /// Returns the input nodes, in input order.
    pub fn inputs(&self) -> &[Node] {
        &self.inputs
    }

    /// Returns the output nodes, in output order.
    pub fn outputs(&self) -> &[Node] {
        &self.outputs
    }

    /// Returns the hidden layers, from the
    /// closest to the inputs onwards.
    pub fn hidden_layers(&self) -> &[Vec<Node>] {
        &self.hidden_layers
    }

    /// Returns an iterator over every node in the genome,
    /// in evaluation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inputs
            .iter()
            .chain(self.hidden_layers.iter().flatten())
            .chain(&self.outputs)
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inputs.len()
            + self.outputs.len()
            + self.hidden_layers.iter().map(Vec::len).sum::<usize>()
    }

    /// Returns whether the genome has a node with the given id.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes().any(|n| n.id() == id)
    }

    /// Returns all connections, enabled or not,
    /// sorted by innovation number.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns an iterator over the enabled connections,
    /// sorted by innovation number.
    pub fn enabled_connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(|c| c.enabled())
    }

    /// Returns the connection with the given innovation number.
    pub fn connection(&self, innovation: Innovation) -> Option<&Connection> {
        self.connection_index(innovation)
            .map(|i| &self.connections[i])
    }

    /// Sets the weight of the connection with the given innovation
    /// number, and returns its previous weight.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut registry = Registry::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut StdRng::seed_from_u64(0));
    ///
    /// assert!(genome.set_weight(0, 0.5).is_some());
    /// assert_eq!(genome.connection(0).unwrap().weight(), 0.5);
    /// assert_eq!(genome.set_weight(99, 0.5), None);
    /// ```
    pub fn set_weight(&mut self, innovation: Innovation, weight: f32) -> Option<f32> {
        let i = self.connection_index(innovation)?;
        let previous = self.connections[i].weight();
        self.connections[i].set_weight(weight);
        Some(previous)
    }

    /// Returns the enabled connections arriving at `node`,
    /// along with their source nodes.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Connection)> {
        self.incoming_index()
            .sources(node)
            .iter()
            .map(move |&(source, i)| (source, &self.connections[i]))
    }

    /// Returns the compatibility distance between two genomes.
    ///
    /// Only enabled connections are compared. Non-matching
    /// connections (disjoint and excess alike) count with
    /// [`disjoint_coefficient`], normalized by the larger
    /// enabled connection count; the average weight difference
    /// of matching connections counts with [`weight_coefficient`].
    ///
    /// [`disjoint_coefficient`]: GeneticConfig::disjoint_coefficient
    /// [`weight_coefficient`]: GeneticConfig::weight_coefficient
    pub fn compatibility_distance(
        first: &LayeredGenome,
        second: &LayeredGenome,
        config: &GeneticConfig,
    ) -> f32 {
        alignment::compatibility_distance(first, second, config)
    }

    /// Returns the genome's raw fitness.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Returns the genome's species-adjusted fitness.
    pub fn adjusted_fitness(&self) -> f32 {
        self.adjusted_fitness
    }

    /// Index of the output layer. Inputs sit on layer -1.
    fn output_layer(&self) -> isize {
        self.hidden_layers.len() as isize
    }

    /// Returns the nodes on `layer`, with -1 designating
    /// the inputs and [`output_layer`] the outputs.
    ///
    /// [`output_layer`]: LayeredGenome::output_layer
    fn layer_nodes(&self, layer: isize) -> &[Node] {
        match layer {
            -1 => &self.inputs,
            l if l == self.output_layer() => &self.outputs,
            l => match self.hidden_layers.get(l as usize) {
                Some(nodes) => nodes,
                None => &[],
            },
        }
    }

    /// Maps every node to its layer.
    fn layer_map(&self) -> HashMap<NodeId, isize, RandomState> {
        let output_layer = self.output_layer();
        self.inputs
            .iter()
            .map(|n| (n.id(), -1))
            .chain(self.outputs.iter().map(|n| (n.id(), output_layer)))
            .chain(
                self.hidden_layers
                    .iter()
                    .enumerate()
                    .flat_map(|(l, nodes)| nodes.iter().map(move |n| (n.id(), l as isize))),
            )
            .collect()
    }

    fn connection_index(&self, innovation: Innovation) -> Option<usize> {
        self.connections
            .binary_search_by_key(&innovation, Connection::innovation)
            .ok()
    }

    fn has_connection(&self, from: NodeId, to: NodeId) -> bool {
        self.connections.iter().any(|c| c.endpoints() == (from, to))
    }

    /// Inserts a connection, keeping innovation order.
    fn insert_connection(&mut self, connection: Connection) {
        let i = self
            .connections
            .partition_point(|c| c.innovation() < connection.innovation());
        self.connections.insert(i, connection);
        self.invalidate();
    }

    fn incoming_index(&self) -> &IncomingIndex {
        self.incoming
            .get_or_init(|| IncomingIndex::build(&self.connections))
    }

    /// Drops the incoming-connection cache after a structural change.
    fn invalidate(&mut self) {
        self.incoming.take();
    }
}

impl layerneat::Genome for LayeredGenome {
    type Config = GeneticConfig;
    type InnovationHistory = Registry;

    fn new<R: Rng + ?Sized>(config: &GeneticConfig, history: &mut Registry, rng: &mut R) -> Self {
        LayeredGenome::new(config, history, rng)
    }

    fn genetic_distance(first: &Self, second: &Self, config: &GeneticConfig) -> f32 {
        alignment::compatibility_distance(first, second, config)
    }

    fn crossover<R: Rng + ?Sized>(strong: &Self, weak: &Self, rng: &mut R) -> Self {
        alignment::crossover(strong, weak, rng)
    }

    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut Registry,
        config: &GeneticConfig,
        rng: &mut R,
    ) {
        mutation::mutate(self, history, config, rng)
    }

    fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    fn fitness(&self) -> f32 {
        self.fitness
    }

    fn set_adjusted_fitness(&mut self, fitness: f32) {
        self.adjusted_fitness = fitness;
    }

    fn adjusted_fitness(&self) -> f32 {
        self.adjusted_fitness
    }
}

impl PartialEq for LayeredGenome {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.hidden_layers == other.hidden_layers
            && self.connections == other.connections
            && self.fitness == other.fitness
            && self.adjusted_fitness == other.adjusted_fitness
    }
}

impl fmt::Display for LayeredGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |nodes: &[Node]| {
            nodes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "LayeredGenome (fitness {:.4}):", self.fitness)?;
        writeln!(f, "  inputs: [{}]", list(&self.inputs))?;
        for (l, layer) in self.hidden_layers.iter().enumerate() {
            writeln!(f, "  hidden {}: [{}]", l, list(layer))?;
        }
        writeln!(f, "  outputs: [{}]", list(&self.outputs))?;
        write!(
            f,
            "  connections: [{}]",
            self.connections
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
