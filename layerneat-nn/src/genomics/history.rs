use crate::genomics::GeneticConfig;
use crate::{Innovation, NodeId};

use ahash::RandomState;
use layerneat::InnovationHistory;
use log::debug;
use serde::{Deserialize, Serialize};

use std::collections::hash_map::{Entry, HashMap};

/// The structural event that created a hidden node.
///
/// Two genomes that undergo the same event are given
/// the same node, which is what allows the connections
/// attached to it to be aligned afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeOrigin {
    /// The node was inserted into `layer` by splitting
    /// the connection with the given innovation number.
    Split { connection: Innovation, layer: usize },
    /// The node was inserted into `layer` without a
    /// connection to split, when the layer already held
    /// `ordinal` hidden nodes.
    Unconnected { layer: usize, ordinal: usize },
}

/// A `Registry` keeps track of connection and node innovations
/// during a run, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// Connections are identified by their endpoints, and nodes
/// by their [`NodeOrigin`]. Since hidden node identifiers are
/// themselves handed out here, endpoints mean the same thing
/// in every genome of the run.
///
/// A registry must live as long as the run it serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    next_innovation: Innovation,
    next_node: NodeId,
    connection_innovations: HashMap<(NodeId, NodeId), Innovation, RandomState>,
    node_innovations: HashMap<NodeOrigin, NodeId, RandomState>,
}

impl InnovationHistory for Registry {
    type Config = GeneticConfig;

    fn new(config: &GeneticConfig) -> Registry {
        Self::new(config)
    }
}

impl Registry {
    /// Creates a new Registry using the specified configuration.
    ///
    /// Input nodes are numbered `0..input_count`, and output nodes
    /// follow them. Initial connections are given the innovation
    /// number `o + i ⨯ output_count`, where `i` is the index of
    /// their input node and `o` that of their output node.
    /// Thus, new connection innovation numbers start at
    /// `input_count ⨯ output_count`.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, Registry};
    ///
    /// let config = GeneticConfig::default();
    /// let mut registry = Registry::new(&config);
    ///
    /// // Input 1 to output 2 (node 5 + 2 = 7).
    /// assert_eq!(registry.connection_innovation(1, 7), 2 + 1 * 4);
    /// assert_eq!(registry.connection_count(), 5 * 4);
    /// ```
    pub fn new(config: &GeneticConfig) -> Registry {
        let (inputs, outputs) = (config.input_count.get(), config.output_count.get());
        let connection_innovations = (0..inputs)
            .flat_map(|i| (0..outputs).map(move |o| ((i, inputs + o), o + i * outputs)))
            .collect();
        Registry {
            next_innovation: inputs * outputs,
            next_node: inputs + outputs,
            connection_innovations,
            node_innovations: HashMap::default(),
        }
    }

    /// Returns the innovation number of the connection
    /// between `from` and `to`, registering it if it
    /// had not been seen before.
    pub fn connection_innovation(&mut self, from: NodeId, to: NodeId) -> Innovation {
        match self.connection_innovations.entry((from, to)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let innovation = self.next_innovation;
                self.next_innovation += 1;
                debug!("new connection innovation {}: {} -> {}", innovation, from, to);
                *entry.insert(innovation)
            }
        }
    }

    /// Returns the node created by `origin`, registering
    /// a new one if it had not been seen before.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, NodeOrigin, Registry};
    ///
    /// let mut registry = Registry::new(&GeneticConfig::default());
    /// let origin = NodeOrigin::Split { connection: 3, layer: 0 };
    ///
    /// let node = registry.node_innovation(origin);
    /// assert_eq!(node, 9);
    /// assert_eq!(registry.node_innovation(origin), node);
    /// ```
    pub fn node_innovation(&mut self, origin: NodeOrigin) -> NodeId {
        match self.node_innovations.entry(origin) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let node = self.next_node;
                self.next_node += 1;
                debug!("new node innovation {} from {:?}", node, origin);
                *entry.insert(node)
            }
        }
    }

    /// Registers a brand-new node for `origin`, replacing the
    /// previously recorded one.
    ///
    /// Used when a genome already owns the node recorded
    /// for `origin` (for example, if it splits a connection
    /// a second time after crossover re-enabled it), which
    /// would otherwise leave it with a duplicate node.
    pub fn fresh_node_innovation(&mut self, origin: NodeOrigin) -> NodeId {
        let node = self.next_node;
        self.next_node += 1;
        debug!("fresh node innovation {} from {:?}", node, origin);
        self.node_innovations.insert(origin, node);
        node
    }

    /// Returns the number of connection innovations registered,
    /// including the initial input-output connections.
    pub fn connection_count(&self) -> usize {
        self.next_innovation
    }

    /// Returns the number of node identifiers handed out,
    /// including input and output nodes.
    pub fn node_count(&self) -> usize {
        self.next_node
    }

    /// Returns the innovation number previously registered
    /// for the connection between `from` and `to`, if any.
    pub fn find_connection(&self, from: NodeId, to: NodeId) -> Option<Innovation> {
        self.connection_innovations.get(&(from, to)).copied()
    }

    /// Returns the node most recently registered for `origin`, if any.
    pub fn find_node(&self, origin: NodeOrigin) -> Option<NodeId> {
        self.node_innovations.get(&origin).copied()
    }
}
