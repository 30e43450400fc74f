use super::{Connection, LayeredGenome};
use crate::NodeId;

use ahash::RandomState;

use std::collections::HashMap;

/// Maps each node to its enabled incoming connections,
/// as `(source node, connection index)` pairs in
/// innovation order.
#[derive(Clone, Debug, Default)]
pub(super) struct IncomingIndex {
    sources: HashMap<NodeId, Vec<(NodeId, usize)>, RandomState>,
}

impl IncomingIndex {
    pub(super) fn build(connections: &[Connection]) -> IncomingIndex {
        let mut sources: HashMap<NodeId, Vec<(NodeId, usize)>, RandomState> = HashMap::default();
        for (i, connection) in connections.iter().enumerate().filter(|(_, c)| c.enabled()) {
            sources
                .entry(connection.to())
                .or_default()
                .push((connection.from(), i));
        }
        IncomingIndex { sources }
    }

    pub(super) fn sources(&self, node: NodeId) -> &[(NodeId, usize)] {
        self.sources.get(&node).map_or(&[], Vec::as_slice)
    }
}

impl LayeredGenome {
    /// Evaluates the genome as a feed-forward network
    /// and returns one value per output node.
    ///
    /// Missing inputs are taken as 0.0 and extra inputs
    /// are ignored. Nodes are computed layer by layer,
    /// each applying its activation to the weighted sum
    /// of its enabled incoming connections.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{ActivationType, GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_activation: ActivationType::Identity,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut registry = Registry::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut StdRng::seed_from_u64(1));
    /// genome.set_weight(0, 0.5);
    /// genome.set_weight(1, -2.0);
    ///
    /// assert_eq!(genome.forward(&[1.0, 1.0]), [-1.5]);
    /// assert_eq!(genome.forward(&[4.0]), [2.0]);
    /// ```
    pub fn forward(&self, inputs: &[f32]) -> Vec<f32> {
        let incoming = self.incoming_index();
        let mut values: HashMap<NodeId, f32, RandomState> =
            HashMap::with_capacity_and_hasher(self.node_count(), RandomState::default());

        for (i, node) in self.inputs.iter().enumerate() {
            let value = inputs.get(i).copied().unwrap_or(0.0);
            values.insert(node.id(), node.activation().apply(value));
        }

        for node in self.hidden_layers.iter().flatten().chain(&self.outputs) {
            let sum: f32 = incoming
                .sources(node.id())
                .iter()
                .filter_map(|&(source, i)| {
                    values
                        .get(&source)
                        .map(|value| value * self.connections[i].weight())
                })
                .sum();
            values.insert(node.id(), node.activation().apply(sum));
        }

        self.outputs
            .iter()
            .map(|node| values.get(&node.id()).copied().unwrap_or(0.0))
            .collect()
    }
}
