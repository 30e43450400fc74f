use super::{Connection, GeneticConfig, LayeredGenome, Node, NodeOrigin, Registry};
use crate::{Innovation, NodeId};

use layerneat::Chance;
use log::debug;
use rand::{seq::SliceRandom, Rng};

/// The outcome of a node addition mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeAddition {
    /// The added node.
    pub node: NodeId,
    /// The hidden layer the node was placed on.
    pub layer: usize,
    /// The connection that was split to make room
    /// for the node, if there was one.
    pub split: Option<Innovation>,
}

/// Applies each mutation operator with its configured probability.
pub(super) fn mutate<R: Rng + ?Sized>(
    genome: &mut LayeredGenome,
    registry: &mut Registry,
    config: &GeneticConfig,
    rng: &mut R,
) {
    if rng.chance(config.new_connection_rate) {
        genome.mutate_add_connection(registry, rng);
    }
    if rng.chance(config.new_node_rate) {
        genome.mutate_add_node(registry, config, rng);
    }
    if rng.chance(config.disable_connection_rate) {
        genome.mutate_disable_connection(rng);
    }
    genome.mutate_weights(config, rng);
}

impl LayeredGenome {
    /// Induces a _connection mutation_ in the genome.
    /// If successful, returns the innovation number of
    /// the new connection.
    ///
    /// A source layer is chosen among the input and hidden
    /// layers, and a destination layer among the ones after it,
    /// then one node is picked from each. Nothing is added if
    /// either layer is empty or the two nodes are already
    /// connected, even by a disabled connection.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut registry = Registry::new(&config);
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut rng);
    ///
    /// // The single input is already connected to the single output.
    /// assert_eq!(genome.mutate_add_connection(&mut registry, &mut rng), None);
    /// assert_eq!(genome.connections().len(), 1);
    /// ```
    pub fn mutate_add_connection<R: Rng + ?Sized>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
    ) -> Option<Innovation> {
        let output_layer = self.output_layer();
        let source_layer = rng.gen_range(-1..output_layer);
        let destination_layer = rng.gen_range(source_layer + 1..=output_layer);

        let from = self.layer_nodes(source_layer).choose(rng).map(Node::id);
        let to = self.layer_nodes(destination_layer).choose(rng).map(Node::id);
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                debug!(
                    "connection mutation skipped: layer {} or {} is empty",
                    source_layer, destination_layer
                );
                return None;
            }
        };
        if self.has_connection(from, to) {
            debug!("connection mutation skipped: {} -> {} exists", from, to);
            return None;
        }

        let innovation = registry.connection_innovation(from, to);
        let weight = Connection::random_weight(rng);
        self.insert_connection(Connection::new(innovation, from, to, weight));
        Some(innovation)
    }

    /// Induces a _node mutation_ in the genome, and
    /// returns the added node along with the connection
    /// it split, if any.
    ///
    /// The node goes into a random existing hidden layer or,
    /// with [`new_node_layer_rate`] chance (or if there are no
    /// hidden layers yet), into a new layer placed just before
    /// the outputs. An enabled connection spanning exactly the
    /// neighbouring layers is then split: it is disabled, and
    /// replaced by a connection into the new node with weight
    /// 1.0 and one out of it with the old weight. If no such
    /// connection exists the node is left unconnected.
    ///
    /// [`new_node_layer_rate`]: GeneticConfig::new_node_layer_rate
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut registry = Registry::new(&config);
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut rng);
    /// let weight = genome.connections()[0].weight();
    ///
    /// let addition = genome.mutate_add_node(&mut registry, &config, &mut rng);
    ///
    /// assert_eq!(addition.layer, 0);
    /// assert_eq!(addition.split, Some(0));
    /// assert_eq!(genome.node_count(), 3);
    ///
    /// // The old connection is disabled, and two new ones replace it.
    /// assert!(!genome.connections()[0].enabled());
    /// assert_eq!(genome.connections()[1].weight(), 1.0);
    /// assert_eq!(genome.connections()[2].weight(), weight);
    /// ```
    pub fn mutate_add_node<R: Rng + ?Sized>(
        &mut self,
        registry: &mut Registry,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> NodeAddition {
        let layer_count = self.hidden_layers.len();
        let layer = if layer_count == 0 || rng.chance(config.new_node_layer_rate) {
            self.hidden_layers.push(vec![]);
            layer_count
        } else {
            rng.gen_range(0..layer_count)
        };

        let split = self.choose_split(layer, rng);
        let origin = match split {
            Some(i) => NodeOrigin::Split {
                connection: self.connections[i].innovation(),
                layer,
            },
            None => NodeOrigin::Unconnected {
                layer,
                ordinal: self.hidden_layers[layer].len(),
            },
        };
        let mut node = registry.node_innovation(origin);
        if self.contains_node(node) {
            node = registry.fresh_node_innovation(origin);
        }
        self.hidden_layers[layer].push(Node::hidden(node, layer, config.hidden_activation));

        let split = split.map(|i| {
            let old = &mut self.connections[i];
            old.set_enabled(false);
            let (innovation, (from, to), weight) = (old.innovation(), old.endpoints(), old.weight());

            let into = registry.connection_innovation(from, node);
            let out_of = registry.connection_innovation(node, to);
            self.insert_connection(Connection::new(into, from, node, 1.0));
            self.insert_connection(Connection::new(out_of, node, to, weight));
            innovation
        });
        if split.is_none() {
            debug!("node {} added to layer {} without a connection to split", node, layer);
        }
        self.invalidate();

        NodeAddition { node, layer, split }
    }

    /// Returns the index of a random enabled connection
    /// joining the layers on either side of `layer`.
    fn choose_split<R: Rng + ?Sized>(&self, layer: usize, rng: &mut R) -> Option<usize> {
        let layers = self.layer_map();
        let (before, after) = (layer as isize - 1, layer as isize + 1);
        let candidates: Vec<usize> = self
            .connections
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.enabled()
                    && layers.get(&c.from()) == Some(&before)
                    && layers.get(&c.to()) == Some(&after)
            })
            .map(|(i, _)| i)
            .collect();
        candidates.choose(rng).copied()
    }

    /// Disables a random enabled connection, and
    /// returns its innovation number.
    ///
    /// Returns `None` if every connection is disabled.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GeneticConfig::zero();
    /// let mut registry = Registry::new(&config);
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut rng);
    ///
    /// assert_eq!(genome.mutate_disable_connection(&mut rng), Some(0));
    /// assert_eq!(genome.mutate_disable_connection(&mut rng), None);
    /// assert_eq!(genome.connections().len(), 1);
    /// ```
    pub fn mutate_disable_connection<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Innovation> {
        let enabled: Vec<usize> = self
            .connections
            .iter()
            .enumerate()
            .filter(|(_, c)| c.enabled())
            .map(|(i, _)| i)
            .collect();
        let i = match enabled.choose(rng) {
            Some(&i) => i,
            None => {
                debug!("disable mutation skipped: no enabled connections");
                return None;
            }
        };
        self.connections[i].set_enabled(false);
        self.invalidate();
        Some(self.connections[i].innovation())
    }

    /// Mutates the weights of all connections, enabled or not.
    ///
    /// Each weight is shifted by [`perturbation_step`] with
    /// [`weight_perturbation_rate`] chance, and then replaced
    /// by a uniformly random value in `[-1, 1]` with
    /// [`weight_replace_rate`] chance.
    ///
    /// Returns the number of connections that changed.
    ///
    /// [`perturbation_step`]: GeneticConfig::perturbation_step
    /// [`weight_perturbation_rate`]: GeneticConfig::weight_perturbation_rate
    /// [`weight_replace_rate`]: GeneticConfig::weight_replace_rate
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{GeneticConfig, LayeredGenome, Registry};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GeneticConfig {
    ///     weight_perturbation_rate: 1.0,
    ///     perturbation_step: 0.25,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut registry = Registry::new(&config);
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mut genome = LayeredGenome::new(&config, &mut registry, &mut rng);
    /// let initial_weight = genome.connections()[0].weight();
    ///
    /// assert_eq!(genome.mutate_weights(&config, &mut rng), 1);
    /// assert_eq!(genome.connections()[0].weight(), initial_weight + 0.25);
    /// ```
    pub fn mutate_weights<R: Rng + ?Sized>(&mut self, config: &GeneticConfig, rng: &mut R) -> usize {
        let mut changed = 0;
        for connection in &mut self.connections {
            let mut touched = false;
            if rng.chance(config.weight_perturbation_rate) {
                connection.set_weight(connection.weight() + config.perturbation_step);
                touched = true;
            }
            if rng.chance(config.weight_replace_rate) {
                connection.set_weight(Connection::random_weight(rng));
                touched = true;
            }
            if touched {
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::tests::{config, genome};
    use crate::genomics::ActivationType;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn add_node_always_adds_one_node() {
        let config = GeneticConfig {
            new_node_layer_rate: 0.3,
            ..config(3, 2)
        };
        let (mut genome, mut registry) = genome(&config, 1);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let (nodes, connections) = (genome.node_count(), genome.connections().len());
            let addition = genome.mutate_add_node(&mut registry, &config, &mut rng);

            assert_eq!(genome.node_count(), nodes + 1);
            let added = if addition.split.is_some() { 2 } else { 0 };
            assert_eq!(genome.connections().len(), connections + added);
            assert_eq!(
                genome.hidden_layers()[addition.layer].last().map(Node::id),
                Some(addition.node)
            );
        }
    }

    #[test]
    fn added_nodes_have_unique_ids() {
        let config = GeneticConfig {
            new_node_layer_rate: 0.5,
            ..config(2, 2)
        };
        let (mut genome, mut registry) = genome(&config, 2);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..40 {
            genome.mutate_add_node(&mut registry, &config, &mut rng);
            genome.mutate_add_connection(&mut registry, &mut rng);
        }
        let mut ids: Vec<NodeId> = genome.nodes().map(Node::id).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn split_keeps_weights_and_layers() {
        let config = GeneticConfig {
            hidden_activation: ActivationType::ReLU,
            ..config(1, 1)
        };
        let (mut genome, mut registry) = genome(&config, 0);
        genome.set_weight(0, -0.75);

        let addition = genome.mutate_add_node(&mut registry, &config, &mut StdRng::seed_from_u64(0));
        assert_eq!(
            addition,
            NodeAddition {
                node: 2,
                layer: 0,
                split: Some(0)
            }
        );

        let into = genome.connection(1).unwrap();
        let out_of = genome.connection(2).unwrap();
        assert_eq!((into.endpoints(), into.weight()), ((0, 2), 1.0));
        assert_eq!((out_of.endpoints(), out_of.weight()), ((2, 1), -0.75));
        assert_eq!(genome.hidden_layers()[0][0].activation(), ActivationType::ReLU);
        assert_eq!(genome.output_layer(), 1);
    }

    #[test]
    fn unconnected_node_without_candidates() {
        let config = config(1, 1);
        let (mut genome, mut registry) = genome(&config, 0);
        let mut rng = StdRng::seed_from_u64(0);
        genome.mutate_disable_connection(&mut rng);

        let addition = genome.mutate_add_node(&mut registry, &config, &mut rng);
        assert_eq!(addition.split, None);
        assert_eq!(genome.connections().len(), 1);
        assert_eq!(
            registry.find_node(NodeOrigin::Unconnected {
                layer: 0,
                ordinal: 0
            }),
            Some(addition.node)
        );

        // The lone node can still be wired in later.
        let mut wired = false;
        for _ in 0..100 {
            if let Some(innovation) = genome.mutate_add_connection(&mut registry, &mut rng) {
                let (from, to) = genome.connection(innovation).unwrap().endpoints();
                wired |= from == addition.node || to == addition.node;
            }
        }
        assert!(wired);
    }

    #[test]
    fn identical_mutations_share_innovations() {
        let config = config(2, 1);
        let mut registry = Registry::new(&config);
        let mut first = LayeredGenome::new(&config, &mut registry, &mut StdRng::seed_from_u64(3));
        let mut second = LayeredGenome::new(&config, &mut registry, &mut StdRng::seed_from_u64(4));

        // Same candidates and same seed: both split the same connection.
        let a = first.mutate_add_node(&mut registry, &config, &mut StdRng::seed_from_u64(5));
        let b = second.mutate_add_node(&mut registry, &config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);

        let innovations = |g: &LayeredGenome| -> Vec<Innovation> {
            g.connections().iter().map(Connection::innovation).collect()
        };
        assert_eq!(innovations(&first), innovations(&second));
        assert_eq!(registry.node_count(), 4);
    }

    #[test]
    fn repeated_split_gets_fresh_node() {
        let config = config(1, 1);
        let (mut genome, mut registry) = genome(&config, 0);
        let mut rng = StdRng::seed_from_u64(0);
        let first = genome.mutate_add_node(&mut registry, &config, &mut rng);

        // Re-enable the split connection, as crossover might, and split it again.
        genome.connections[0].set_enabled(true);
        let second = genome.mutate_add_node(&mut registry, &config, &mut rng);

        assert_eq!(second.layer, 0);
        assert_eq!(second.split, Some(0));
        assert_ne!(first.node, second.node);
        assert_eq!(
            registry.find_node(NodeOrigin::Split {
                connection: 0,
                layer: 0
            }),
            Some(second.node)
        );
    }

    #[test]
    fn connections_go_forward() {
        let config = GeneticConfig {
            new_node_layer_rate: 0.5,
            ..config(3, 2)
        };
        let (mut genome, mut registry) = genome(&config, 6);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..30 {
            genome.mutate_add_node(&mut registry, &config, &mut rng);
            genome.mutate_add_connection(&mut registry, &mut rng);
        }

        let layers = genome.layer_map();
        for connection in genome.connections() {
            assert!(layers[&connection.from()] < layers[&connection.to()]);
        }
        assert!(genome
            .connections()
            .windows(2)
            .all(|w| w[0].innovation() < w[1].innovation()));
    }

    #[test]
    fn disable_keeps_connection_count() {
        let config = config(2, 2);
        let (mut genome, _) = genome(&config, 0);
        let mut rng = StdRng::seed_from_u64(0);
        for disabled in 1..=4 {
            assert!(genome.mutate_disable_connection(&mut rng).is_some());
            assert_eq!(genome.enabled_connections().count(), 4 - disabled);
        }
        assert_eq!(genome.connections().len(), 4);
        assert!(genome.mutate_disable_connection(&mut rng).is_none());
    }

    #[test]
    fn default_rates_never_disable() {
        let config = GeneticConfig {
            new_connection_rate: 0.0,
            new_node_rate: 0.0,
            ..GeneticConfig::default()
        };
        let (mut genome, mut registry) = genome(&config, 0);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            mutate(&mut genome, &mut registry, &config, &mut rng);
        }
        assert_eq!(genome.enabled_connections().count(), 20);
    }

    #[test]
    fn weights_mutate_with_rates() {
        let config = config(3, 3);
        let (mut genome, _) = genome(&config, 0);
        let before = genome.clone();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(genome.mutate_weights(&config, &mut rng), 0);
        assert_eq!(genome, before);

        let replace = GeneticConfig {
            weight_replace_rate: 1.0,
            ..config
        };
        assert_eq!(genome.mutate_weights(&replace, &mut rng), 9);
        assert!(genome.connections().iter().all(|c| c.weight().abs() <= 1.0));
    }

    #[test]
    fn mutate_with_zero_rates_is_identity() {
        let config = config(2, 2);
        let (mut genome, mut registry) = genome(&config, 8);
        let before = genome.clone();
        mutate(&mut genome, &mut registry, &config, &mut StdRng::seed_from_u64(8));
        assert_eq!(genome, before);
    }
}
