use crate::NodeId;

use serde::{Deserialize, Serialize};

use std::fmt;

/// The function a node applies to its weighted input sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActivationType {
    // 1 / (1 + exp(-4.9x))
    Sigmoid,
    // x
    Identity,
    // max(0, x)
    ReLU,
    // exp(-x²)
    Gaussian,
    // sin(πx)
    Sinusoidal,
}

impl ActivationType {
    /// Applies the activation function to `x`.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::Sigmoid.apply(0.0), 0.5);
    /// assert_eq!(ActivationType::Identity.apply(-3.0), -3.0);
    /// assert_eq!(ActivationType::ReLU.apply(-3.0), 0.0);
    /// ```
    pub fn apply(self, x: f32) -> f32 {
        match self {
            ActivationType::Sigmoid => 1.0 / (1.0 + (-4.9 * x).exp()),
            ActivationType::Identity => x,
            ActivationType::ReLU => x.max(0.0),
            ActivationType::Gaussian => (-x.powi(2)).exp(),
            ActivationType::Sinusoidal => (std::f32::consts::PI * x).sin(),
        }
    }
}

/// A NodeRole indicates the position of
/// a node in the layered network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// Input nodes, on the virtual layer -1.
    Input,
    /// Hidden nodes, on an explicit layer.
    Hidden,
    /// Output nodes, on the virtual layer
    /// after the last hidden one.
    Output,
}

/// A neuron of a layered genome, identified by its [`NodeId`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    role: NodeRole,
    layer: usize,
    activation: ActivationType,
}

impl Node {
    /// Returns an input node. Inputs always
    /// pass their value through unchanged.
    pub fn input(id: NodeId) -> Node {
        Node {
            id,
            role: NodeRole::Input,
            layer: 0,
            activation: ActivationType::Identity,
        }
    }

    /// Returns a hidden node placed on `layer`.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::{ActivationType, Node, NodeRole};
    ///
    /// let node = Node::hidden(7, 2, ActivationType::ReLU);
    /// assert_eq!(node.role(), NodeRole::Hidden);
    /// assert_eq!(node.hidden_layer(), Some(2));
    /// ```
    pub fn hidden(id: NodeId, layer: usize, activation: ActivationType) -> Node {
        Node {
            id,
            role: NodeRole::Hidden,
            layer,
            activation,
        }
    }

    /// Returns an output node.
    pub fn output(id: NodeId, activation: ActivationType) -> Node {
        Node {
            id,
            role: NodeRole::Output,
            layer: 0,
            activation,
        }
    }

    /// Returns the node's identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's role.
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// Returns the node's layer if it is a hidden node.
    /// Input and output layers depend on the genome.
    pub fn hidden_layer(&self) -> Option<usize> {
        match self.role {
            NodeRole::Hidden => Some(self.layer),
            _ => None,
        }
    }

    /// Returns the node's activation type.
    pub fn activation(&self) -> ActivationType {
        self.activation
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            NodeRole::Hidden => write!(f, "{}[L{}, {:?}]", self.id, self.layer, self.activation),
            role => write!(f, "{}[{:?}, {:?}]", self.id, role, self.activation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_steepened() {
        let y = ActivationType::Sigmoid.apply(1.0);
        assert!((y - 1.0 / (1.0 + (-4.9f32).exp())).abs() < 1e-6);
        assert!(ActivationType::Sigmoid.apply(-10.0) < 1e-6);
    }

    #[test]
    fn other_activations() {
        assert_eq!(ActivationType::ReLU.apply(2.5), 2.5);
        assert_eq!(ActivationType::Gaussian.apply(0.0), 1.0);
        assert!(ActivationType::Sinusoidal.apply(1.0).abs() < 1e-6);
    }

    #[test]
    fn layers_only_for_hidden_nodes() {
        assert_eq!(Node::input(0).hidden_layer(), None);
        assert_eq!(Node::output(3, ActivationType::Sigmoid).hidden_layer(), None);
        assert_eq!(Node::input(0).activation(), ActivationType::Identity);
    }
}
