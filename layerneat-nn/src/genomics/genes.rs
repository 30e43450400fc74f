use crate::{Innovation, NodeId};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Connections are the genes of a genome.
/// They join a node to another on a strictly
/// later layer, and become weighted edges when
/// the genome is evaluated.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Connection {
    innovation: Innovation,
    from: NodeId,
    to: NodeId,
    weight: f32,
    enabled: bool,
}

impl Connection {
    /// Returns a new _enabled_ connection with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use layerneat_nn::genomics::Connection;
    ///
    /// let connection = Connection::new(42, 3, 9, 2.0);
    /// assert!(connection.enabled());
    /// assert_eq!(connection.endpoints(), (3, 9));
    /// ```
    pub fn new(innovation: Innovation, from: NodeId, to: NodeId, weight: f32) -> Connection {
        Connection {
            innovation,
            from,
            to,
            weight,
            enabled: true,
        }
    }

    /// Returns a uniformly random weight in `[-1, 1]`.
    pub(super) fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f32 {
        rng.gen_range(-1.0..=1.0)
    }

    /// Returns the connection's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    /// Returns the source node.
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Returns the destination node.
    pub fn to(&self) -> NodeId {
        self.to
    }

    /// Returns the connection's source and destination nodes.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    /// Returns the connection's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the connection's weight.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    /// Returns whether the connection takes part
    /// in evaluation and genetic distance.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}[{}->{}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.innovation,
            self.from,
            self.to,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_weights_are_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(Connection::random_weight(&mut rng).abs() <= 1.0);
        }
    }

    #[test]
    fn disabled_display() {
        let mut connection = Connection::new(4, 0, 2, 0.5);
        assert_eq!(connection.to_string(), "4[0->2, 0.500]");
        connection.set_enabled(false);
        assert_eq!(connection.to_string(), "(4[0->2, 0.500])");
    }
}
