use super::{GeneticConfig, LayeredGenome};

use rand::Rng;

use std::cell::OnceCell;
use std::cmp::Ordering;

/// Returns the offspring of two genomes.
///
/// Connections are aligned by innovation number. Matching
/// connections are inherited from either parent at random,
/// weight and enabled state together; connections only
/// `strong` has are inherited as they are, and those only
/// `weak` has are dropped. Since every inherited connection
/// is one of `strong`'s, the child takes `strong`'s nodes
/// and layers unchanged.
pub(super) fn crossover<R: Rng + ?Sized>(
    strong: &LayeredGenome,
    weak: &LayeredGenome,
    rng: &mut R,
) -> LayeredGenome {
    let connections = strong
        .connections
        .iter()
        .map(|connection| match weak.connection(connection.innovation()) {
            Some(other) if rng.gen::<bool>() => other.clone(),
            _ => connection.clone(),
        })
        .collect();

    LayeredGenome {
        inputs: strong.inputs.clone(),
        outputs: strong.outputs.clone(),
        hidden_layers: strong.hidden_layers.clone(),
        connections,
        incoming: OnceCell::new(),
        fitness: 0.0,
        adjusted_fitness: 0.0,
    }
}

/// Walks the enabled connections of both genomes in innovation
/// order, counting the ones without a counterpart and summing
/// the weight differences of the ones with one.
pub(super) fn compatibility_distance(
    first: &LayeredGenome,
    second: &LayeredGenome,
    config: &GeneticConfig,
) -> f32 {
    let mut a = first.enabled_connections().peekable();
    let mut b = second.enabled_connections().peekable();
    let (mut nonmatching, mut matching, mut weight_difference) = (0usize, 0usize, 0.0f32);

    loop {
        match (a.peek().map(|c| c.innovation()), b.peek().map(|c| c.innovation())) {
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Less => {
                    nonmatching += 1;
                    a.next();
                }
                Ordering::Greater => {
                    nonmatching += 1;
                    b.next();
                }
                Ordering::Equal => {
                    if let (Some(x), Some(y)) = (a.next(), b.next()) {
                        matching += 1;
                        weight_difference += (x.weight() - y.weight()).abs();
                    }
                }
            },
            (Some(_), None) => {
                nonmatching += 1;
                a.next();
            }
            (None, Some(_)) => {
                nonmatching += 1;
                b.next();
            }
            (None, None) => break,
        }
    }

    let largest = first
        .enabled_connections()
        .count()
        .max(second.enabled_connections().count())
        .max(1);
    let average_difference = if matching == 0 {
        0.0
    } else {
        weight_difference / matching as f32
    };

    config.disjoint_coefficient * nonmatching as f32 / largest as f32
        + config.weight_coefficient * average_difference
}
