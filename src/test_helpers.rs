use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::graph::{LayerGraph, NodeId, WeightedGraph};
use crate::multiplex::{build_layer_graphs, LayerId};

/// A bare adjacency map keyed by the edge exactly as given, without normalising the
/// orientation. Used to check that the loader only relies on `WeightedGraph`.
#[derive(Debug, Default, PartialEq)]
pub struct EdgeListGraph {
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeMap<(NodeId, NodeId), i64>,
}

impl WeightedGraph for EdgeListGraph {
    type Weight = i64;

    fn add_node(&mut self, n: NodeId) {
        self.nodes.insert(n);
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains_key(&(a, b))
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId, weight: i64) {
        self.nodes.insert(a);
        self.nodes.insert(b);
        self.edges.insert((a, b), weight);
    }

    fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<i64> {
        self.edges.get(&(a, b)).copied()
    }

    fn set_edge_weight(&mut self, a: NodeId, b: NodeId, weight: i64) -> bool {
        match self.edges.get_mut(&(a, b)) {
            Some(current) => {
                *current = weight;
                true
            }
            None => false,
        }
    }
}

pub fn edge_list_graph<N, E>(nodes: N, edges: E) -> EdgeListGraph
where
    N: IntoIterator<Item = NodeId>,
    E: IntoIterator<Item = (NodeId, NodeId, i64)>,
{
    EdgeListGraph {
        nodes: nodes.into_iter().collect(),
        edges: edges.into_iter().map(|(a, b, w)| ((a, b), w)).collect(),
    }
}

/// Three layers over nodes 1..=4: a path, a triangle with a doubled edge and a single edge.
pub fn sample_multiplex() -> HashMap<LayerId, Vec<[NodeId; 2]>> {
    HashMap::from([
        (1, vec![[1, 2], [2, 3], [3, 4]]),
        (2, vec![[1, 2], [2, 1], [2, 3], [3, 1]]),
        (3, vec![[4, 1]]),
    ])
}

pub fn sample_layer_graphs() -> Vec<LayerGraph> {
    build_layer_graphs(&sample_multiplex()).unwrap()
}
