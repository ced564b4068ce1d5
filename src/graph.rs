use petgraph::graphmap::UnGraphMap;
use std::collections::BTreeSet;

pub type NodeId = i64;

/// Numeric edge weights that can be placed in an adjacency matrix.
pub trait EdgeWeight: Copy {
    fn as_f64(self) -> f64;
}

impl EdgeWeight for i64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl EdgeWeight for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// The operations the layer loader needs from a graph.
///
/// Edges are undirected: implementations must treat `(a, b)` and `(b, a)` as the same edge,
/// or at least be consistent for callers that always pass the smaller endpoint first.
pub trait WeightedGraph {
    type Weight: Copy;

    fn add_node(&mut self, n: NodeId);

    fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for n in nodes {
            self.add_node(n);
        }
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool;

    /// Inserts an edge, replacing the weight of an existing one.
    fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Self::Weight);

    fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<Self::Weight>;

    /// Returns false if the edge does not exist.
    fn set_edge_weight(&mut self, a: NodeId, b: NodeId, weight: Self::Weight) -> bool;
}

/// Undirected simple graph over integer node ids, backed by a petgraph `GraphMap`.
///
/// Nodes are kept in insertion order, which the fusion code relies on for building
/// adjacency matrices.
#[derive(Clone, Debug)]
pub struct SimpleGraph<W> {
    graph: UnGraphMap<NodeId, W>,
}

/// A single layer of a multiplex network; weights count edge occurrences.
pub type LayerGraph = SimpleGraph<i64>;

/// The linear combination of several layers.
pub type FusedGraph = SimpleGraph<f64>;

impl<W> Default for SimpleGraph<W> {
    fn default() -> Self {
        SimpleGraph {
            graph: UnGraphMap::new(),
        }
    }
}

impl<W: Copy> SimpleGraph<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut graph = Self::new();
        graph.add_nodes(nodes);
        graph
    }

    /// Builds a graph from a node list and weighted edges. Edge endpoints missing from
    /// `nodes` are added; a repeated edge keeps the last weight.
    pub fn from_parts<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId, W)>,
    {
        let mut graph = Self::with_nodes(nodes);
        for (a, b, weight) in edges {
            graph.graph.add_edge(a, b, weight);
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, n: NodeId) -> bool {
        self.graph.contains_node(n)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.nodes()
    }

    pub fn node_set(&self) -> BTreeSet<NodeId> {
        self.graph.nodes().collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, W)> + '_ {
        self.graph.all_edges().map(|(a, b, weight)| (a, b, *weight))
    }

    pub fn neighbors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(n)
    }
}

impl<W: Copy> WeightedGraph for SimpleGraph<W> {
    type Weight = W;

    fn add_node(&mut self, n: NodeId) {
        self.graph.add_node(n);
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.contains_edge(a, b)
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId, weight: W) {
        self.graph.add_edge(a, b, weight);
    }

    fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<W> {
        self.graph.edge_weight(a, b).copied()
    }

    fn set_edge_weight(&mut self, a: NodeId, b: NodeId, weight: W) -> bool {
        match self.graph.edge_weight_mut(a, b) {
            Some(current) => {
                *current = weight;
                true
            }
            None => false,
        }
    }
}
