use crate::graph::{EdgeWeight, FusedGraph, NodeId, SimpleGraph, WeightedGraph};
use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FusionError {
    #[error("No graphs to fuse")]
    Empty,
    #[error("Expected {expected} coefficient(s), got {actual}")]
    CoefficientCount { expected: usize, actual: usize },
    #[error("Graph {0} does not have the same node set as graph 0")]
    NodeSetMismatch(usize),
    #[error("Coefficient {index} is not a finite number: {value}")]
    NonFiniteCoefficient { index: usize, value: f64 },
}

/// Fuses node-aligned graphs into one graph whose adjacency matrix is
/// `sum(coefficients[k] * A_k)`.
///
/// The fused graph has the nodes of the first graph, in the same order, and one edge for
/// every non-zero entry of the combined matrix.
pub fn fuse_layers<W: EdgeWeight>(
    graphs: &[SimpleGraph<W>],
    coefficients: &[f64],
) -> Result<FusedGraph, FusionError> {
    let first = graphs.first().ok_or(FusionError::Empty)?;
    if coefficients.len() != graphs.len() {
        return Err(FusionError::CoefficientCount {
            expected: graphs.len(),
            actual: coefficients.len(),
        });
    }
    if let Some((index, &value)) = coefficients.iter().find_position(|c| !c.is_finite()) {
        return Err(FusionError::NonFiniteCoefficient { index, value });
    }

    let order = first.nodes().collect::<Vec<_>>();
    let index = node_index(&order);
    for (position, graph) in graphs.iter().enumerate().skip(1) {
        let aligned =
            graph.node_count() == order.len() && graph.nodes().all(|n| index.contains_key(&n));
        if !aligned {
            return Err(FusionError::NodeSetMismatch(position));
        }
    }

    let mut combined = Array2::<f64>::zeros((order.len(), order.len()));
    for (graph, &coefficient) in graphs.iter().zip(coefficients) {
        combined.scaled_add(coefficient, &fill_adjacency(graph, &index));
    }

    let fused = graph_from_adjacency(&combined, &order);
    debug!(
        "Fused {} graph(s) into {} node(s) and {} edge(s)",
        graphs.len(),
        fused.node_count(),
        fused.edge_count()
    );
    Ok(fused)
}

/// Dense symmetric adjacency matrix of `graph` with rows in `order`. Self-loops sit on the
/// diagonal; edges touching nodes outside `order` are left out.
pub fn adjacency_matrix<W>(graph: &SimpleGraph<W>, order: &[NodeId]) -> Array2<f64>
where
    W: EdgeWeight,
{
    fill_adjacency(graph, &node_index(order))
}

/// Builds a graph from the upper triangle (diagonal included) of a square matrix whose rows
/// correspond to `order`. Zero entries give no edge.
pub fn graph_from_adjacency(matrix: &Array2<f64>, order: &[NodeId]) -> FusedGraph {
    let mut graph = FusedGraph::with_nodes(order.iter().copied());
    for (i, &a) in order.iter().enumerate() {
        for (j, &b) in order.iter().enumerate().skip(i) {
            let weight = matrix[[i, j]];
            if weight != 0.0 {
                graph.add_edge(a, b, weight);
            }
        }
    }
    graph
}

fn node_index(order: &[NodeId]) -> HashMap<NodeId, usize> {
    order
        .iter()
        .enumerate()
        .map(|(position, &node)| (node, position))
        .collect()
}

fn fill_adjacency<W: EdgeWeight>(
    graph: &SimpleGraph<W>,
    index: &HashMap<NodeId, usize>,
) -> Array2<f64> {
    let mut matrix = Array2::<f64>::zeros((index.len(), index.len()));
    for (a, b, weight) in graph.edges() {
        if let (Some(&i), Some(&j)) = (index.get(&a), index.get(&b)) {
            matrix[[i, j]] = weight.as_f64();
            matrix[[j, i]] = weight.as_f64();
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LayerGraph;
    use crate::test_helpers::sample_layer_graphs;
    use ndarray::array;

    #[test]
    fn test_adjacency_matrix() {
        let graph = LayerGraph::from_parts([1, 2, 3], [(1, 2, 2), (3, 3, 1)]);
        assert_eq!(
            adjacency_matrix(&graph, &[1, 2, 3]),
            array![[0.0, 2.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(
            adjacency_matrix(&graph, &[3, 2]),
            array![[1.0, 0.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn test_graph_from_adjacency() {
        let matrix = array![[0.0, 1.5, 0.0], [1.5, 0.0, -2.0], [0.0, -2.0, 4.0]];
        let graph = graph_from_adjacency(&matrix, &[10, 20, 30]);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_weight(10, 20), Some(1.5));
        assert_eq!(graph.edge_weight(20, 30), Some(-2.0));
        assert_eq!(graph.edge_weight(30, 30), Some(4.0));
        assert!(!graph.has_edge(10, 30));
    }

    #[test]
    fn test_sum_of_layers() {
        let graphs = sample_layer_graphs();
        let fused = fuse_layers(&graphs, &[1.0, 1.0, 1.0]).unwrap();

        assert_eq!(fused.node_set(), graphs[0].node_set());
        assert_eq!(fused.edge_weight(1, 2), Some(3.0));
        assert_eq!(fused.edge_weight(2, 3), Some(2.0));
        assert_eq!(fused.edge_weight(1, 3), Some(1.0));
        assert_eq!(fused.edge_weight(3, 4), Some(1.0));
        assert_eq!(fused.edge_weight(1, 4), Some(1.0));
        assert_eq!(fused.edge_count(), 5);
    }

    #[test]
    fn test_weighted_combination() {
        let graphs = sample_layer_graphs();
        let fused = fuse_layers(&graphs, &[0.5, 0.25, 2.0]).unwrap();

        assert_eq!(fused.edge_weight(1, 2), Some(1.0));
        assert_eq!(fused.edge_weight(2, 3), Some(0.75));
        assert_eq!(fused.edge_weight(1, 3), Some(0.25));
        assert_eq!(fused.edge_weight(1, 4), Some(2.0));
    }

    #[test]
    fn test_zero_coefficient_drops_layer() {
        let graphs = sample_layer_graphs();
        let fused = fuse_layers(&graphs, &[0.0, 0.0, 1.0]).unwrap();

        assert_eq!(fused.node_count(), 4);
        assert_eq!(fused.edge_count(), 1);
        assert_eq!(fused.edge_weight(4, 1), Some(1.0));
    }

    #[test]
    fn test_cancelled_edges_are_removed() {
        let a = LayerGraph::from_parts([1, 2, 3], [(1, 2, 1), (2, 3, 1)]);
        let b = LayerGraph::from_parts([1, 2, 3], [(1, 2, 1)]);
        let fused = fuse_layers(&[a, b], &[1.0, -1.0]).unwrap();

        assert!(!fused.has_edge(1, 2));
        assert_eq!(fused.edge_weight(2, 3), Some(1.0));
    }

    #[test]
    fn test_node_order_may_differ() {
        let a = LayerGraph::from_parts([1, 2, 3], [(1, 2, 1)]);
        let b = LayerGraph::from_parts([3, 2, 1], [(2, 1, 2), (3, 1, 1)]);
        let fused = fuse_layers(&[a, b], &[1.0, 1.0]).unwrap();

        assert_eq!(fused.nodes().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(fused.edge_weight(1, 2), Some(3.0));
        assert_eq!(fused.edge_weight(1, 3), Some(1.0));
    }

    #[test]
    fn test_fuse_fused_graphs() {
        let a = FusedGraph::from_parts([1, 2], [(1, 2, 0.5)]);
        let fused = fuse_layers(&[a.clone(), a], &[1.0, 3.0]).unwrap();
        assert_eq!(fused.edge_weight(1, 2), Some(2.0));
    }

    #[test]
    fn test_errors() {
        let graphs: Vec<LayerGraph> = vec![];
        assert_eq!(fuse_layers(&graphs, &[]).unwrap_err(), FusionError::Empty);

        let graphs = sample_layer_graphs();
        assert_eq!(
            fuse_layers(&graphs, &[1.0]).unwrap_err(),
            FusionError::CoefficientCount {
                expected: 3,
                actual: 1
            }
        );

        let a = LayerGraph::from_parts([1, 2, 3], [(1, 2, 1)]);
        let b = LayerGraph::from_parts([1, 2], [(1, 2, 1)]);
        let c = LayerGraph::from_parts([1, 2, 4], [(1, 2, 1)]);
        assert_eq!(
            fuse_layers(&[a.clone(), b], &[1.0, 1.0]).unwrap_err(),
            FusionError::NodeSetMismatch(1)
        );
        assert_eq!(
            fuse_layers(&[a.clone(), a, c], &[1.0, 1.0, 1.0]).unwrap_err(),
            FusionError::NodeSetMismatch(2)
        );
    }

    #[test]
    fn test_non_finite_coefficients() {
        let graphs = sample_layer_graphs();
        assert!(matches!(
            fuse_layers(&graphs, &[1.0, f64::NAN, 1.0]).unwrap_err(),
            FusionError::NonFiniteCoefficient { index: 1, value } if value.is_nan()
        ));
        assert_eq!(
            fuse_layers(&graphs, &[1.0, 1.0, f64::NEG_INFINITY]).unwrap_err(),
            FusionError::NonFiniteCoefficient {
                index: 2,
                value: f64::NEG_INFINITY
            }
        );
    }
}
