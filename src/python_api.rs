use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3::Bound;
use std::collections::{BTreeMap, HashMap};

use crate::config::LoaderOptions;
use crate::fusion::{self, FusionError};
use crate::graph::{EdgeWeight, FusedGraph, NodeId, SimpleGraph};
use crate::multiplex::{self, LayerId, MultiplexError};
use crate::partition::{self, CommunityId, Partition, PartitionError};

/// A graph as handed to and from Python: `(nodes, [(u, v, weight), ...])`.
type PyGraph<W> = (Vec<NodeId>, Vec<(NodeId, NodeId, W)>);

impl From<MultiplexError> for PyErr {
    fn from(err: MultiplexError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<FusionError> for PyErr {
    fn from(err: FusionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<PartitionError> for PyErr {
    fn from(err: PartitionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn to_py_graph<W: EdgeWeight>(graph: &SimpleGraph<W>) -> PyGraph<W> {
    (graph.nodes().collect(), graph.edges().collect())
}

/// Builds one weighted graph per layer from `{layer: [[u, v], ...]}`, ordered by layer.
#[pyfunction(name = "build_layer_graphs")]
#[pyo3(signature = (layers, keep_self_loops = false))]
pub fn build_layer_graphs_py(
    layers: HashMap<LayerId, Vec<Vec<NodeId>>>,
    keep_self_loops: bool,
) -> PyResult<Vec<PyGraph<i64>>> {
    let options = if keep_self_loops {
        LoaderOptions::keep_self_loops()
    } else {
        LoaderOptions::default()
    };
    let graphs = multiplex::build_layer_graphs_with_options(&layers, &options)?;
    Ok(graphs.iter().map(to_py_graph).collect())
}

/// Fuses graphs given as `(nodes, edges)` with one coefficient per graph.
#[pyfunction(name = "fuse_layers")]
pub fn fuse_layers_py(
    graphs: Vec<PyGraph<f64>>,
    coefficients: Vec<f64>,
) -> PyResult<PyGraph<f64>> {
    let graphs = graphs
        .into_iter()
        .map(|(nodes, edges)| FusedGraph::from_parts(nodes, edges))
        .collect::<Vec<_>>();
    let fused = fusion::fuse_layers(&graphs, &coefficients)?;
    Ok(to_py_graph(&fused))
}

#[pyfunction(name = "labels_from_communities")]
pub fn labels_from_communities_py(communities: Vec<Vec<NodeId>>) -> Vec<CommunityId> {
    partition::labels_from_communities(&communities)
}

/// Maps a membership vector indexed by vertex position back to node ids.
#[pyfunction(name = "partition_from_membership")]
pub fn partition_from_membership_py(
    membership: Vec<CommunityId>,
    nodes: Vec<NodeId>,
) -> PyResult<BTreeMap<NodeId, CommunityId>> {
    let partition = Partition::from_membership(&membership, &nodes)?;
    Ok(partition.iter().collect())
}

#[pyfunction(name = "normalized_mutual_info")]
pub fn normalized_mutual_info_py(
    first: Vec<CommunityId>,
    second: Vec<CommunityId>,
) -> PyResult<f64> {
    Ok(partition::normalized_mutual_info(&first, &second)?)
}

/// Adds functions to the Python module.
#[pymodule]
#[pyo3(name = "multiplex")]
pub fn multiplex_py(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(build_layer_graphs_py, m)?)?;
    m.add_function(wrap_pyfunction!(fuse_layers_py, m)?)?;
    m.add_function(wrap_pyfunction!(labels_from_communities_py, m)?)?;
    m.add_function(wrap_pyfunction!(partition_from_membership_py, m)?)?;
    m.add_function(wrap_pyfunction!(normalized_mutual_info_py, m)?)?;
    Ok(())
}
