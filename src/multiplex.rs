use crate::config::{LoaderOptions, SelfLoopPolicy};
use crate::graph::{LayerGraph, NodeId, WeightedGraph};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::BTreeSet;
use thiserror::Error;

pub type LayerId = i64;

/// An edge as read from a layer's edge list. The orientation carries no meaning.
pub type Edge = (NodeId, NodeId);

#[derive(Debug, Error, PartialEq)]
pub enum MultiplexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Converts a layer id -> edge list mapping into one weighted simple graph per layer,
/// ordered by ascending layer id.
///
/// Every graph holds the union of all endpoints across all layers, so the graphs are node
/// aligned. Each distinct unordered pair becomes one edge whose weight is the number of
/// times it occurs in the layer, in either orientation. Self-loops are dropped.
pub fn build_layer_graphs<'a, L, E>(layers: L) -> Result<Vec<LayerGraph>, MultiplexError>
where
    L: IntoIterator<Item = (&'a LayerId, &'a Vec<E>)>,
    E: AsRef<[NodeId]> + 'a,
{
    build_layer_graphs_with(layers, &LoaderOptions::default())
}

pub fn build_layer_graphs_with_options<'a, L, E>(
    layers: L,
    options: &LoaderOptions,
) -> Result<Vec<LayerGraph>, MultiplexError>
where
    L: IntoIterator<Item = (&'a LayerId, &'a Vec<E>)>,
    E: AsRef<[NodeId]> + 'a,
{
    build_layer_graphs_with(layers, options)
}

/// Same as [`build_layer_graphs`], for any graph type providing [`WeightedGraph`].
pub fn build_layer_graphs_with<'a, G, L, E>(
    layers: L,
    options: &LoaderOptions,
) -> Result<Vec<G>, MultiplexError>
where
    G: WeightedGraph<Weight = i64> + Default,
    L: IntoIterator<Item = (&'a LayerId, &'a Vec<E>)>,
    E: AsRef<[NodeId]> + 'a,
{
    Ok(build_layers_with(layers, options)?
        .into_iter()
        .map(|(_, graph)| graph)
        .collect())
}

/// Builds the layer graphs and keeps each one paired with its layer id.
pub fn build_layers_with<'a, G, L, E>(
    layers: L,
    options: &LoaderOptions,
) -> Result<Vec<(LayerId, G)>, MultiplexError>
where
    G: WeightedGraph<Weight = i64> + Default,
    L: IntoIterator<Item = (&'a LayerId, &'a Vec<E>)>,
    E: AsRef<[NodeId]> + 'a,
{
    let parsed = layers
        .into_iter()
        .map(|(layer, edges)| Ok((*layer, parse_layer(*layer, edges)?)))
        .collect::<Result<Vec<_>, MultiplexError>>()?;

    if let Some(layer) = parsed.iter().map(|(layer, _)| layer).duplicates().next() {
        return Err(MultiplexError::InvalidInput(format!(
            "Layer {} is given more than once",
            layer
        )));
    }

    let nodes = node_set(parsed.iter().map(|(_, edges)| edges.as_slice()));
    debug!(
        "Building {} layer graph(s) over {} node(s)",
        parsed.len(),
        nodes.len()
    );

    let mut graphs = parsed
        .iter()
        .map(|(layer, edges)| (*layer, build_layer(*layer, edges, &nodes, options)))
        .collect::<Vec<(LayerId, G)>>();
    graphs.sort_by_key(|(layer, _)| *layer);
    Ok(graphs)
}

/// The union of all endpoints across the given edge lists.
pub fn node_set<'a, I>(layers: I) -> BTreeSet<NodeId>
where
    I: IntoIterator<Item = &'a [Edge]>,
{
    layers
        .into_iter()
        .flat_map(|edges| edges.iter().flat_map(|&(u, v)| [u, v]))
        .collect()
}

fn parse_layer<E>(layer: LayerId, edges: &[E]) -> Result<Vec<Edge>, MultiplexError>
where
    E: AsRef<[NodeId]>,
{
    if edges.is_empty() {
        return Err(MultiplexError::InvalidInput(format!(
            "Layer {} has an empty edge list",
            layer
        )));
    }
    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| match edge.as_ref() {
            [u, v] => Ok((*u, *v)),
            other => Err(MultiplexError::InvalidInput(format!(
                "Edge {} of layer {} has {} endpoint(s), expected 2",
                index,
                layer,
                other.len()
            ))),
        })
        .collect()
}

fn build_layer<G>(
    layer: LayerId,
    edges: &[Edge],
    nodes: &BTreeSet<NodeId>,
    options: &LoaderOptions,
) -> G
where
    G: WeightedGraph<Weight = i64> + Default,
{
    let mut graph = G::default();
    graph.add_nodes(nodes.iter().copied());
    let input_count = edges.len();

    let (self_loops, edges): (Vec<Edge>, Vec<Edge>) = edges.iter().partition(|(u, v)| u == v);
    let (forward, backward): (Vec<Edge>, Vec<Edge>) = edges.into_iter().partition(|(u, v)| u < v);

    for (u, v) in forward {
        increment_edge(&mut graph, u, v);
    }
    // stored under the (smaller, larger) orientation of the forward edges
    for (u, v) in backward {
        increment_edge(&mut graph, v, u);
    }

    if !self_loops.is_empty() {
        match options.self_loops {
            SelfLoopPolicy::Drop => {
                warn!(
                    "Layer {}: dropped {} self-loop edge(s)",
                    layer,
                    self_loops.len()
                );
            }
            SelfLoopPolicy::Keep => {
                for (u, _) in self_loops {
                    increment_edge(&mut graph, u, u);
                }
            }
        }
    }

    debug!("Layer {}: {} input edge(s)", layer, input_count);
    graph
}

fn increment_edge<G: WeightedGraph<Weight = i64>>(graph: &mut G, u: NodeId, v: NodeId) {
    if graph.has_edge(u, v) {
        let weight = graph.edge_weight(u, v).unwrap_or_default();
        graph.set_edge_weight(u, v, weight + 1);
    } else {
        graph.add_edge(u, v, 1);
    }
}
