use crate::graph::{NodeId, SimpleGraph};
use crate::multiplex::LayerId;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<W> {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: W,
}

/// JSON view of a graph: its nodes in graph order and its weighted edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord<W> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerId>,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeRecord<W>>,
}

impl<W: Copy> GraphRecord<W> {
    pub fn from_graph(graph: &SimpleGraph<W>, layer: Option<LayerId>) -> Self {
        GraphRecord {
            layer,
            nodes: graph.nodes().collect(),
            edges: graph
                .edges()
                .map(|(source, target, weight)| EdgeRecord {
                    source,
                    target,
                    weight,
                })
                .collect(),
        }
    }

    pub fn to_graph(&self) -> SimpleGraph<W> {
        SimpleGraph::from_parts(
            self.nodes.iter().copied(),
            self.edges
                .iter()
                .map(|edge| (edge.source, edge.target, edge.weight)),
        )
    }
}

pub fn write_json<T: Serialize, O: Write>(output: O, value: &T) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(output, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LayerGraph, WeightedGraph};

    #[test]
    fn test_record_from_graph() {
        let graph = LayerGraph::from_parts([1, 2, 3], [(2, 3, 4)]);
        let record = GraphRecord::from_graph(&graph, Some(7));

        assert_eq!(record.layer, Some(7));
        assert_eq!(record.nodes, vec![1, 2, 3]);
        assert_eq!(record.edges.len(), 1);
        assert_eq!(record.edges[0].weight, 4);

        let rebuilt = record.to_graph();
        assert_eq!(rebuilt.node_set(), graph.node_set());
        assert_eq!(rebuilt.edge_weight(3, 2), Some(4));
    }

    #[test]
    fn test_write_json() {
        let graph = LayerGraph::from_parts([1, 2], [(1, 2, 1)]);
        let mut output = vec![];
        write_json(&mut output, &GraphRecord::from_graph(&graph, None)).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(value.get("layer").is_none());
        assert_eq!(value["nodes"], serde_json::json!([1, 2]));
        assert_eq!(value["edges"][0]["weight"], serde_json::json!(1));
    }
}
