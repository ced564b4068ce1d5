use crate::graph::{NodeId, SimpleGraph};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

pub type CommunityId = usize;

#[derive(Debug, Error, PartialEq)]
pub enum PartitionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Assignment of nodes to communities, keyed by node id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    assignments: BTreeMap<NodeId, CommunityId>,
}

impl Partition {
    /// Converts a membership vector indexed by vertex position, as returned by community
    /// detection on an index-relabelled graph, into a partition keyed by node id.
    /// `node_order[i]` is the node id of vertex `i`.
    pub fn from_membership(
        membership: &[CommunityId],
        node_order: &[NodeId],
    ) -> Result<Self, PartitionError> {
        if membership.len() != node_order.len() {
            return Err(PartitionError::InvalidInput(format!(
                "Membership has {} entries but there are {} vertices",
                membership.len(),
                node_order.len()
            )));
        }
        if let Some(node) = node_order.iter().duplicates().next() {
            return Err(PartitionError::InvalidInput(format!(
                "Node {} appears at more than one vertex position",
                node
            )));
        }
        if let Some(&community) = membership.iter().find(|&&id| id >= node_order.len()) {
            return Err(PartitionError::InvalidInput(format!(
                "Community {} is out of range for {} vertices",
                community,
                node_order.len()
            )));
        }
        Ok(Partition {
            assignments: node_order
                .iter()
                .copied()
                .zip(membership.iter().copied())
                .collect(),
        })
    }

    /// Builds a partition from a community list, where a group's position is its
    /// community id.
    pub fn from_communities<G>(groups: &[G]) -> Result<Self, PartitionError>
    where
        G: AsRef<[NodeId]>,
    {
        let mut assignments = BTreeMap::new();
        for (community, group) in groups.iter().enumerate() {
            for &node in group.as_ref() {
                if let Some(previous) = assignments.insert(node, community) {
                    return Err(PartitionError::InvalidInput(format!(
                        "Node {} is in communities {} and {}",
                        node, previous, community
                    )));
                }
            }
        }
        Ok(Partition { assignments })
    }

    pub fn community_of(&self, node: NodeId) -> Option<CommunityId> {
        self.assignments.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, CommunityId)> + '_ {
        self.assignments.iter().map(|(node, community)| (*node, *community))
    }

    pub fn community_count(&self) -> usize {
        self.assignments.values().unique().count()
    }

    /// The community list: position `i` holds the nodes of community `i` in ascending
    /// order. Ids with no members give empty groups.
    pub fn communities(&self) -> Vec<Vec<NodeId>> {
        let size = self.assignments.values().max().map_or(0, |max| max + 1);
        let mut groups = vec![vec![]; size];
        for (node, community) in self.iter() {
            groups[community].push(node);
        }
        groups
    }

    /// One community label per node, in ascending node order.
    pub fn labels(&self) -> Vec<CommunityId> {
        self.assignments.values().copied().collect()
    }
}

/// [`Partition::from_membership`] using the graph's node order as the vertex positions.
pub fn partition_from_graph<W: Copy>(
    membership: &[CommunityId],
    graph: &SimpleGraph<W>,
) -> Result<Partition, PartitionError> {
    let node_order = graph.nodes().collect::<Vec<_>>();
    Partition::from_membership(membership, &node_order)
}

/// Flattens a community list into labels ordered by node id.
///
/// A node listed in several groups yields one label per occurrence, smallest community
/// first.
pub fn labels_from_communities<G>(groups: &[G]) -> Vec<CommunityId>
where
    G: AsRef<[NodeId]>,
{
    groups
        .iter()
        .enumerate()
        .flat_map(|(community, group)| {
            group
                .as_ref()
                .iter()
                .map(move |&node| (node, community))
        })
        .sorted()
        .map(|(_, community)| community)
        .collect()
}

/// Normalized mutual information of two labelings of the same nodes, normalised by the
/// arithmetic mean of the two entropies. Returns a value in `[0, 1]`.
pub fn normalized_mutual_info(
    first: &[CommunityId],
    second: &[CommunityId],
) -> Result<f64, PartitionError> {
    if first.len() != second.len() {
        return Err(PartitionError::InvalidInput(format!(
            "Label lists differ in length: {} and {}",
            first.len(),
            second.len()
        )));
    }
    if first.is_empty() {
        return Err(PartitionError::InvalidInput(
            "Label lists are empty".to_string(),
        ));
    }

    let first_counts = first.iter().counts();
    let second_counts = second.iter().counts();
    // a single cluster on both sides is a perfect match
    if first_counts.len() == 1 && second_counts.len() == 1 {
        return Ok(1.0);
    }

    let n = first.len() as f64;
    let joint: HashMap<(&CommunityId, &CommunityId), usize> =
        first.iter().zip(second.iter()).counts();
    let mutual_info = joint
        .iter()
        .map(|((a, b), &count)| {
            let count = count as f64;
            let expected = first_counts[a] as f64 * second_counts[b] as f64;
            count / n * (n * count / expected).ln()
        })
        .sum::<f64>()
        .max(0.0);
    if mutual_info == 0.0 {
        return Ok(0.0);
    }

    let normalizer = (entropy(&first_counts, n) + entropy(&second_counts, n)) / 2.0;
    Ok((mutual_info / normalizer).min(1.0))
}

fn entropy(counts: &HashMap<&CommunityId, usize>, n: f64) -> f64 {
    -counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * p.ln()
        })
        .sum::<f64>()
}
