//! Shared utilities for graph algorithms
//!
//! Provides read-only, optimized views of the graph topology for algorithm execution.

use std::collections::HashMap;
use thiserror::Error;

/// Node Identifier type (i64, matching signed ids in edge lists)
pub type NodeId = i64;

/// Errors raised by algorithms that can fail to produce a result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("{algorithm} did not converge within {iterations} iterations")]
    NotConverged {
        algorithm: &'static str,
        iterations: usize,
    },

    #[error("{algorithm} refused a graph of {size} nodes (budget {budget})")]
    BudgetExceeded {
        algorithm: &'static str,
        size: usize,
        budget: usize,
    },
}

pub type AlgoResult<T> = Result<T, AlgoError>;

/// A dense, integer-indexed view of a directed graph using Compressed Sparse Row (CSR) format.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Build a view from per-node adjacency lists.
    ///
    /// `outgoing[i]` holds the target indices of node `i`; the incoming side is
    /// derived from it.
    pub fn from_adjacency_list(index_to_node: Vec<NodeId>, outgoing: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (u, targets) in outgoing.iter().enumerate() {
            for &v in targets {
                incoming[v].push(u);
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Undirected projection of the nodes in `members` (indices into this view).
    ///
    /// An edge in either direction becomes a single undirected edge; self loops
    /// are dropped. Node order in the result follows `members`.
    pub fn undirected_subgraph(&self, members: &[usize]) -> UndirectedView {
        let mut local = vec![usize::MAX; self.node_count];
        for (i, &idx) in members.iter().enumerate() {
            local[idx] = i;
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
        for (i, &u) in members.iter().enumerate() {
            for &v in self.successors(u).iter().chain(self.predecessors(u)) {
                let j = local[v];
                if j != usize::MAX && j != i {
                    adjacency[i].push(j);
                }
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        UndirectedView::from_adjacency(
            members.iter().map(|&idx| self.index_to_node[idx]).collect(),
            adjacency,
        )
    }
}

/// Simple undirected graph in CSR form. Every edge appears in both endpoints'
/// neighbor lists; there are no self loops or parallel edges.
#[derive(Debug, Clone)]
pub struct UndirectedView {
    pub node_count: usize,
    pub index_to_node: Vec<NodeId>,
    pub offsets: Vec<usize>,
    pub neighbors: Vec<usize>,
}

impl UndirectedView {
    /// Build from symmetric, deduplicated adjacency lists.
    pub fn from_adjacency(index_to_node: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for list in adjacency {
            neighbors.extend(list);
            offsets.push(neighbors.len());
        }
        Self {
            node_count,
            index_to_node,
            offsets,
            neighbors,
        }
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.neighbors[self.offsets[idx]..self.offsets[idx + 1]]
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Count edges with both endpoints inside `members`.
    pub fn internal_edges(&self, members: &[usize]) -> usize {
        let mut inside = vec![false; self.node_count];
        for &m in members {
            inside[m] = true;
        }
        let endpoints: usize = members
            .iter()
            .map(|&u| self.neighbors(u).iter().filter(|&&v| inside[v]).count())
            .sum();
        endpoints / 2
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a directed view from `(source, target)` id pairs, numbering nodes
    /// in order of first appearance.
    pub(crate) fn view_from_edges(edges: &[(NodeId, NodeId)]) -> GraphView {
        let mut index_to_node = Vec::new();
        let mut node_to_index = HashMap::new();
        let mut outgoing: Vec<Vec<usize>> = Vec::new();
        for &(s, t) in edges {
            for id in [s, t] {
                node_to_index.entry(id).or_insert_with(|| {
                    index_to_node.push(id);
                    outgoing.push(Vec::new());
                    index_to_node.len() - 1
                });
            }
            let (u, v) = (node_to_index[&s], node_to_index[&t]);
            if !outgoing[u].contains(&v) {
                outgoing[u].push(v);
            }
        }
        GraphView::from_adjacency_list(index_to_node, outgoing)
    }

    #[test]
    fn test_csr_degrees() {
        // 1 -> 2, 1 -> 3, 3 -> 1
        let view = view_from_edges(&[(1, 2), (1, 3), (3, 1)]);
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);

        let one = view.node_to_index[&1];
        let three = view.node_to_index[&3];
        assert_eq!(view.out_degree(one), 2);
        assert_eq!(view.in_degree(one), 1);
        assert_eq!(view.predecessors(three), &[one]);
    }

    #[test]
    fn test_undirected_subgraph_collapses_reciprocal_edges() {
        // 1 <-> 2, 2 -> 3, 3 -> 3 (self loop), 4 -> 1 (outside the subgraph)
        let view = view_from_edges(&[(1, 2), (2, 1), (2, 3), (3, 3), (4, 1)]);
        let members: Vec<usize> = [1, 2, 3].iter().map(|id| view.node_to_index[id]).collect();

        let undirected = view.undirected_subgraph(&members);
        assert_eq!(undirected.node_count, 3);
        assert_eq!(undirected.edge_count(), 2);
        assert_eq!(undirected.degree(0), 1);
        assert_eq!(undirected.degree(1), 2);
        assert_eq!(undirected.internal_edges(&[0, 1]), 1);
    }
}
