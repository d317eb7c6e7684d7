//! In-memory co-purchasing graph
//!
//! The graph is built once through [`GraphBuilder`] and is immutable
//! afterwards. Duplicate edges collapse; nodes keep the order in which they
//! first appeared.

use super::types::NodeId;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use supply_graph_algorithms::GraphView;

/// Accumulates directed edges and freezes them into a [`CoPurchaseGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: IndexSet<NodeId>,
    edges: FxHashSet<(usize, usize)>,
    outgoing: Vec<Vec<usize>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `source -> target`. Returns false if the edge already existed.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        let u = self.intern(source);
        let v = self.intern(target);
        if self.edges.insert((u, v)) {
            self.outgoing[u].push(v);
            true
        } else {
            false
        }
    }

    fn intern(&mut self, id: NodeId) -> usize {
        let (idx, inserted) = self.nodes.insert_full(id);
        if inserted {
            self.outgoing.push(Vec::new());
        }
        idx
    }

    pub fn build(self) -> CoPurchaseGraph {
        let index_to_node = self.nodes.iter().map(NodeId::as_i64).collect();
        let view = GraphView::from_adjacency_list(index_to_node, self.outgoing);
        CoPurchaseGraph {
            nodes: self.nodes,
            view,
        }
    }
}

/// Directed, simple graph over product identifiers
#[derive(Debug)]
pub struct CoPurchaseGraph {
    nodes: IndexSet<NodeId>,
    view: GraphView,
}

impl CoPurchaseGraph {
    /// Build a graph straight from `(source, target)` pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut builder = GraphBuilder::new();
        for (source, target) in edges {
            builder.add_edge(NodeId::new(source), NodeId::new(target));
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.view.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.view.edge_count()
    }

    /// CSR view shared with the algorithm crate
    pub fn view(&self) -> &GraphView {
        &self.view
    }

    /// Nodes in first-appearance order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(u), Some(v)) => self.view.successors(u).contains(&v),
            _ => false,
        }
    }

    /// All edges, grouped by source in node order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.node_count()).flat_map(move |u| {
            let source = self.nodes[u];
            self.view
                .successors(u)
                .iter()
                .map(move |&v| (source, self.nodes[v]))
        })
    }

    pub fn in_degree(&self, id: NodeId) -> Option<usize> {
        self.index_of(id).map(|idx| self.view.in_degree(idx))
    }

    pub fn out_degree(&self, id: NodeId) -> Option<usize> {
        self.index_of(id).map(|idx| self.view.out_degree(idx))
    }
}
