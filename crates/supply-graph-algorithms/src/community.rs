//! Community detection algorithms
//!
//! - Weakly Connected Components (union-find over the directed view)
//! - Louvain modularity optimisation (undirected view)
//! - Girvan-Newman divisive clustering, first split level only (undirected view)

use super::centrality::edge_betweenness;
use super::common::{AlgoError, AlgoResult, GraphView, UndirectedView};
use rustc_hash::FxHashMap;

/// Result of WCC algorithm
#[derive(Debug, Clone)]
pub struct WccResult {
    /// Components as lists of node indices, ordered by their first member
    pub components: Vec<Vec<usize>>,
    /// Node index -> position in `components`
    pub node_component: Vec<usize>,
}

impl WccResult {
    /// The component with the most nodes; ties go to the earliest component.
    pub fn largest(&self) -> Option<&[usize]> {
        let mut best: Option<&Vec<usize>> = None;
        for component in &self.components {
            if best.map_or(true, |b| component.len() > b.len()) {
                best = Some(component);
            }
        }
        best.map(Vec::as_slice)
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction.
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for u in 0..n {
        for &v in view.successors(u) {
            uf.union(u, v);
        }
    }

    let mut slot_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut node_component = Vec::with_capacity(n);

    for i in 0..n {
        let root = uf.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(i);
        node_component.push(slot);
    }

    WccResult {
        components,
        node_component,
    }
}

/// A partition of an undirected view into communities.
///
/// `communities[label]` lists node indices; labels are assigned in order of
/// each community's first member.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub communities: Vec<Vec<usize>>,
}

impl Partition {
    /// Group nodes by an arbitrary per-node label.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut slot_of_label: FxHashMap<usize, usize> = FxHashMap::default();
        let mut communities: Vec<Vec<usize>> = Vec::new();
        for (node, &label) in labels.iter().enumerate() {
            let slot = *slot_of_label.entry(label).or_insert_with(|| {
                communities.push(Vec::new());
                communities.len() - 1
            });
            communities[slot].push(node);
        }
        Self { communities }
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }
}

/// Louvain configuration
#[derive(Debug, Clone)]
pub struct LouvainConfig {
    /// Modularity resolution (1.0 = standard modularity)
    pub resolution: f64,
    /// Maximum number of aggregation levels
    pub max_levels: usize,
    /// Maximum local-moving sweeps per level
    pub max_passes: usize,
    /// Minimum gain for a node to leave its community
    pub tolerance: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_levels: 32,
            max_passes: 64,
            tolerance: 1.0e-10,
        }
    }
}

/// Weighted undirected graph used between Louvain levels.
struct WeightedGraph {
    /// Neighbor lists without self loops; symmetric
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    degrees: Vec<f64>,
    two_m: f64,
}

impl WeightedGraph {
    fn from_view(view: &UndirectedView) -> Self {
        let adjacency: Vec<Vec<(usize, f64)>> = (0..view.node_count)
            .map(|u| view.neighbors(u).iter().map(|&v| (v, 1.0)).collect())
            .collect();
        let degrees: Vec<f64> = (0..view.node_count).map(|u| view.degree(u) as f64).collect();
        let two_m = degrees.iter().sum();
        Self {
            adjacency,
            self_loops: vec![0.0; view.node_count],
            degrees,
            two_m,
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Phase one: move single nodes between neighboring communities while
    /// modularity improves. Returns compact labels and whether anything moved.
    fn local_moving(&self, config: &LouvainConfig) -> (Vec<usize>, bool) {
        let n = self.node_count();
        let mut community: Vec<usize> = (0..n).collect();
        let mut totals = self.degrees.clone();
        let mut weight_to = vec![0.0; n];
        let mut touched: Vec<usize> = Vec::new();
        let mut moved_any = false;

        for _ in 0..config.max_passes {
            let mut moves = 0usize;

            for u in 0..n {
                let k_u = self.degrees[u];
                let own = community[u];

                for &(v, w) in &self.adjacency[u] {
                    let c = community[v];
                    if weight_to[c] == 0.0 {
                        touched.push(c);
                    }
                    weight_to[c] += w;
                }

                totals[own] -= k_u;
                let gain = |c: usize, links: f64| {
                    links - config.resolution * totals[c] * k_u / self.two_m
                };

                let mut best = own;
                let mut best_gain = gain(own, weight_to[own]);
                for &c in &touched {
                    let g = gain(c, weight_to[c]);
                    if g > best_gain + config.tolerance {
                        best = c;
                        best_gain = g;
                    }
                }
                totals[best] += k_u;

                for &c in &touched {
                    weight_to[c] = 0.0;
                }
                touched.clear();

                if best != own {
                    community[u] = best;
                    moves += 1;
                }
            }

            if moves == 0 {
                break;
            }
            moved_any = true;
        }

        (compact_labels(&community), moved_any)
    }

    /// Phase two: collapse each community into a single node.
    fn aggregate(&self, labels: &[usize], community_count: usize) -> Self {
        let mut rows: Vec<FxHashMap<usize, f64>> = vec![FxHashMap::default(); community_count];
        let mut self_loops = vec![0.0; community_count];

        for (u, neighbors) in self.adjacency.iter().enumerate() {
            let cu = labels[u];
            self_loops[cu] += self.self_loops[u];
            for &(v, w) in neighbors {
                let cv = labels[v];
                if cu == cv {
                    // Each internal edge is visited from both ends
                    self_loops[cu] += w / 2.0;
                } else {
                    *rows[cu].entry(cv).or_insert(0.0) += w;
                }
            }
        }

        let adjacency: Vec<Vec<(usize, f64)>> = rows
            .into_iter()
            .map(|row| {
                let mut list: Vec<(usize, f64)> = row.into_iter().collect();
                list.sort_unstable_by_key(|&(c, _)| c);
                list
            })
            .collect();
        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&self_loops)
            .map(|(list, &loops)| list.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * loops)
            .collect();

        Self {
            adjacency,
            self_loops,
            degrees,
            two_m: self.two_m,
        }
    }
}

/// Renumber labels to 0..k in order of first appearance.
fn compact_labels(labels: &[usize]) -> Vec<usize> {
    let mut remap: FxHashMap<usize, usize> = FxHashMap::default();
    labels
        .iter()
        .map(|&label| {
            let next = remap.len();
            *remap.entry(label).or_insert(next)
        })
        .collect()
}

/// Louvain community detection.
///
/// Nodes are visited in index order, so the result is deterministic for a
/// given view.
pub fn louvain(view: &UndirectedView, config: &LouvainConfig) -> AlgoResult<Partition> {
    let n = view.node_count;
    if n == 0 {
        return Err(AlgoError::EmptyGraph);
    }

    let mut membership: Vec<usize> = (0..n).collect();
    if view.edge_count() == 0 {
        return Ok(Partition::from_labels(&membership));
    }

    let mut level = WeightedGraph::from_view(view);
    for _ in 0..config.max_levels {
        let (labels, moved) = level.local_moving(config);
        if !moved {
            break;
        }

        for m in membership.iter_mut() {
            *m = labels[*m];
        }

        let community_count = labels.iter().max().map_or(0, |&max| max + 1);
        if community_count == level.node_count() {
            break;
        }
        level = level.aggregate(&labels, community_count);
    }

    Ok(Partition::from_labels(&membership))
}

/// Girvan-Newman configuration
#[derive(Debug, Clone)]
pub struct GirvanNewmanConfig {
    /// Largest view the algorithm accepts; edge betweenness is O(V·E) per removal
    pub max_nodes: usize,
    /// Maximum number of edges removed while waiting for the first split
    pub max_removals: usize,
}

impl Default for GirvanNewmanConfig {
    fn default() -> Self {
        Self {
            max_nodes: 2_000,
            max_removals: 10_000,
        }
    }
}

/// Girvan-Newman, first level of the dendrogram.
///
/// Repeatedly removes the edge with the highest edge betweenness until the
/// number of connected components grows, then returns those components.
pub fn girvan_newman(view: &UndirectedView, config: &GirvanNewmanConfig) -> AlgoResult<Partition> {
    let n = view.node_count;
    if n == 0 {
        return Err(AlgoError::EmptyGraph);
    }
    if n > config.max_nodes {
        return Err(AlgoError::BudgetExceeded {
            algorithm: "Girvan-Newman",
            size: n,
            budget: config.max_nodes,
        });
    }

    let mut adjacency: Vec<Vec<usize>> = (0..n).map(|u| view.neighbors(u).to_vec()).collect();
    let initial = component_labels(&adjacency);
    let initial_count = initial.iter().max().map_or(0, |&max| max + 1);
    if view.edge_count() == 0 {
        return Ok(Partition::from_labels(&initial));
    }

    for _ in 0..config.max_removals {
        let scores = edge_betweenness(&adjacency);
        let Some((u, v)) = scores
            .into_iter()
            .max_by(|(a, sa), (b, sb)| sa.total_cmp(sb).then_with(|| b.cmp(a)))
            .map(|(edge, _)| edge)
        else {
            break;
        };

        adjacency[u].retain(|&x| x != v);
        adjacency[v].retain(|&x| x != u);

        let labels = component_labels(&adjacency);
        let count = labels.iter().max().map_or(0, |&max| max + 1);
        if count > initial_count {
            return Ok(Partition::from_labels(&labels));
        }
    }

    Err(AlgoError::NotConverged {
        algorithm: "Girvan-Newman",
        iterations: config.max_removals,
    })
}

/// Connected component label per node via BFS in index order.
fn component_labels(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut labels = vec![usize::MAX; n];
    let mut next = 0;
    let mut queue = std::collections::VecDeque::new();

    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        labels[start] = next;
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for &v in &adjacency[u] {
                if labels[v] == usize::MAX {
                    labels[v] = next;
                    queue.push_back(v);
                }
            }
        }
        next += 1;
    }

    labels
}
