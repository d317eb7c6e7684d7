//! Centrality measures
//!
//! - Degree centrality over the directed view
//! - Edge betweenness (Brandes) over unweighted undirected adjacency lists

use super::common::{GraphView, NodeId};
use rustc_hash::FxHashMap;
use std::collections::{HashMap, VecDeque};

/// Degree centrality: `(in_degree + out_degree) / (n - 1)`.
///
/// Graphs with a single node give that node a centrality of 1.
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    if n <= 1 {
        return view.index_to_node.iter().map(|&id| (id, 1.0)).collect();
    }

    let scale = 1.0 / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let degree = view.in_degree(i) + view.out_degree(i);
            (view.index_to_node[i], degree as f64 * scale)
        })
        .collect()
}

/// Edge betweenness for an undirected, unweighted graph.
///
/// `adjacency` must be symmetric. Keys are `(u, v)` with `u < v`; every
/// edge present in `adjacency` gets an entry.
pub fn edge_betweenness(adjacency: &[Vec<usize>]) -> FxHashMap<(usize, usize), f64> {
    let n = adjacency.len();
    let key = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };

    let mut scores: FxHashMap<(usize, usize), f64> = FxHashMap::default();
    for (u, neighbors) in adjacency.iter().enumerate() {
        for &v in neighbors {
            scores.entry(key(u, v)).or_insert(0.0);
        }
    }

    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![usize::MAX; n];
    let mut delta = vec![0.0f64; n];

    for s in 0..n {
        for p in preds.iter_mut() {
            p.clear();
        }
        sigma.fill(0.0);
        dist.fill(usize::MAX);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adjacency[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                let share = sigma[v] / sigma[w] * (1.0 + delta[w]);
                if let Some(score) = scores.get_mut(&key(v, w)) {
                    *score += share;
                }
                delta[v] += share;
            }
        }
    }

    // Every pair was counted from both endpoints
    for score in scores.values_mut() {
        *score /= 2.0;
    }
    scores
}
