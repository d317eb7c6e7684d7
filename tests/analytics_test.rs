use supply_graph::analytics::{compute_stats, detect_communities, score_risk};
use supply_graph::analytics::risk::{DEFAULT_RISK_SEED, MAX_SCORE};
use supply_graph::{classify, CoPurchaseGraph, CommunityAlgorithm, NativeAlgorithms, QueryKind};

/// Two directed 6-cycles with chords, bridged once, plus a detached pair.
fn clustered_graph() -> CoPurchaseGraph {
    let mut edges = Vec::new();
    for offset in [0i64, 10] {
        for i in 0..6 {
            edges.push((offset + i, offset + (i + 1) % 6));
            edges.push((offset + i, offset + (i + 2) % 6));
        }
    }
    edges.push((5, 10));
    edges.push((100, 101));
    CoPurchaseGraph::from_edges(edges)
}

#[test]
fn test_density_bounds() {
    let algorithms = NativeAlgorithms::default();
    for graph in [
        CoPurchaseGraph::from_edges(Vec::<(i64, i64)>::new()),
        CoPurchaseGraph::from_edges([(1, 1)]),
        clustered_graph(),
    ] {
        let basic = compute_stats(&graph, &algorithms).basic_stats;
        assert!((0.0..=1.0).contains(&basic.density), "density {}", basic.density);
        assert!(!basic.density.is_nan());
    }
}

#[test]
fn test_largest_component_bounds() {
    let graph = clustered_graph();
    let basic = compute_stats(&graph, &NativeAlgorithms::default()).basic_stats;

    assert_eq!(basic.largest_cc_size, 12);
    assert!(basic.largest_cc_size <= basic.num_nodes);
    assert!(basic.largest_cc_percentage > 0.0 && basic.largest_cc_percentage <= 100.0);
}

#[test]
fn test_degree_distribution_keys_and_mass() {
    let graph = clustered_graph();
    let dist = compute_stats(&graph, &NativeAlgorithms::default()).degree_distribution;

    let observed_out: std::collections::BTreeSet<usize> =
        graph.nodes().filter_map(|n| graph.out_degree(n)).collect();
    assert_eq!(dist.out_degree.keys().copied().collect::<std::collections::BTreeSet<_>>(), observed_out);

    for values in [&dist.in_degree, &dist.out_degree] {
        let total: f64 = values.values().sum();
        assert!(total <= 1.0 + 1e-9);
    }
}

#[test]
fn test_community_percentages_stay_within_component() {
    let graph = clustered_graph();
    let communities = detect_communities(
        &graph,
        &NativeAlgorithms::default(),
        CommunityAlgorithm::Louvain,
        100,
    );

    assert_eq!(communities.len(), 2);
    let total: f64 = communities.iter().map(|c| c.percentage).sum();
    assert!(total <= 100.0 + 1e-9);
    assert!(communities.iter().all(|c| c.count == 6));
}

#[test]
fn test_girvan_newman_splits_on_bridge() {
    let graph = clustered_graph();
    let communities = detect_communities(
        &graph,
        &NativeAlgorithms::default(),
        CommunityAlgorithm::GirvanNewman,
        10,
    );

    assert_eq!(communities.len(), 2);
    assert_eq!(communities[0].count + communities[1].count, 12);
}

#[test]
fn test_risk_scores_are_bounded_and_deterministic() {
    let graph = clustered_graph();
    let algorithms = NativeAlgorithms::default();

    let first = score_risk(&graph, &algorithms, 10, DEFAULT_RISK_SEED);
    let second = score_risk(&graph, &algorithms, 10, DEFAULT_RISK_SEED);

    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
    for entry in &first {
        assert!((0.0..=MAX_SCORE).contains(&entry.score));
        assert!(!entry.reasons.is_empty());
    }
}

#[test]
fn test_classification_examples() {
    assert_eq!(classify("show me risk clusters"), QueryKind::Complex);
    assert_eq!(classify("give me stats overview and risk"), QueryKind::Hybrid);
    assert_eq!(classify("hello"), QueryKind::Simple);
}
