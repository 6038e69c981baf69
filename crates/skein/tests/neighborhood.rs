//! Integration tests for the neighborhood extractor.

mod common;

use common::{item, store_with_items};
use skein::domain::RelationshipType;
use skein::engine::DependencyStore;
use skein::error::Error;
use std::collections::{BTreeSet, HashSet};

fn all_types() -> HashSet<RelationshipType> {
    RelationshipType::ALL.into_iter().collect()
}

fn only(types: &[RelationshipType]) -> HashSet<RelationshipType> {
    types.iter().copied().collect()
}

/// a blocks b, b blocks c, a parent-of p, p related r.
async fn sample_store() -> DependencyStore {
    let (_, store) = store_with_items(&["a", "b", "c", "p", "r"]).await;
    store
        .add_dependency(&item("a"), &item("b"), RelationshipType::Blocks)
        .await
        .unwrap();
    store
        .add_dependency(&item("b"), &item("c"), RelationshipType::Blocks)
        .await
        .unwrap();
    store
        .add_dependency(&item("a"), &item("p"), RelationshipType::Parent)
        .await
        .unwrap();
    store
        .add_dependency(&item("p"), &item("r"), RelationshipType::Related)
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn depth_zero_returns_only_the_focus() {
    let store = sample_store().await;

    let hood = store
        .neighborhoods()
        .neighborhood(&item("a"), 0, &all_types())
        .await
        .unwrap();

    assert_eq!(hood.node_refs(), vec![&item("a")]);
    assert!(hood.edges.is_empty());
}

#[tokio::test]
async fn empty_filter_returns_only_the_focus() {
    let store = sample_store().await;

    let hood = store
        .neighborhoods()
        .neighborhood(&item("a"), 5, &HashSet::new())
        .await
        .unwrap();

    assert_eq!(hood.node_refs(), vec![&item("a")]);
    assert!(hood.edges.is_empty());
}

#[tokio::test]
async fn expansion_is_monotonic_in_depth() {
    let store = sample_store().await;
    let extractor = store.neighborhoods();

    let mut previous: BTreeSet<String> = BTreeSet::new();
    for depth in 0..5 {
        let hood = extractor
            .neighborhood(&item("a"), depth, &all_types())
            .await
            .unwrap();
        let current: BTreeSet<String> =
            hood.nodes.iter().map(|n| n.item.to_string()).collect();
        assert!(
            current.is_superset(&previous),
            "depth {depth} lost nodes: {previous:?} -> {current:?}"
        );
        previous = current;
    }

    // Everything is reachable from "a" within four hops.
    assert_eq!(previous.len(), 5);
}

#[tokio::test]
async fn rings_reflect_hop_distance() {
    let store = sample_store().await;

    let hood = store
        .neighborhoods()
        .neighborhood(&item("a"), 2, &all_types())
        .await
        .unwrap();

    let ring_of = |id: &str| {
        hood.nodes
            .iter()
            .find(|n| n.item == item(id))
            .map(|n| n.ring)
    };
    assert_eq!(ring_of("a"), Some(0));
    assert_eq!(ring_of("b"), Some(1));
    assert_eq!(ring_of("p"), Some(1));
    assert_eq!(ring_of("c"), Some(2));
    assert_eq!(ring_of("r"), Some(2));
}

#[tokio::test]
async fn type_filter_limits_traversal_and_edges() {
    let store = sample_store().await;

    let hood = store
        .neighborhoods()
        .neighborhood(
            &item("a"),
            3,
            &only(&[RelationshipType::Blocks, RelationshipType::BlockedBy]),
        )
        .await
        .unwrap();

    let ids: Vec<String> = hood.nodes.iter().map(|n| n.item.to_string()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert!(hood
        .edges
        .iter()
        .all(|e| e.relationship.family() == RelationshipType::Blocks.family()));
}

#[tokio::test]
async fn directional_filter_sees_only_outbound_types() {
    let store = sample_store().await;

    // From b, "blocks" reaches c but not a; a sits behind a blocked-by edge.
    let hood = store
        .neighborhoods()
        .neighborhood(&item("b"), 2, &only(&[RelationshipType::Blocks]))
        .await
        .unwrap();
    let ids: Vec<String> = hood.nodes.iter().map(|n| n.item.to_string()).collect();
    assert_eq!(ids, vec!["b", "c"]);

    let hood = store
        .neighborhoods()
        .neighborhood(&item("b"), 2, &only(&[RelationshipType::BlockedBy]))
        .await
        .unwrap();
    let ids: Vec<String> = hood.nodes.iter().map(|n| n.item.to_string()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn included_edges_connect_included_nodes_only() {
    let store = sample_store().await;

    let hood = store
        .neighborhoods()
        .neighborhood(&item("a"), 1, &all_types())
        .await
        .unwrap();

    let nodes: BTreeSet<_> = hood.nodes.iter().map(|n| n.item.clone()).collect();
    for edge in &hood.edges {
        assert!(nodes.contains(&edge.source));
        assert!(nodes.contains(&edge.target));
    }
    // b -> c leaves the depth-1 neighborhood and must be absent.
    assert!(!hood
        .edges
        .iter()
        .any(|e| e.source == item("b") && e.target == item("c")));
}

#[tokio::test]
async fn unknown_focus_fails_with_not_found() {
    let store = sample_store().await;

    let err = store
        .neighborhoods()
        .neighborhood(&item("ghost"), 1, &all_types())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(id) if id == item("ghost")));
}

#[tokio::test]
async fn known_item_without_edges_is_alone() {
    let (_, store) = store_with_items(&["solo"]).await;

    let hood = store
        .neighborhoods()
        .neighborhood(&item("solo"), 3, &all_types())
        .await
        .unwrap();

    assert_eq!(hood.node_refs(), vec![&item("solo")]);
    assert!(hood.edges.is_empty());
}

#[tokio::test]
async fn repeated_extraction_is_deterministic() {
    let store = sample_store().await;
    let extractor = store.neighborhoods();

    let first = extractor
        .neighborhood(&item("a"), 2, &all_types())
        .await
        .unwrap();
    for _ in 0..3 {
        let again = extractor
            .neighborhood(&item("a"), 2, &all_types())
            .await
            .unwrap();
        assert_eq!(again, first);
    }
}
