//! Filter directives, uniqueness policies and visitor halts

use arbor_core::{
    FilterDirective, StrategyKind, Traverser, Uniqueness, UniquenessPolicy, Vertex,
};
use arbor_storage::MemStore;
use arbor_test_harness::{
    cycle_graph, diamond_graph, graph_from_edges, recording_traverser, tree_graph, vid,
    Recording, EDGES,
};

fn keys_of(
    traverser: &Traverser<MemStore, (), Recording>,
    start: &str,
    strategy: StrategyKind,
    uniqueness: Uniqueness,
    recording: Recording,
) -> Vec<String> {
    let mut recording = recording;
    traverser
        .traverse(vid(start), strategy, uniqueness, &(), &mut recording)
        .unwrap();
    recording.keys().into_iter().map(String::from).collect()
}

/// Tree traverser whose filter applies `directive` to vertex `a` only
fn tree_with_directive_on_a(directive: FilterDirective) -> Traverser<MemStore, (), Recording> {
    recording_traverser(tree_graph().unwrap(), EDGES)
        .filter(move |_, vertex: &Vertex, _, _, _| {
            if vertex.key() == "a" {
                directive
            } else {
                FilterDirective::IncludeAndContinue
            }
        })
        .build()
        .unwrap()
}

// ============================================================================
// Filter directives
// ============================================================================

#[test]
fn test_include_and_prune_visits_without_descendants() {
    let traverser = tree_with_directive_on_a(FilterDirective::IncludeAndPrune);

    for (strategy, expected) in [
        (StrategyKind::BreadthFirst, vec!["root", "a", "b"]),
        (StrategyKind::DepthFirstPre, vec!["root", "a", "b"]),
        (StrategyKind::DepthFirstPost, vec!["a", "b", "root"]),
    ] {
        let keys = keys_of(&traverser, "root", strategy, Uniqueness::none(), Recording::new());
        assert_eq!(keys, expected, "{:?}", strategy);
    }
}

#[test]
fn test_exclude_and_continue_visits_children_only() {
    let traverser = tree_with_directive_on_a(FilterDirective::ExcludeAndContinue);

    for (strategy, expected) in [
        (StrategyKind::BreadthFirst, vec!["root", "b", "c"]),
        (StrategyKind::DepthFirstPre, vec!["root", "c", "b"]),
        (StrategyKind::DepthFirstPost, vec!["c", "b", "root"]),
    ] {
        let keys = keys_of(&traverser, "root", strategy, Uniqueness::none(), Recording::new());
        assert_eq!(keys, expected, "{:?}", strategy);
    }
}

#[test]
fn test_exclude_and_prune_hides_subtree() {
    let traverser = tree_with_directive_on_a(FilterDirective::ExcludeAndPrune);

    for strategy in StrategyKind::ALL {
        let mut keys = keys_of(&traverser, "root", strategy, Uniqueness::none(), Recording::new());
        keys.sort();
        assert_eq!(keys, vec!["b", "root"], "{:?}", strategy);
    }
}

#[test]
fn test_pruned_start_vertex_ends_run() {
    let traverser = recording_traverser(tree_graph().unwrap(), EDGES)
        .filter(|_, _, _, _, _| FilterDirective::ExcludeAndPrune)
        .build()
        .unwrap();

    for strategy in StrategyKind::ALL {
        let keys = keys_of(&traverser, "root", strategy, Uniqueness::none(), Recording::new());
        assert!(keys.is_empty());
    }
}

// ============================================================================
// Vertex uniqueness
// ============================================================================

#[test]
fn test_diamond_without_uniqueness_revisits() {
    let traverser = recording_traverser(diamond_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    let keys = keys_of(
        &traverser,
        "root",
        StrategyKind::BreadthFirst,
        Uniqueness::none(),
        Recording::new(),
    );
    assert_eq!(keys, vec!["root", "a", "b", "d", "d", "e", "e"]);

    let keys = keys_of(
        &traverser,
        "root",
        StrategyKind::DepthFirstPost,
        Uniqueness::none(),
        Recording::new(),
    );
    assert_eq!(keys, vec!["e", "d", "a", "e", "d", "b", "root"]);
}

#[test]
fn test_diamond_global_vertices_visits_once() {
    let traverser = recording_traverser(diamond_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    for (strategy, expected) in [
        (StrategyKind::BreadthFirst, vec!["root", "a", "b", "d", "e"]),
        (StrategyKind::DepthFirstPre, vec!["root", "a", "d", "e", "b"]),
        (StrategyKind::DepthFirstPost, vec!["e", "d", "a", "b", "root"]),
    ] {
        let keys = keys_of(
            &traverser,
            "root",
            strategy,
            Uniqueness::global_vertices(),
            Recording::new(),
        );
        assert_eq!(keys, expected, "{:?}", strategy);
    }
}

#[test]
fn test_diamond_path_vertices_allows_branch_revisits() {
    let traverser = recording_traverser(diamond_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    let keys = keys_of(
        &traverser,
        "root",
        StrategyKind::DepthFirstPre,
        Uniqueness::path_vertices(),
        Recording::new(),
    );
    assert_eq!(keys, vec!["root", "a", "d", "e", "b", "d", "e"]);
}

#[test]
fn test_cycle_without_uniqueness_needs_caller_cutoff() {
    let traverser = recording_traverser(cycle_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    for strategy in [StrategyKind::BreadthFirst, StrategyKind::DepthFirstPre] {
        let keys = keys_of(
            &traverser,
            "a",
            strategy,
            Uniqueness::none(),
            Recording::with_limit(7),
        );
        assert_eq!(keys, vec!["a", "b", "a", "b", "a", "b", "a"], "{:?}", strategy);
    }
}

#[test]
fn test_cycle_terminates_with_path_or_global() {
    let traverser = recording_traverser(cycle_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    for uniqueness in [Uniqueness::path_vertices(), Uniqueness::global_vertices()] {
        for (strategy, expected) in [
            (StrategyKind::BreadthFirst, vec!["a", "b"]),
            (StrategyKind::DepthFirstPre, vec!["a", "b"]),
            (StrategyKind::DepthFirstPost, vec!["b", "a"]),
        ] {
            let keys = keys_of(&traverser, "a", strategy, uniqueness, Recording::new());
            assert_eq!(keys, expected, "{:?} {:?}", strategy, uniqueness);
        }
    }
}

// ============================================================================
// Edge uniqueness
// ============================================================================

#[test]
fn test_self_loop_edge_uniqueness() {
    let store = graph_from_edges(&["a"], &[("a", "a")]).unwrap();
    let traverser = recording_traverser(store, EDGES).build().unwrap();

    for edges in [UniquenessPolicy::Path, UniquenessPolicy::Global] {
        for strategy in StrategyKind::ALL {
            let uniqueness = Uniqueness::new(UniquenessPolicy::None, edges);
            let keys = keys_of(&traverser, "a", strategy, uniqueness, Recording::new());
            assert_eq!(keys, vec!["a", "a"], "{:?} {:?}", strategy, edges);
        }
    }

    // Vertex uniqueness stops at the start vertex
    let keys = keys_of(
        &traverser,
        "a",
        StrategyKind::BreadthFirst,
        Uniqueness::path_vertices(),
        Recording::new(),
    );
    assert_eq!(keys, vec!["a"]);
}

#[test]
fn test_parallel_edges_global_edges() {
    // Two distinct edges a -> b: edge uniqueness does not merge them
    let store = graph_from_edges(&["a", "b"], &[("a", "b"), ("a", "b")]).unwrap();
    let traverser = recording_traverser(store, EDGES).build().unwrap();

    let edges_global = Uniqueness::new(UniquenessPolicy::None, UniquenessPolicy::Global);
    let keys = keys_of(
        &traverser,
        "a",
        StrategyKind::BreadthFirst,
        edges_global,
        Recording::new(),
    );
    assert_eq!(keys, vec!["a", "b", "b"]);

    let keys = keys_of(
        &traverser,
        "a",
        StrategyKind::BreadthFirst,
        Uniqueness::global_vertices(),
        Recording::new(),
    );
    assert_eq!(keys, vec!["a", "b"]);
}

// ============================================================================
// Visitor halt
// ============================================================================

#[test]
fn test_halt_stops_run_cleanly() {
    let traverser = recording_traverser(tree_graph().unwrap(), EDGES)
        .build()
        .unwrap();

    for (strategy, expected) in [
        (StrategyKind::BreadthFirst, vec!["root", "a"]),
        (StrategyKind::DepthFirstPre, vec!["root", "a"]),
        (StrategyKind::DepthFirstPost, vec!["c", "a"]),
    ] {
        let keys = keys_of(
            &traverser,
            "root",
            strategy,
            Uniqueness::none(),
            Recording::with_limit(2),
        );
        assert_eq!(keys, expected, "{:?}", strategy);
    }
}
