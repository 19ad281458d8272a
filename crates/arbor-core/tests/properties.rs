//! Property tests over random DAGs
//!
//! Vertices are `v0..vN`; every generated edge goes from a lower to a higher
//! index, so the graph is acyclic and uniqueness NONE terminates.

use arbor_core::{StrategyKind, Uniqueness};
use arbor_storage::MemStore;
use arbor_test_harness::{graph_from_edges, recording_traverser, vid, Recording, EDGES};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone)]
struct Dag {
    vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl Dag {
    fn store(&self) -> MemStore {
        let keys: Vec<String> = (0..self.vertices).map(|i| format!("v{}", i)).collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let edge_refs: Vec<(&str, &str)> = self
            .edges
            .iter()
            .map(|&(from, to)| (key_refs[from], key_refs[to]))
            .collect();
        graph_from_edges(&key_refs, &edge_refs).unwrap()
    }

    /// Vertex ids reachable from v0, v0 included
    fn reachable(&self) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![0];
        while let Some(v) = stack.pop() {
            if seen.insert(vid(&format!("v{}", v))) {
                stack.extend(self.edges.iter().filter(|e| e.0 == v).map(|e| e.1));
            }
        }
        seen
    }
}

fn arb_dag() -> impl Strategy<Value = Dag> {
    (2usize..8).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..14).prop_map(move |pairs| Dag {
            vertices: n,
            edges: pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect(),
        })
    })
}

fn walk(dag: &Dag, strategy: StrategyKind, uniqueness: Uniqueness) -> Recording {
    let traverser = recording_traverser(dag.store(), EDGES).build().unwrap();
    let mut recording = Recording::new();
    traverser
        .traverse(vid("v0"), strategy, uniqueness, &(), &mut recording)
        .unwrap();
    recording
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_path_invariant(dag in arb_dag()) {
        for strategy in StrategyKind::ALL {
            let recording = walk(&dag, strategy, Uniqueness::none());
            for visit in &recording.visits {
                prop_assert_eq!(visit.path_vertices.len(), visit.path_edges.len() + 1);
                prop_assert_eq!(&visit.path_vertices[0], &vid("v0"));
                prop_assert_eq!(visit.path_vertices.last(), Some(&visit.vertex));

                // Edge i of the path joins vertex i and vertex i + 1
                for (i, edge_id) in visit.path_edges.iter().enumerate() {
                    let index: usize = edge_id.trim_start_matches("edges/").parse().unwrap();
                    let (from, to) = dag.edges[index];
                    prop_assert_eq!(&visit.path_vertices[i], &vid(&format!("v{}", from)));
                    prop_assert_eq!(&visit.path_vertices[i + 1], &vid(&format!("v{}", to)));
                }
            }
        }
    }

    #[test]
    fn prop_breadth_first_depths_never_decrease(dag in arb_dag()) {
        let depths = walk(&dag, StrategyKind::BreadthFirst, Uniqueness::none()).depths();
        prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_depth_first_parent_ordering(dag in arb_dag()) {
        // Pre-order: a path's parent path was visited earlier.
        // Post-order: a path's parent path is visited later.
        for (strategy, parent_first) in [
            (StrategyKind::DepthFirstPre, true),
            (StrategyKind::DepthFirstPost, false),
        ] {
            let recording = walk(&dag, strategy, Uniqueness::none());
            let mut visits = recording.visits.clone();
            if !parent_first {
                visits.reverse();
            }

            let mut done: HashSet<Vec<String>> = HashSet::new();
            for visit in &visits {
                if let Some((_, parent)) = visit.path_edges.split_last() {
                    prop_assert!(done.contains(parent), "{:?}: parent of {:?} out of order", strategy, visit);
                }
                done.insert(visit.path_edges.clone());
            }
        }
    }

    #[test]
    fn prop_strategies_agree_on_paths(dag in arb_dag()) {
        let runs: Vec<Vec<Vec<String>>> = StrategyKind::ALL
            .iter()
            .map(|&strategy| {
                let mut paths: Vec<Vec<String>> = walk(&dag, strategy, Uniqueness::none())
                    .visits
                    .into_iter()
                    .map(|v| v.path_edges)
                    .collect();
                paths.sort();
                paths
            })
            .collect();
        prop_assert_eq!(&runs[0], &runs[1]);
        prop_assert_eq!(&runs[0], &runs[2]);
    }

    #[test]
    fn prop_global_visits_reachable_set_once(dag in arb_dag()) {
        let reachable = dag.reachable();
        for strategy in StrategyKind::ALL {
            let recording = walk(&dag, strategy, Uniqueness::global_vertices());
            let ids = recording.vertex_ids();
            let distinct: BTreeSet<String> = ids.iter().map(|s| s.to_string()).collect();
            prop_assert_eq!(distinct.len(), ids.len(), "{:?} repeated a vertex", strategy);
            prop_assert_eq!(&distinct, &reachable);
        }
    }
}
