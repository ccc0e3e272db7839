//! Property-based tests for resolution and merging.
//!
//! These tests use proptest to generate random dependency graphs, paths, and
//! templates, and verify that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::combiner::PackCombiner;
    use crate::config::CombinationOptions;
    use crate::merge::{matches_pattern, DeepMergeStrategy, MergeStrategy};
    use crate::pack::Pack;
    use crate::resolver::DependencyResolver;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use serde_json::{json, Value};

    /// Build packs `p0..pn` where pack `i` depends only on packs with a lower
    /// index, so the graph is always acyclic.
    fn acyclic_packs(dep_picks: &[Vec<Index>]) -> Vec<Pack> {
        dep_picks
            .iter()
            .enumerate()
            .map(|(i, picks)| {
                let mut pack = Pack::new(format!("p{}", i), "1.0.0");
                if i > 0 {
                    for pick in picks {
                        pack = pack.with_dependency(format!("p{}", pick.index(i)), "1.0.0");
                    }
                }
                pack
            })
            .collect()
    }

    fn dep_picks() -> impl Strategy<Value = Vec<Vec<Index>>> {
        prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 1..16)
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z]{1,6}"
    }

    // ============================================================================
    // Resolution property tests
    // ============================================================================

    proptest! {
        /// Property: for acyclic graphs every dependency precedes its dependent
        #[test]
        fn load_order_respects_every_edge(picks in dep_picks()) {
            let packs = acyclic_packs(&picks);
            let result = DependencyResolver::new().resolve(&packs, &[]);

            prop_assert!(result.success, "errors: {:?}", result.errors);
            prop_assert_eq!(result.load_order.len(), result.graph.len());

            let position = |name: &str| result.load_order.iter().position(|n| n == name).unwrap();
            for node in result.graph.nodes() {
                for dep in &node.dependencies {
                    prop_assert!(
                        position(&dep.name) < position(&node.name),
                        "{} must load before {}",
                        dep.name,
                        node.name
                    );
                }
            }
        }

        /// Property: request order never changes the load order
        #[test]
        fn load_order_independent_of_request_order(picks in dep_picks()) {
            let packs = acyclic_packs(&picks);
            let mut reversed = packs.clone();
            reversed.reverse();

            let forward = DependencyResolver::new().resolve(&packs, &[]);
            let backward = DependencyResolver::new().resolve(&reversed, &[]);

            prop_assert_eq!(forward.load_order, backward.load_order);
        }

        /// Property: closing a chain into a loop always fails resolution
        #[test]
        fn cyclic_graphs_never_resolve(len in 1usize..10) {
            let packs: Vec<Pack> = (0..len)
                .map(|i| Pack::new(format!("p{}", i), "1.0.0")
                    .with_dependency(format!("p{}", (i + 1) % len), "1.0.0"))
                .collect();

            let result = DependencyResolver::new().resolve(&packs, &[]);

            prop_assert!(!result.success);
            prop_assert!(!result.circular_dependencies.is_empty());
            prop_assert!(result.load_order.is_empty());
            for cycle in &result.circular_dependencies {
                prop_assert_eq!(cycle.first(), cycle.last());
            }
        }
    }

    // ============================================================================
    // Path pattern property tests
    // ============================================================================

    proptest! {
        /// Property: every path matches itself
        #[test]
        fn path_matches_itself(segments in prop::collection::vec(segment(), 1..6)) {
            let path = segments.join(".");
            prop_assert!(matches_pattern(&path, &path));
        }

        /// Property: an all-wildcard pattern matches any path of the same length
        #[test]
        fn wildcards_match_same_length(segments in prop::collection::vec(segment(), 1..6)) {
            let path = segments.join(".");
            let pattern = vec!["*"; segments.len()].join(".");
            prop_assert!(matches_pattern(&path, &pattern));
        }

        /// Property: patterns never match paths with a different segment count
        #[test]
        fn wildcards_never_match_other_lengths(
            segments in prop::collection::vec(segment(), 1..6),
            extra in 1usize..3,
        ) {
            let path = segments.join(".");
            let pattern = vec!["*"; segments.len() + extra].join(".");
            prop_assert!(!matches_pattern(&path, &pattern));
        }
    }

    // ============================================================================
    // Merge property tests
    // ============================================================================

    proptest! {
        /// Property: deep merge concatenates arrays in template order
        #[test]
        fn deep_merge_concatenates(
            first in prop::collection::vec(any::<i64>(), 0..8),
            second in prop::collection::vec(any::<i64>(), 0..8),
        ) {
            let merged = DeepMergeStrategy::default()
                .merge(&[json!({"items": first.clone()}), json!({"items": second.clone()})])
                .unwrap();
            let expected: Vec<i64> = first.into_iter().chain(second).collect();
            prop_assert_eq!(merged, json!({"items": expected}));
        }

        /// Property: combining the same inputs twice gives the same template
        #[test]
        fn combine_is_deterministic(
            picks in dep_picks(),
            values in prop::collection::vec(any::<u8>(), 16),
        ) {
            let packs: Vec<Pack> = acyclic_packs(&picks)
                .into_iter()
                .enumerate()
                .map(|(i, pack)| {
                    let mut template = json!({"shared": values[i], "list": [i]});
                    template[format!("own{}", i)] = Value::Bool(true);
                    pack.with_template(template)
                })
                .collect();
            let options = CombinationOptions::default();

            let first = PackCombiner::new().combine(&packs, &[], &options);
            let second = PackCombiner::new().combine(&packs, &[], &options);

            prop_assert!(first.success);
            prop_assert_eq!(
                first.combined_pack.unwrap().template,
                second.combined_pack.unwrap().template
            );
        }
    }
}
