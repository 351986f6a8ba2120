//! Property-based tests for rule matching and path aggregation.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use crate::config::MappingRule;
    use crate::phases::selection::{aggregate_paths, fired_rules};
    use proptest::prelude::*;

    fn path_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,8}(/[a-z0-9_.]{1,8}){0,3}"
    }

    fn literal_rule(path: &str, paths: Vec<String>) -> MappingRule {
        MappingRule::new(&regex::escape(path), paths, 1).unwrap()
    }

    // ============================================================================
    // Anchored matching
    // ============================================================================

    proptest! {
        /// Property: a literal pattern matches exactly the path it was built from
        #[test]
        fn literal_pattern_matches_itself(path in path_strategy()) {
            let rule = literal_rule(&path, vec![]);
            prop_assert!(rule.matches(&path));
        }

        /// Property: extending a path on either side never matches a literal pattern
        #[test]
        fn literal_pattern_rejects_substrings(
            path in path_strategy(),
            prefix in "[a-z/]{1,4}",
            suffix in "[a-z/.]{1,4}",
        ) {
            let rule = literal_rule(&path, vec![]);
            let prefixed = format!("{}{}", prefix, path);
            let suffixed = format!("{}{}", path, suffix);
            prop_assert!(!rule.matches(&prefixed));
            prop_assert!(!rule.matches(&suffixed));
        }

        /// Property: a rule fires iff at least one change matches it in full
        #[test]
        fn rule_fires_iff_some_change_matches(
            target in path_strategy(),
            changes in prop::collection::vec(path_strategy(), 0..6),
        ) {
            let rules = vec![literal_rule(&target, vec!["x.yml".to_string()])];
            let fired = fired_rules(&rules, &changes);
            prop_assert_eq!(!fired.is_empty(), changes.contains(&target));
        }
    }

    // ============================================================================
    // Aggregation
    // ============================================================================

    proptest! {
        /// Property: aggregation is the deduplicated union of rule and shared paths
        #[test]
        fn aggregate_is_deduplicated_union(
            rule_paths in prop::collection::vec(
                prop::collection::vec("[a-c]\\.yml", 0..4), 0..4),
            shared in prop::collection::vec("[a-e]\\.yml", 0..4),
        ) {
            let rules: Vec<MappingRule> = rule_paths
                .iter()
                .enumerate()
                .map(|(i, paths)| MappingRule::new(".*", paths.clone(), i + 1).unwrap())
                .collect();

            let aggregated = aggregate_paths(rules.iter(), &shared);

            let unique: HashSet<&String> = aggregated.iter().collect();
            prop_assert_eq!(unique.len(), aggregated.len());

            let expected: HashSet<&String> =
                rule_paths.iter().flatten().chain(shared.iter()).collect();
            prop_assert_eq!(unique, expected);
        }

        /// Property: aggregation keeps the first occurrence order
        #[test]
        fn aggregate_preserves_first_occurrence(
            shared in prop::collection::vec("[a-e]\\.yml", 0..8),
        ) {
            let aggregated = aggregate_paths(std::iter::empty(), &shared);
            let mut expected: Vec<String> = Vec::new();
            for path in &shared {
                if !expected.contains(path) {
                    expected.push(path.clone());
                }
            }
            prop_assert_eq!(aggregated, expected);
        }
    }
}
