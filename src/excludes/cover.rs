//! Greedy set cover over candidate excludes
//!
//! Finding the fewest rules that cover every excludable file is the set cover
//! problem, which is NP-hard. The classic greedy approximation repeatedly
//! picks the rule covering the most still-uncovered files and is within a
//! factor of ln|U| of the optimum.
//!
//! # Selection order
//!
//! Candidates are ranked by `(marginal gain, pattern, reason)` and the largest
//! key wins. On equal gain the lexicographically greatest pattern is taken, so
//! for nested matches such as `project/test/**` and `project/test/build/**`
//! the deeper directory is preferred.
//!
//! # Lazy evaluation
//!
//! Marginal gains only ever shrink as files get covered, so a max-heap of
//! possibly stale gains is an upper bound on every candidate. The top entry is
//! re-scored on pop: if its gain is unchanged it is the true maximum,
//! otherwise it is pushed back with the fresh gain. This yields exactly the
//! same selection as re-scoring every candidate on every round.

use std::collections::{BTreeSet, BinaryHeap, HashSet};

use super::coverage::covered_files;
use super::types::{Coverage, ExclusionRule};

/// Select a subset of rules whose union covers every file any candidate covers.
///
/// Rules that would add no new coverage are never selected. The result is
/// sorted by pattern.
pub fn select_cover(coverage: &Coverage) -> BTreeSet<ExclusionRule> {
    let mut uncovered: HashSet<&str> = covered_files(coverage).into_iter().collect();
    let mut selected = BTreeSet::new();

    let mut queue: BinaryHeap<(usize, &ExclusionRule)> = coverage
        .iter()
        .filter(|(_, files)| !files.is_empty())
        .map(|(rule, files)| (files.len(), rule))
        .collect();

    while !uncovered.is_empty() {
        let Some((stale_gain, rule)) = queue.pop() else {
            break;
        };

        let files = &coverage[rule];
        let gain = marginal_gain(files, &uncovered);

        if gain == 0 {
            tracing::trace!("Dropping redundant exclude {}", rule);
            continue;
        }

        if gain < stale_gain {
            queue.push((gain, rule));
            continue;
        }

        tracing::trace!("Selecting exclude {} covering {} new files", rule, gain);
        for file in files {
            uncovered.remove(file.as_str());
        }
        selected.insert(rule.clone());
    }

    tracing::debug!(
        "Selected {} of {} candidate excludes",
        selected.len(),
        coverage.len()
    );

    selected
}

/// Number of files in `files` that are still uncovered
fn marginal_gain(files: &BTreeSet<String>, uncovered: &HashSet<&str>) -> usize {
    files
        .iter()
        .filter(|file| uncovered.contains(file.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excludes::types::ExcludeReason;

    fn rule(dir: &str, reason: ExcludeReason) -> ExclusionRule {
        ExclusionRule::for_directory(dir, reason)
    }

    fn covering(entries: Vec<(&ExclusionRule, Vec<&str>)>) -> Coverage {
        entries
            .into_iter()
            .map(|(rule, files)| (rule.clone(), files.into_iter().map(String::from).collect()))
            .collect()
    }

    /// Reference greedy that re-scores every remaining candidate each round
    fn eager_select(coverage: &Coverage) -> BTreeSet<ExclusionRule> {
        let mut uncovered: HashSet<&str> = covered_files(coverage).into_iter().collect();
        let mut remaining: Vec<&ExclusionRule> = coverage.keys().collect();
        let mut selected = BTreeSet::new();

        while !uncovered.is_empty() {
            let best = remaining
                .iter()
                .map(|rule| (marginal_gain(&coverage[*rule], &uncovered), *rule))
                .max();
            let Some((gain, rule)) = best else { break };
            if gain == 0 {
                break;
            }
            for file in &coverage[rule] {
                uncovered.remove(file.as_str());
            }
            remaining.retain(|r| *r != rule);
            selected.insert(rule.clone());
        }
        selected
    }

    #[test]
    fn test_empty_coverage() {
        assert!(select_cover(&Coverage::new()).is_empty());
    }

    #[test]
    fn test_disjoint_rules_all_selected() {
        let docs = rule("docs", ExcludeReason::DocumentationOf);
        let build = rule("build", ExcludeReason::BuildToolOf);
        let coverage = covering(vec![
            (&docs, vec!["docs/readme.md", "docs/api/index.md"]),
            (&build, vec!["build/out.bin"]),
        ]);

        let selected: Vec<_> = select_cover(&coverage).into_iter().collect();
        assert_eq!(selected, vec![build, docs]);
    }

    #[test]
    fn test_equal_gain_prefers_greatest_pattern() {
        let outer = rule("project/test", ExcludeReason::TestOf);
        let inner = rule("project/test/build", ExcludeReason::BuildToolOf);
        let coverage = covering(vec![
            (&outer, vec!["project/test/build/cache.tmp"]),
            (&inner, vec!["project/test/build/cache.tmp"]),
        ]);

        let selected: Vec<_> = select_cover(&coverage).into_iter().collect();
        assert_eq!(selected, vec![inner]);
    }

    #[test]
    fn test_subsumed_rule_not_selected() {
        let outer = rule("project/tests", ExcludeReason::TestOf);
        let inner = rule("project/tests/docs", ExcludeReason::DocumentationOf);
        let coverage = covering(vec![
            (&outer, vec!["project/tests/a.rs", "project/tests/docs/b.md"]),
            (&inner, vec!["project/tests/docs/b.md"]),
        ]);

        let selected: Vec<_> = select_cover(&coverage).into_iter().collect();
        assert_eq!(selected, vec![outer]);
    }

    #[test]
    fn test_rule_with_no_files_never_selected() {
        let empty = rule("tools", ExcludeReason::BuildToolOf);
        let tests = rule("tests", ExcludeReason::TestOf);
        let coverage = covering(vec![(&empty, vec![]), (&tests, vec!["tests/a.rs"])]);

        let selected: Vec<_> = select_cover(&coverage).into_iter().collect();
        assert_eq!(selected, vec![tests]);
    }

    #[test]
    fn test_stale_gain_is_rescored() {
        // "b" wins the opening tie; "a" then only adds one file and must wait behind "c"
        let a = rule("a", ExcludeReason::TestOf);
        let b = rule("b", ExcludeReason::TestOf);
        let c = rule("c", ExcludeReason::TestOf);
        let coverage = covering(vec![
            (&a, vec!["1", "2", "3", "4"]),
            (&b, vec!["1", "2", "3", "5"]),
            (&c, vec!["6", "7"]),
        ]);

        let selected = select_cover(&coverage);
        assert_eq!(selected, BTreeSet::from([a, b, c]));
    }

    #[test]
    fn test_cover_is_valid_and_matches_eager_greedy() {
        let rules: Vec<ExclusionRule> = ["r1", "r2", "r3", "r4", "r5", "r6"]
            .iter()
            .map(|d| rule(d, ExcludeReason::TestOf))
            .collect();
        let coverage = covering(vec![
            (&rules[0], vec!["a", "b", "c", "d", "e", "f"]),
            (&rules[1], vec!["a", "b", "c", "g"]),
            (&rules[2], vec!["d", "e", "f", "h"]),
            (&rules[3], vec!["g", "h"]),
            (&rules[4], vec!["i"]),
            (&rules[5], vec!["a", "i"]),
        ]);

        let selected = select_cover(&coverage);
        assert_eq!(selected, eager_select(&coverage));

        let selected_coverage: Coverage = coverage
            .iter()
            .filter(|(rule, _)| selected.contains(*rule))
            .map(|(rule, files)| (rule.clone(), files.clone()))
            .collect();
        assert_eq!(covered_files(&selected_coverage), covered_files(&coverage));
    }

    #[test]
    fn test_every_selected_rule_adds_coverage() {
        let outer = rule("x/tests", ExcludeReason::TestOf);
        let mid = rule("x/tests/build", ExcludeReason::BuildToolOf);
        let leaf = rule("x/tests/build/docs", ExcludeReason::DocumentationOf);
        let coverage = covering(vec![
            (&outer, vec!["x/tests/1", "x/tests/build/2", "x/tests/build/docs/3"]),
            (&mid, vec!["x/tests/build/2", "x/tests/build/docs/3"]),
            (&leaf, vec!["x/tests/build/docs/3"]),
        ]);

        let selected = select_cover(&coverage);
        assert_eq!(selected, BTreeSet::from([outer]));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let rules: Vec<ExclusionRule> = (0..20)
            .map(|i| rule(&format!("d{i:02}/tests"), ExcludeReason::TestOf))
            .collect();
        let entries = rules.iter().map(|r| (r, vec!["shared"])).collect();
        let coverage = covering(entries);

        let first = select_cover(&coverage);
        for _ in 0..5 {
            assert_eq!(select_cover(&coverage), first);
        }
        assert_eq!(first.len(), 1);
        assert_eq!(first.iter().next().unwrap().pattern, "d19/tests/**");
    }
}
