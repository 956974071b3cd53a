//! Candidate filtering as a replaceable policy.
//!
//! The filter is a pure derivation of (options, query): it returns the
//! indices of matching options in their original order, never reorders,
//! never caps the result, and never mutates the option list.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Decides whether one option label matches the query.
///
/// Policies only see non-empty queries; the empty-query case short-circuits
/// in [`filter_indices`] to the full option list.
pub trait MatchPolicy: Send + Sync {
    fn matches(&self, label: &str, query: &str) -> bool;
}

/// Case-insensitive, unanchored substring containment. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringPolicy;

impl MatchPolicy for SubstringPolicy {
    fn matches(&self, label: &str, query: &str) -> bool {
        label.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Fuzzy matching via nucleo-matcher, membership only: the match score is
/// discarded so option order is still preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyPolicy;

impl MatchPolicy for FuzzyPolicy {
    fn matches(&self, label: &str, query: &str) -> bool {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut buf = Vec::new();
        let haystack = Utf32Str::new(label, &mut buf);
        pattern.score(haystack, &mut matcher).is_some()
    }
}

/// Indices of options matching `query`, in original option order.
///
/// An empty query returns every index unfiltered. This is explicit policy,
/// not an empty-substring match, so the two cases stay distinguishable if
/// the matching rule changes.
pub fn filter_indices(policy: &dyn MatchPolicy, options: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    options
        .iter()
        .enumerate()
        .filter(|(_, label)| policy.matches(label, query))
        .map(|(index, _)| index)
        .collect()
}
