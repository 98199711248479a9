//! Free-text search narrowing.
//!
//! Storage performs a coarse lookup (any record whose name contains the query
//! or one of its words). For books, that superset is then narrowed here into
//! prefix tiers: candidates whose name starts with the first `n` query words
//! come before those matching only the first `n - 1` words, and so on down to
//! the first word alone. Within a tier names are sorted alphabetically.
//! Whatever never matched a prefix is appended last, in storage order, and
//! the whole list is capped at [`MAX_RESULTS`].

use crate::catalog::model::SearchCandidate;
use crate::error::{AppError, Result};

/// Maximum number of ranked book hits.
pub const MAX_RESULTS: usize = 5;
/// Book queries must be longer than this many characters.
pub const BOOK_QUERY_MINIMUM: usize = 5;
/// Genre queries must be longer than this many characters.
pub const GENRE_QUERY_MINIMUM: usize = 3;
/// Genre keywords must be longer than this many characters.
const GENRE_KEYWORD_MINIMUM: usize = 2;

/// Trim a raw query and check it against `minimum`.
///
/// A blank query is reported before a short one. The error for a short query
/// carries the shortest accepted length.
pub fn validate_query(raw: &str, minimum: usize) -> Result<&str> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(AppError::BlankQuery);
    }

    if query.chars().count() <= minimum {
        return Err(AppError::QueryTooShort {
            query: query.to_string(),
            minimum: minimum + 1,
        });
    }

    Ok(query)
}

/// Split a trimmed query on single spaces, preserving order.
pub fn query_words(query: &str) -> Vec<&str> {
    query.split(' ').collect()
}

/// Words of a genre query worth matching on their own.
pub fn genre_keywords(query: &str) -> Vec<&str> {
    query_words(query)
        .into_iter()
        .filter(|word| word.chars().count() > GENRE_KEYWORD_MINIMUM)
        .collect()
}

/// Rank coarse candidates into at most [`MAX_RESULTS`] hits.
pub fn narrow(query: &str, candidates: Vec<SearchCandidate>) -> Vec<SearchCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let words = query_words(query);
    let mut pool: Vec<(String, SearchCandidate)> = candidates
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c))
        .collect();
    let mut ranked = Vec::with_capacity(MAX_RESULTS);

    for len in (1..=words.len()).rev() {
        let prefix = words[..len].join(" ").to_lowercase();

        let (tier, rest): (Vec<_>, Vec<_>) = pool
            .into_iter()
            .partition(|(lowered, _)| lowered.starts_with(&prefix));
        pool = rest;

        let mut tier: Vec<SearchCandidate> = tier.into_iter().map(|(_, c)| c).collect();
        tier.sort_by(|a, b| a.name.cmp(&b.name));
        ranked.extend(tier);

        if ranked.len() >= MAX_RESULTS {
            ranked.truncate(MAX_RESULTS);
            return ranked;
        }
    }

    ranked.extend(pool.into_iter().map(|(_, c)| c));
    ranked.truncate(MAX_RESULTS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidates(names: &[&str]) -> Vec<SearchCandidate> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SearchCandidate::new(i as i64, *name))
            .collect()
    }

    fn names(ranked: &[SearchCandidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn tiers_then_remainder() {
        let ranked = narrow(
            "The Great",
            candidates(&["The Great Gatsby", "The Greater Good", "Great Expectations", "Zzz"]),
        );
        assert_eq!(
            names(&ranked),
            vec!["The Great Gatsby", "The Greater Good", "Great Expectations", "Zzz"]
        );
    }

    #[test]
    fn alphabetical_within_tier() {
        let ranked = narrow(
            "harry potter",
            candidates(&[
                "Harry Potter and the Goblet of Fire",
                "Harry Houdini",
                "Harry Potter and the Chamber of Secrets",
                "Dirty Harry",
            ]),
        );
        assert_eq!(
            names(&ranked),
            vec![
                "Harry Potter and the Chamber of Secrets",
                "Harry Potter and the Goblet of Fire",
                "Harry Houdini",
                "Dirty Harry",
            ]
        );
    }

    #[test]
    fn caps_at_five_from_first_tier() {
        let ranked = narrow(
            "Dune",
            candidates(&["Dune 7", "Dune 6", "Dune 5", "Dune 4", "Dune 3", "Dune 2", "Dune 1"]),
        );
        assert_eq!(
            names(&ranked),
            vec!["Dune 1", "Dune 2", "Dune 3", "Dune 4", "Dune 5"]
        );
    }

    #[test]
    fn remainder_keeps_storage_order() {
        let ranked = narrow("Moby Dick", candidates(&["Zebra Dick", "Alpha Dick", "Moby"]));
        assert_eq!(names(&ranked), vec!["Moby", "Zebra Dick", "Alpha Dick"]);
    }

    #[test]
    fn matching_ignores_case_but_keeps_names() {
        let ranked = narrow(
            "THE GREAT",
            candidates(&["the great gatsby", "Great Escape", "The Great Escape"]),
        );
        assert_eq!(
            names(&ranked),
            vec!["The Great Escape", "the great gatsby", "Great Escape"]
        );
    }

    #[test]
    fn empty_candidates() {
        assert!(narrow("anything here", Vec::new()).is_empty());
    }

    #[test]
    fn blank_before_short() {
        assert!(matches!(validate_query("   ", 5), Err(AppError::BlankQuery)));
        assert!(matches!(validate_query("", 3), Err(AppError::BlankQuery)));
    }

    #[test]
    fn short_query_reports_threshold() {
        match validate_query("  Dune5 ", 5) {
            Err(AppError::QueryTooShort { query, minimum }) => {
                assert_eq!(query, "Dune5");
                assert_eq!(minimum, 6);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(validate_query("Dune 7", 5).is_ok());
        assert!(validate_query("abc", 3).is_err());
        assert_eq!(validate_query(" abcd ", 3).unwrap(), "abcd");
    }

    #[test]
    fn genre_keywords_drop_short_words() {
        assert_eq!(
            genre_keywords("sci fi of the future"),
            vec!["sci", "the", "future"]
        );
        assert!(genre_keywords("a b").is_empty());
    }

    fn tier_of(name: &str, words: &[&str]) -> usize {
        let name = name.to_lowercase();
        (1..=words.len())
            .rev()
            .find(|len| name.starts_with(&words[..*len].join(" ").to_lowercase()))
            .unwrap_or(0)
    }

    proptest! {
        #[test]
        fn ranked_results_are_bounded_distinct_and_tiered(
            raw_names in proptest::collection::vec("(ab|ab c|ab cd|x)[a-d ]{0,6}", 0..20),
            query in "ab( c| cd)?( d)?",
        ) {
            let input: Vec<SearchCandidate> = raw_names
                .iter()
                .enumerate()
                .map(|(i, n)| SearchCandidate::new(i as i64, n.clone()))
                .collect();
            let ranked = narrow(&query, input.clone());
            let words = query_words(&query);

            prop_assert!(ranked.len() <= MAX_RESULTS);
            prop_assert_eq!(ranked.len(), input.len().min(MAX_RESULTS));

            let mut ids: Vec<i64> = ranked.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), ranked.len());

            for pair in ranked.windows(2) {
                let (a, b) = (tier_of(&pair[0].name, &words), tier_of(&pair[1].name, &words));
                prop_assert!(a >= b);
                if a == b && a > 0 {
                    prop_assert!(pair[0].name <= pair[1].name);
                }
            }
        }
    }
}
