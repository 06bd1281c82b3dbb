//! Relevance scoring
//!
//! Scores are additive and unnormalised. For every query token:
//! - `len(token)` if the haystack contains the token anywhere
//! - `len(token) * 0.8` for every haystack word starting with the token
//!
//! Both credits apply to the same occurrence, so a token that prefixes a
//! word is counted twice. Existing rankings depend on this; keep it.

/// Weight of a word-prefix match relative to a substring match
pub const PREFIX_WEIGHT: f64 = 0.8;

/// Score `haystack` against `query`. Returns 0 for a blank query.
pub fn score(haystack: &str, query: &str) -> f64 {
    if query.trim().is_empty() {
        return 0.0;
    }

    let haystack = haystack.to_lowercase();
    let query = query.to_lowercase();
    let words: Vec<&str> = haystack.split_whitespace().collect();

    let mut total = 0.0;
    for token in query.split_whitespace() {
        let len = token.chars().count() as f64;

        if haystack.contains(token) {
            total += len;
        }

        let prefixed = words.iter().filter(|w| w.starts_with(token)).count();
        total += len * PREFIX_WEIGHT * prefixed as f64;
    }

    total
}
