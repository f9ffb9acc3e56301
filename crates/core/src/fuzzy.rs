//! Fuzzy scoring (spec §4.2): a [`Scorer`] is built once from a normalized
//! pattern string and scores any number of normalized queries against it,
//! always returning a value in `[0, 1]` where `0` means an equal match.
//!
//! Two flavors, chosen by [`crate::schema::PropertySpec::is_identifier`]:
//! `Identifier` uses plain normalized Levenshtein distance; `Text` uses a
//! partial-ratio (best substring window) with a Levenshtein fallback inside
//! a thin epsilon band, so near-exact matches stay strictly ordered across
//! the cutoff.

use strsim::levenshtein;

/// Score below which [`partial_ratio`] is considered a genuine match; below
/// this a `Text` scorer falls back to a banded Levenshtein ratio instead.
const MIN_SCORE: f64 = 0.01;

/// A pattern-bound fuzzy scorer. Cheap to clone; typically built once per
/// property per record and kept for the entry's lifetime.
#[derive(Clone, Debug)]
pub enum Scorer {
    /// Plain Levenshtein ratio, for short code-like fields (spec: 4-10 chars).
    Identifier { pattern: String },
    /// Partial-ratio with Levenshtein fallback, for free-text fields.
    Text { pattern: String },
}

impl Scorer {
    /// Build an identifier-variant scorer over an already search-normalized `pattern`.
    pub fn identifier(pattern: impl Into<String>) -> Self {
        Scorer::Identifier { pattern: pattern.into() }
    }

    /// Build a text-variant scorer over an already search-normalized `pattern`.
    pub fn text(pattern: impl Into<String>) -> Self {
        Scorer::Text { pattern: pattern.into() }
    }

    /// Score an already search-normalized `query` against this scorer's pattern.
    /// Returns a value in `[0, 1]`, `0` meaning an equal match.
    pub fn score(&self, query: &str) -> f64 {
        match self {
            Scorer::Identifier { pattern } => levenshtein_ratio(pattern, query),
            Scorer::Text { pattern } => {
                let r = partial_ratio(pattern, query);
                if r > MIN_SCORE + f64::EPSILON {
                    r.min(1.0)
                } else {
                    f64::EPSILON + MIN_SCORE * levenshtein_ratio(pattern, query).clamp(0.0, 1.0)
                }
            }
        }
    }
}

/// Normalized Levenshtein distance scaled to `[0, 1]`, `0` meaning equal.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let dist = levenshtein(a, b) as f64;
    let max_len = a.chars().count().max(b.chars().count()) as f64;
    if max_len == 0.0 {
        0.0
    } else {
        (dist / max_len).clamp(0.0, 1.0)
    }
}

/// Best-substring ratio: for the longer of `a`/`b`, slide a window the length
/// of the shorter string and report the minimum normalized Levenshtein
/// distance over all windows (spec §4.2).
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer): (&str, &str) =
        if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };

    let short_chars: Vec<char> = shorter.chars().collect();
    let long_chars: Vec<char> = longer.chars().collect();

    if short_chars.is_empty() {
        return if long_chars.is_empty() { 0.0 } else { 1.0 };
    }
    if long_chars.len() <= short_chars.len() {
        return levenshtein_ratio(shorter, longer);
    }

    let window = short_chars.len();
    let mut best = f64::MAX;
    for start in 0..=(long_chars.len() - window) {
        let slice: String = long_chars[start..start + window].iter().collect();
        let r = levenshtein_ratio(shorter, &slice);
        if r < best {
            best = r;
        }
        if best == 0.0 {
            break;
        }
    }
    best
}
