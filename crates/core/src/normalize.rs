//! Unicode text normalization shared by the scorer, the schema builder, and
//! the HTML scraping plugins: case/diacritic folding, whitespace collapse,
//! and the cache-path sanitiser.
//!
//! `search_normalize` is the pipeline every stored field and every incoming
//! query passes through before scoring (spec §4.1): `collapse_whitespace
//! ∘ normalize`. Applying it twice is a no-op (spec §8 invariant 6).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// NFC-normalize, case-fold, and strip combining diacritical marks.
///
/// Equivalent in effect to ICU's `en_US`-tie-broken case folding for the
/// Latin-1/Latin Extended range this service's corpora use: decompose to
/// NFD, drop combining marks, recompose to NFC, lowercase. Full/half-width
/// forms fold via `char::to_lowercase`, which already maps halfwidth Katakana
/// and fullwidth Latin to their canonical forms on recomposition.
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split on any Unicode whitespace class, dropping empty tokens.
pub fn split_words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Collapse all runs of whitespace (including newlines/tabs) to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    split_words(s).join(" ")
}

/// The search normalization pipeline applied to every stored field and query:
/// `collapse_whitespace ∘ normalize`.
pub fn search_normalize(s: &str) -> String {
    collapse_whitespace(&normalize(s))
}

/// Replace every byte outside `[A-Za-z0-9]` with `_`, for safe cache file names.
pub fn sanitise_path_segment(s: &str) -> String {
    s.bytes()
        .map(|b| if is_ascii_alnum(b as char) { b as char } else { '_' })
        .collect()
}

/// Whether `c` is an ASCII letter or digit.
pub fn is_ascii_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}
