//! The slice of process configuration (spec §6) the search layer needs:
//! score visibility, hidden-field visibility, and limit guards.

use crate::error::RequestError;

/// Default per-entry score cutoff (spec: `max_result_score`).
pub const DEFAULT_MAX_RESULT_SCORE: f64 = 0.99;
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;
pub const MAX_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub send_score: bool,
    pub send_hidden_fields: bool,
    pub max_result_score: f64,
    pub default_search_limit: u32,
    pub max_search_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            send_score: false,
            send_hidden_fields: false,
            max_result_score: DEFAULT_MAX_RESULT_SCORE,
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            max_search_limit: MAX_SEARCH_LIMIT,
        }
    }
}

/// Parse and resolve the effective result limit (spec §4.9): the raw
/// query-string value fails with [`RequestError::BadRequest`] on a
/// non-integer form, a negative value, or a value above the upper guard.
/// An absent `limit` uses the configured default; `"0"` is a valid request
/// for zero results, not an error (spec §9 open-question resolution).
pub fn resolve_limit(raw: Option<&str>, config: &SearchConfig) -> Result<u32, RequestError> {
    let raw = match raw {
        None => return Ok(config.default_search_limit.clamp(1, config.max_search_limit)),
        Some(raw) => raw,
    };
    let parsed: i64 = raw
        .parse()
        .map_err(|_| RequestError::BadRequest(format!("invalid limit `{raw}`")))?;
    if parsed == 0 {
        return Ok(0);
    }
    if parsed < 0 || parsed > i64::from(config.max_search_limit) {
        return Err(RequestError::BadRequest(format!("limit `{raw}` out of range")));
    }
    Ok(parsed as u32)
}
