//! Wire shape for `/api/busca` and `/api/busca/ws` (spec §6): one flattened
//! JSON object per match, property names at the top level alongside
//! `content` and an optional `score`.

use std::collections::BTreeMap;

use campus_search_core::index::SearchHit;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn from_hit(hit: SearchHit, send_score: bool) -> Self {
        SearchResult {
            fields: hit.fields,
            content: hit.content,
            score: send_score.then_some(hit.score),
        }
    }
}
