//! Per-record scorer (spec §4.3 / C4): one [`Entry`] per record, holding a
//! [`FieldScorer`] per schema property.

use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::fuzzy::Scorer;
use crate::normalize::search_normalize;
use crate::schema::{PropertySpec, Searchable};

/// The floor applied to a single field's score before combination, so one
/// zero-score field can't mask every other field (spec §4.3).
const FIELD_SCORE_FLOOR: f64 = 1e-4;

/// One scored property of one record: the raw stored text, the precomputed
/// fuzzy scorer over its search-normalized form, and the property's
/// normalized weight.
pub struct FieldScorer {
    name: &'static str,
    /// Raw text as returned by the property's getter, kept verbatim for
    /// display (`visible_fields`/`all_fields`) — *not* the normalized form
    /// fed to the scorer (spec §4.3: the stored text is the original value).
    stored_text: String,
    scorer: Scorer,
    normalized_weight: f64,
    hidden: bool,
}

/// A precomputed scoring record for a single `T`, built once at index build
/// time and immutable thereafter (spec §4.3 / C4).
pub struct Entry<T: Searchable> {
    fields: Vec<FieldScorer>,
    scaling: f64,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Searchable> Entry<T> {
    /// Build an entry for `record` per spec §4.3's two-step algorithm.
    pub fn build(record: &T) -> Result<Self, SchemaError> {
        let props = T::properties();
        if props.is_empty() {
            return Err(SchemaError::EmptyPropertySet);
        }

        let offenders: Vec<&'static str> =
            props.iter().filter(|p| p.weight < 0.0).map(|p| p.name).collect();
        if !offenders.is_empty() {
            return Err(SchemaError::NonPositiveWeight(offenders));
        }

        let total_weight: f64 = props.iter().map(|p| p.weight).sum();
        let fields = props
            .iter()
            .map(|p: &PropertySpec<T>| {
                let raw_text = (p.get)(record);
                let pattern = search_normalize(raw_text);
                let scorer = if p.is_identifier {
                    Scorer::identifier(pattern)
                } else {
                    Scorer::text(pattern)
                };
                let normalized_weight = if total_weight > 0.0 { p.weight / total_weight } else { 0.0 };
                FieldScorer {
                    name: p.name,
                    stored_text: raw_text.to_string(),
                    scorer,
                    normalized_weight,
                    hidden: p.is_hidden,
                }
            })
            .collect();

        Ok(Entry { fields, scaling: T::scaling(), _marker: std::marker::PhantomData })
    }

    /// Combined score against an already search-normalized `query` (spec §4.3):
    /// `(Π clamp(field.score(q), 1e-4, 1) ^ weight_i) ^ |scaling|`.
    pub fn score(&self, query: &str) -> f64 {
        let combined = self
            .fields
            .iter()
            .map(|f| f.scorer.score(query).clamp(FIELD_SCORE_FLOOR, 1.0).powf(f.normalized_weight))
            .product::<f64>();
        combined.powf(self.scaling.abs())
    }

    /// Original (un-normalized) stored text for every non-hidden property,
    /// keyed by name — what a `SearchResult` shows the caller.
    pub fn visible_fields(&self) -> BTreeMap<&'static str, &str> {
        self.fields
            .iter()
            .filter(|f| !f.hidden)
            .map(|f| (f.name, f.stored_text.as_str()))
            .collect()
    }

    /// Original (un-normalized) stored text for every property, including
    /// hidden ones.
    pub fn all_fields(&self) -> BTreeMap<&'static str, &str> {
        self.fields.iter().map(|f| (f.name, f.stored_text.as_str())).collect()
    }
}
