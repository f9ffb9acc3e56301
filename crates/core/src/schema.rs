//! The searchable schema contract (spec §3, §4.3): a record type declares
//! one [`Searchable`] impl describing its properties, their weights, and a
//! per-type scaling exponent.

/// One searchable property of a record type `T`.
pub struct PropertySpec<T> {
    /// Property name, also the key emitted in `SearchResult` JSON.
    pub name: &'static str,
    /// Extract the raw (unnormalized) text for this property from a record.
    pub get: fn(&T) -> &str,
    /// Non-negative relative weight; normalized to `weight / Σweight` at build time.
    pub weight: f64,
    /// Short code-like value (e.g. `"MC102"`) — scored with plain Levenshtein.
    pub is_identifier: bool,
    /// If true, the value must never leave the server in a `SearchResult`.
    pub is_hidden: bool,
}

/// The schema a record type `T` must provide to be indexed (spec §3).
///
/// Invariants the implementation is responsible for: the property set is
/// non-empty and every weight is `>= 0` (checked, not merely assumed, by
/// [`crate::Entry::build`], which returns [`crate::SchemaError`] otherwise).
pub trait Searchable: Sized + Send + Sync {
    /// The non-empty, fixed set of searchable properties.
    fn properties() -> &'static [PropertySpec<Self>];

    /// Scaling exponent `s >= 0` applied to the combined per-record score
    /// after per-field combination (spec §4.3). Default `1.0` (no-op).
    fn scaling() -> f64 {
        1.0
    }

    /// Label emitted as `"content"` in a `SearchResult` (spec §6). Default
    /// is the lowercased type name via [`std::any::type_name`].
    fn content_label() -> &'static str;
}
