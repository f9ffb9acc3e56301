//! Error kinds owned by this crate (spec §7 "SchemaError").

use thiserror::Error;

/// Raised while building an [`crate::Entry`] or [`crate::Index`] from a
/// record's [`crate::Searchable`] schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// One or more property weights were negative.
    #[error("properties with non-positive weight: {0:?}")]
    NonPositiveWeight(Vec<&'static str>),

    /// The schema declared zero properties.
    #[error("schema declares no properties")]
    EmptyPropertySet,
}
