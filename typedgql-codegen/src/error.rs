//! Errors raised while rendering declaration text.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// Strict scalar mode is engaged and a schema scalar has no mapping.
    #[error("no scalar mapping for '{name}' while strict_scalars is enabled")]
    UnmappedScalar { name: String },

    /// An operation selected a field the schema does not declare.
    #[error("type '{parent}' has no field '{field}'")]
    UnknownField { parent: String, field: String },

    /// A selection or variable referenced a type missing from the schema.
    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    /// A fragment spread referenced a fragment not defined in the document.
    #[error("unknown fragment '{name}'")]
    UnknownFragment { name: String },

    /// An operation selected a composite-typed field as a leaf.
    #[error("field '{field}' of type '{ty}' needs a selection set")]
    MissingSelectionSet { field: String, ty: String },

    /// The generated declarations are named after the operation, so
    /// anonymous operations cannot be emitted.
    #[error("anonymous operations are not supported; name the operation")]
    AnonymousOperation,
}
