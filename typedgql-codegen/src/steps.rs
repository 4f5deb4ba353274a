//! Generation step selection.

/// Which generation sub-steps an emission call enables.
///
/// Mirrors the backend's plugin set: schema type generation, operation type
/// generation, and the typed-document binding that ties an operation to its
/// result and variable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenSteps {
    pub schema_types: bool,
    pub operation_types: bool,
    pub typed_document: bool,
}

impl CodegenSteps {
    /// Every step: a self-contained operation artifact.
    pub fn all() -> Self {
        Self {
            schema_types: true,
            operation_types: true,
            typed_document: true,
        }
    }

    /// Schema type generation only: the schema's own artifact.
    pub fn schema_only() -> Self {
        Self {
            schema_types: true,
            operation_types: false,
            typed_document: false,
        }
    }

    /// Operation artifact whose schema types arrive through an import
    /// header.
    pub fn operations_only() -> Self {
        Self {
            schema_types: false,
            operation_types: true,
            typed_document: true,
        }
    }
}
