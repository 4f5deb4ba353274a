use miette::Diagnostic;
use thiserror::Error;
use typedgql_codegen::CodegenError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the declaration engine.
///
/// Schema-phase failures are fatal to a pass; operation-phase failures are
/// local to one file and aggregated in the pass report.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The schema file is missing, unreadable, or failed to parse. Every
    /// downstream artifact is meaningless without the schema, so this
    /// propagates immediately.
    #[error("failed to load schema '{path}'")]
    #[diagnostic(code(typedgql::schema_load))]
    SchemaLoad {
        path: String,
        #[source]
        source: SchemaLoadCause,
    },

    /// An operation file failed to parse as a GraphQL document.
    #[error("failed to parse operations in '{path}'")]
    #[diagnostic(code(typedgql::operation_parse))]
    OperationParse {
        path: String,
        #[source]
        source: graphql_parser::query::ParseError,
    },

    /// An operation file could not be read.
    #[error("failed to read '{path}'")]
    #[diagnostic(code(typedgql::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be persisted.
    #[error("failed to write '{path}'")]
    #[diagnostic(code(typedgql::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The generation backend rejected an emission call (e.g. an unmapped
    /// scalar in strict mode).
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// A supplied path could not be resolved against the working directory.
    #[error("failed to resolve '{path}'")]
    #[diagnostic(code(typedgql::resolve))]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An include/exclude pattern failed to compile.
    #[error("invalid {kind} pattern '{pattern}'")]
    #[diagnostic(code(typedgql::pattern))]
    Pattern {
        kind: &'static str,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Underlying cause of a schema load failure.
#[derive(Debug, Error)]
pub enum SchemaLoadCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] graphql_parser::schema::ParseError),
}
