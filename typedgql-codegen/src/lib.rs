//! TypeScript declaration emission for GraphQL schemas and operations.
//!
//! This crate is the generation backend of typedgql: given a parsed schema
//! document and optionally a parsed operation document, it renders the
//! declaration source text that the engine persists next to each file.
//!
//! # Module Organization
//!
//! - [`ast`] - Owned aliases over the `graphql-parser` AST
//! - [`Emitter`] - Emission entry points, driven by [`CodegenSteps`]
//! - [`ScalarMap`] - Scalar configuration resolution and strict mode
//! - [`extract_export_names`] - Static export extraction from emitted text

pub mod ast;
mod builder;
mod emitter;
mod error;
mod exports;
mod index;
mod operation_types;
mod scalars;
mod schema_types;
mod steps;
mod ts;

pub use builder::CodeBuilder;
pub use emitter::{DEFAULT_HEADER, Emitter};
pub use error::{CodegenError, Result};
pub use exports::extract_export_names;
pub use scalars::{BUILTIN_SCALARS, ScalarMap, ScalarTypes};
pub use steps::CodegenSteps;
pub use ts::Import;
