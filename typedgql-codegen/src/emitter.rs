//! Declaration emission entry points.

use typedgql_config::Config;

use crate::ast::{query, schema};
use crate::builder::CodeBuilder;
use crate::error::Result;
use crate::index::SchemaIndex;
use crate::operation_types::render_operations;
use crate::scalars::ScalarMap;
use crate::schema_types::render_schema_types;
use crate::steps::CodegenSteps;
use crate::ts::Import;

/// Default header literal for generated artifacts.
pub const DEFAULT_HEADER: &str = "/* eslint-disable */\n\n";

/// Renders declaration source text for schema and operation documents.
///
/// One emitter is built per resolved configuration and shared across every
/// emission call of a pass; it holds no per-call state.
#[derive(Debug, Clone)]
pub struct Emitter {
    scalars: ScalarMap,
    schema_header: String,
    operation_header: String,
}

impl Emitter {
    pub fn new(config: &Config) -> Self {
        Self {
            scalars: ScalarMap::resolve(config),
            schema_header: config
                .schema_declaration_header
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADER.to_string()),
            operation_header: config
                .operation_declaration_header
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADER.to_string()),
        }
    }

    /// Render the schema's own declaration artifact.
    pub fn emit_schema_declaration(&self, schema: &schema::Document) -> Result<String> {
        let body = self.emit(schema, None, CodegenSteps::schema_only())?;
        Ok(format!("{}{body}", self.schema_header))
    }

    /// Render one operation file's declaration artifact.
    ///
    /// With a schema import header the schema step is skipped and the
    /// header's import supplies those names; without one the schema types
    /// are generated inline so the artifact is self-contained.
    pub fn emit_operation_declaration(
        &self,
        schema: &schema::Document,
        operations: &query::Document,
        schema_import_header: Option<&str>,
    ) -> Result<String> {
        let steps = match schema_import_header {
            Some(_) => CodegenSteps::operations_only(),
            None => CodegenSteps::all(),
        };
        let body = self.emit(schema, Some(operations), steps)?;
        Ok(format!(
            "{}{}{body}",
            self.operation_header,
            schema_import_header.unwrap_or("")
        ))
    }

    /// Render declaration text for the enabled generation steps, without any
    /// header literal.
    pub fn emit(
        &self,
        schema: &schema::Document,
        operations: Option<&query::Document>,
        steps: CodegenSteps,
    ) -> Result<String> {
        let index = SchemaIndex::new(schema);
        let mut out = CodeBuilder::new();

        if steps.typed_document && operations.is_some() {
            out.push_raw(
                &Import::new("@graphql-typed-document-node/core")
                    .named("TypedDocumentNode")
                    .type_only()
                    .build(),
            );
            out.push_blank();
        }
        if steps.schema_types {
            render_schema_types(schema, &index, &self.scalars, &mut out)?;
        }
        if steps.operation_types
            && let Some(operations) = operations
        {
            render_operations(&index, operations, &self.scalars, steps.typed_document, &mut out)?;
        }

        Ok(out.build())
    }
}
