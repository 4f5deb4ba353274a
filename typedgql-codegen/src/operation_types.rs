//! Operation declaration rendering.
//!
//! Each named operation produces a `<Name><Kind>Variables` type, a
//! `<Name><Kind>` result type computed by resolving the selection set
//! against the schema, and (when the typed-document step is enabled) a
//! `<Name>Document` typed-document declaration. Result types inline scalar
//! types directly, so they stand on their own without the `Scalars` map.

use std::collections::HashMap;

use typedgql_core::to_pascal_case;

use crate::ast::query::{
    Definition, Document, Field, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
    TypeCondition, VariableDefinition,
};
use crate::ast::schema;
use crate::builder::CodeBuilder;
use crate::error::{CodegenError, Result};
use crate::index::SchemaIndex;
use crate::scalars::ScalarMap;
use crate::schema_types::ts_type_ref;

pub(crate) fn render_operations(
    index: &SchemaIndex,
    doc: &Document,
    scalars: &ScalarMap,
    typed_document: bool,
    out: &mut CodeBuilder,
) -> Result<()> {
    let fragments: HashMap<&str, &FragmentDefinition> = doc
        .definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        })
        .collect();

    let ctx = OperationContext {
        index,
        scalars,
        fragments,
    };

    for def in &doc.definitions {
        let Definition::Operation(op) = def else {
            continue;
        };
        let (kind, name, variables, selection_set) = match op {
            OperationDefinition::SelectionSet(_) => {
                return Err(CodegenError::AnonymousOperation);
            }
            OperationDefinition::Query(q) => {
                ("Query", q.name.as_deref(), &q.variable_definitions, &q.selection_set)
            }
            OperationDefinition::Mutation(m) => {
                ("Mutation", m.name.as_deref(), &m.variable_definitions, &m.selection_set)
            }
            OperationDefinition::Subscription(s) => (
                "Subscription",
                s.name.as_deref(),
                &s.variable_definitions,
                &s.selection_set,
            ),
        };
        let name = to_pascal_case(name.ok_or(CodegenError::AnonymousOperation)?);
        let base = format!("{name}{kind}");
        let root = match kind {
            "Query" => index.query_type(),
            "Mutation" => index.mutation_type(),
            _ => index.subscription_type(),
        };

        render_variables(&base, variables, index, out);

        let result = ctx.render_selection(root, selection_set)?;
        out.push_line(&format!("export type {base} = {result};"));
        out.push_blank();

        if typed_document {
            out.push_line(&format!(
                "export declare const {name}Document: TypedDocumentNode<{base}, {base}Variables>;"
            ));
            out.push_blank();
        }
    }
    Ok(())
}

fn render_variables(
    base: &str,
    variables: &[VariableDefinition],
    index: &SchemaIndex,
    out: &mut CodeBuilder,
) {
    if variables.is_empty() {
        out.push_line(&format!(
            "export type {base}Variables = Exact<{{ [key: string]: never; }}>;"
        ));
        out.push_blank();
        return;
    }

    out.push_line(&format!("export type {base}Variables = Exact<{{"));
    out.push_indent();
    for var in variables {
        let optional = !matches!(var.var_type, schema::Type::NonNullType(_));
        let ts = ts_type_ref(&var.var_type, index, true);
        out.push_line(&format!(
            "{}{}: {ts};",
            var.name,
            if optional { "?" } else { "" }
        ));
    }
    out.push_dedent();
    out.push_line("}>;");
    out.push_blank();
}

struct OperationContext<'s, 'd> {
    index: &'d SchemaIndex<'s>,
    scalars: &'d ScalarMap,
    fragments: HashMap<&'d str, &'d FragmentDefinition>,
}

impl OperationContext<'_, '_> {
    /// Render the object literal type for a selection on `parent`.
    fn render_selection(&self, parent: &str, selection_set: &SelectionSet) -> Result<String> {
        let entries = self.selection_entries(parent, selection_set)?;
        Ok(format!("{{ {} }}", entries.join(", ")))
    }

    fn selection_entries(&self, parent: &str, selection_set: &SelectionSet) -> Result<Vec<String>> {
        let mut entries = Vec::new();
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => entries.push(self.field_entry(parent, field)?),
                Selection::FragmentSpread(spread) => {
                    let fragment = self
                        .fragments
                        .get(spread.fragment_name.as_str())
                        .ok_or_else(|| CodegenError::UnknownFragment {
                            name: spread.fragment_name.clone(),
                        })?;
                    let TypeCondition::On(on) = &fragment.type_condition;
                    entries.extend(self.selection_entries(on, &fragment.selection_set)?);
                }
                Selection::InlineFragment(inline) => {
                    let on = match &inline.type_condition {
                        Some(TypeCondition::On(on)) => on.as_str(),
                        None => parent,
                    };
                    entries.extend(self.selection_entries(on, &inline.selection_set)?);
                }
            }
        }
        Ok(entries)
    }

    fn field_entry(&self, parent: &str, field: &Field) -> Result<String> {
        let key = field.alias.as_ref().unwrap_or(&field.name);
        if field.name == "__typename" {
            return Ok(format!("{key}: '{parent}'"));
        }

        let schema_field =
            self.index
                .field(parent, &field.name)
                .ok_or_else(|| CodegenError::UnknownField {
                    parent: parent.to_string(),
                    field: field.name.clone(),
                })?;
        let optional = !matches!(schema_field.field_type, schema::Type::NonNullType(_));
        let ts = self.selection_type(&schema_field.field_type, field)?;
        Ok(format!("{key}{}: {ts}", if optional { "?" } else { "" }))
    }

    /// Render the concrete (scalar-inlined) type of one selected field.
    fn selection_type(&self, ty: &schema::Type, field: &Field) -> Result<String> {
        match ty {
            schema::Type::NonNullType(inner) => self.selection_type_base(inner, field),
            _ => Ok(format!("{} | null", self.selection_type_base(ty, field)?)),
        }
    }

    fn selection_type_base(&self, ty: &schema::Type, field: &Field) -> Result<String> {
        match ty {
            schema::Type::NamedType(name) => self.named_selection_type(name, field),
            schema::Type::ListType(inner) => {
                Ok(format!("Array<{}>", self.selection_type(inner, field)?))
            }
            schema::Type::NonNullType(inner) => self.selection_type_base(inner, field),
        }
    }

    fn named_selection_type(&self, name: &str, field: &Field) -> Result<String> {
        if !field.selection_set.items.is_empty() {
            return self.render_selection(name, &field.selection_set);
        }
        if self.index.is_enum(name) {
            return Ok(name.to_string());
        }
        if self.index.is_scalar(name) {
            return Ok(self.scalars.lookup(name)?.output);
        }
        if self.index.get(name).is_some() {
            return Err(CodegenError::MissingSelectionSet {
                field: field.name.clone(),
                ty: name.to_string(),
            });
        }
        Err(CodegenError::UnknownType {
            name: name.to_string(),
        })
    }
}
