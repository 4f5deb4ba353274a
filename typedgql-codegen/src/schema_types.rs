//! Schema declaration rendering.

use typedgql_core::to_pascal_case;

use crate::ast::schema::{
    Definition, Document, EnumType, Field, InputObjectType, InterfaceType, ObjectType, Type,
    TypeDefinition, UnionType,
};
use crate::builder::CodeBuilder;
use crate::error::Result;
use crate::index::SchemaIndex;
use crate::scalars::{BUILTIN_SCALARS, ScalarMap};

/// Render the full schema declaration section: helper types, the `Scalars`
/// map, then one declaration per type definition in document order.
pub(crate) fn render_schema_types(
    doc: &Document,
    index: &SchemaIndex,
    scalars: &ScalarMap,
    out: &mut CodeBuilder,
) -> Result<()> {
    render_helpers(out);
    render_scalars_map(doc, scalars, out)?;

    for def in &doc.definitions {
        let Definition::TypeDefinition(ty) = def else {
            continue;
        };
        match ty {
            TypeDefinition::Object(object) => render_object(object, index, out),
            TypeDefinition::Interface(interface) => render_interface(interface, index, out),
            TypeDefinition::Union(union) => render_union(union, out),
            TypeDefinition::Enum(en) => render_enum(en, out),
            TypeDefinition::InputObject(input) => render_input_object(input, index, out),
            // Covered by the Scalars map.
            TypeDefinition::Scalar(_) => {}
        }
    }
    Ok(())
}

fn render_helpers(out: &mut CodeBuilder) {
    out.push_line("export type Maybe<T> = T | null;");
    out.push_line("export type InputMaybe<T> = Maybe<T>;");
    out.push_line(
        "export type Exact<T extends { [key: string]: unknown }> = { [K in keyof T]: T[K] };",
    );
    out.push_blank();
}

fn render_scalars_map(doc: &Document, scalars: &ScalarMap, out: &mut CodeBuilder) -> Result<()> {
    out.push_jsdoc("All built-in and custom scalars, mapped to their actual values");
    out.push_line("export type Scalars = {");
    out.push_indent();

    for (name, _) in BUILTIN_SCALARS {
        let types = scalars.lookup(name)?;
        out.push_line(&format!(
            "{name}: {{ input: {}; output: {}; }}",
            types.input, types.output
        ));
    }
    // Custom scalars in document order. In strict mode this is where an
    // unmapped scalar surfaces, before any type references it.
    for def in &doc.definitions {
        if let Definition::TypeDefinition(TypeDefinition::Scalar(scalar)) = def {
            let types = scalars.lookup(&scalar.name)?;
            out.push_line(&format!(
                "{}: {{ input: {}; output: {}; }}",
                scalar.name, types.input, types.output
            ));
        }
    }

    out.push_dedent();
    out.push_line("};");
    out.push_blank();
    Ok(())
}

/// Render a type reference inside a schema-level declaration, where scalars
/// are referenced through the `Scalars` map.
pub(crate) fn ts_type_ref(ty: &Type, index: &SchemaIndex, input_pos: bool) -> String {
    match ty {
        Type::NonNullType(inner) => ts_type_base(inner, index, input_pos),
        _ => {
            let wrapper = if input_pos { "InputMaybe" } else { "Maybe" };
            format!("{wrapper}<{}>", ts_type_base(ty, index, input_pos))
        }
    }
}

fn ts_type_base(ty: &Type, index: &SchemaIndex, input_pos: bool) -> String {
    match ty {
        Type::NamedType(name) => {
            if index.is_scalar(name) {
                let position = if input_pos { "input" } else { "output" };
                format!("Scalars['{name}']['{position}']")
            } else {
                name.clone()
            }
        }
        Type::ListType(inner) => format!("Array<{}>", ts_type_ref(inner, index, input_pos)),
        Type::NonNullType(inner) => ts_type_base(inner, index, input_pos),
    }
}

fn render_object(object: &ObjectType, index: &SchemaIndex, out: &mut CodeBuilder) {
    if let Some(description) = &object.description {
        out.push_jsdoc(description);
    }
    out.push_line(&format!("export type {} = {{", object.name));
    out.push_indent();
    out.push_line(&format!("__typename?: '{}';", object.name));
    for field in &object.fields {
        render_field(field, index, out);
    }
    out.push_dedent();
    out.push_line("};");
    out.push_blank();
}

fn render_interface(interface: &InterfaceType, index: &SchemaIndex, out: &mut CodeBuilder) {
    if let Some(description) = &interface.description {
        out.push_jsdoc(description);
    }
    out.push_line(&format!("export type {} = {{", interface.name));
    out.push_indent();
    for field in &interface.fields {
        render_field(field, index, out);
    }
    out.push_dedent();
    out.push_line("};");
    out.push_blank();
}

fn render_field(field: &Field, index: &SchemaIndex, out: &mut CodeBuilder) {
    if let Some(description) = &field.description {
        out.push_jsdoc(description);
    }
    let optional = !matches!(field.field_type, Type::NonNullType(_));
    let ts = ts_type_ref(&field.field_type, index, false);
    out.push_line(&format!(
        "{}{}: {ts};",
        field.name,
        if optional { "?" } else { "" }
    ));
}

fn render_union(union: &UnionType, out: &mut CodeBuilder) {
    if let Some(description) = &union.description {
        out.push_jsdoc(description);
    }
    let members = if union.types.is_empty() {
        "never".to_string()
    } else {
        union.types.join(" | ")
    };
    out.push_line(&format!("export type {} = {members};", union.name));
    out.push_blank();
}

fn render_enum(en: &EnumType, out: &mut CodeBuilder) {
    if let Some(description) = &en.description {
        out.push_jsdoc(description);
    }
    out.push_line(&format!("export enum {} {{", en.name));
    out.push_indent();
    for (i, value) in en.values.iter().enumerate() {
        let member = to_pascal_case(&value.name.to_lowercase());
        let comma = if i + 1 < en.values.len() { "," } else { "" };
        out.push_line(&format!("{member} = '{}'{comma}", value.name));
    }
    out.push_dedent();
    out.push_line("}");
    out.push_blank();
}

fn render_input_object(input: &InputObjectType, index: &SchemaIndex, out: &mut CodeBuilder) {
    if let Some(description) = &input.description {
        out.push_jsdoc(description);
    }
    out.push_line(&format!("export type {} = {{", input.name));
    out.push_indent();
    for field in &input.fields {
        let optional = !matches!(field.value_type, Type::NonNullType(_));
        let ts = ts_type_ref(&field.value_type, index, true);
        out.push_line(&format!(
            "{}{}: {ts};",
            field.name,
            if optional { "?" } else { "" }
        ));
    }
    out.push_dedent();
    out.push_line("};");
    out.push_blank();
}
