//! Lookup index over a schema document.

use indexmap::IndexMap;

use crate::ast::schema::{Definition, Document, Field, TypeDefinition};

/// Resolves type and field references while rendering declarations.
pub(crate) struct SchemaIndex<'a> {
    types: IndexMap<&'a str, &'a TypeDefinition>,
    query: &'a str,
    mutation: &'a str,
    subscription: &'a str,
}

impl<'a> SchemaIndex<'a> {
    pub fn new(doc: &'a Document) -> Self {
        let mut types = IndexMap::new();
        let mut query = "Query";
        let mut mutation = "Mutation";
        let mut subscription = "Subscription";

        for def in &doc.definitions {
            match def {
                Definition::TypeDefinition(ty) => {
                    types.insert(type_name(ty), ty);
                }
                Definition::SchemaDefinition(schema) => {
                    if let Some(name) = schema.query.as_deref() {
                        query = name;
                    }
                    if let Some(name) = schema.mutation.as_deref() {
                        mutation = name;
                    }
                    if let Some(name) = schema.subscription.as_deref() {
                        subscription = name;
                    }
                }
                _ => {}
            }
        }

        Self {
            types,
            query,
            mutation,
            subscription,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a TypeDefinition> {
        self.types.get(name).copied()
    }

    /// Look up a field on an object or interface type.
    pub fn field(&self, parent: &str, name: &str) -> Option<&'a Field> {
        match self.get(parent)? {
            TypeDefinition::Object(object) => object.fields.iter().find(|f| f.name == name),
            TypeDefinition::Interface(interface) => {
                interface.fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        matches!(name, "ID" | "String" | "Boolean" | "Int" | "Float")
            || matches!(self.get(name), Some(TypeDefinition::Scalar(_)))
    }

    pub fn is_enum(&self, name: &str) -> bool {
        matches!(self.get(name), Some(TypeDefinition::Enum(_)))
    }

    pub fn query_type(&self) -> &'a str {
        self.query
    }

    pub fn mutation_type(&self) -> &'a str {
        self.mutation
    }

    pub fn subscription_type(&self) -> &'a str {
        self.subscription
    }
}

fn type_name(ty: &TypeDefinition) -> &str {
    match ty {
        TypeDefinition::Scalar(scalar) => &scalar.name,
        TypeDefinition::Object(object) => &object.name,
        TypeDefinition::Interface(interface) => &interface.name,
        TypeDefinition::Union(union) => &union.name,
        TypeDefinition::Enum(en) => &en.name,
        TypeDefinition::InputObject(input) => &input.name,
    }
}
