//! Schema and inferred-type declarations.

use crate::schema::SchemaExpr;

/// A top-level declaration produced for a converted type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// `export const UserSchema = z.object({ ... });`
    SchemaConst {
        exported: bool,
        name: String,
        initializer: SchemaExpr,
    },
    /// `export type User = z.infer<typeof UserSchema>;`
    InferredType {
        exported: bool,
        name: String,
        binding: String,
        schema_name: String,
    },
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Declaration::SchemaConst { name, .. } | Declaration::InferredType { name, .. } => name,
        }
    }
}

/// Name of the schema constant generated for the type `name`.
#[must_use]
pub fn schema_name(name: &str) -> String {
    format!("{name}Schema")
}

/// Wrap a compiled schema into the schema constant and the type alias
/// inferred from it. Both carry the export qualifier of the original
/// declaration.
#[must_use]
pub fn emit(
    name: &str,
    binding: &str,
    schema: SchemaExpr,
    exported: bool,
) -> (Declaration, Declaration) {
    let schema_name = schema_name(name);
    let schema_decl = Declaration::SchemaConst {
        exported,
        name: schema_name.clone(),
        initializer: schema,
    };
    let inferred_decl = Declaration::InferredType {
        exported,
        name: name.to_string(),
        binding: binding.to_string(),
        schema_name,
    };
    (schema_decl, inferred_decl)
}
