//! Type-to-schema compiler.
//!
//! Maps a lowered [`TypeNode`] to the Zod expression validating it. The
//! mapping is total: shapes without a schema counterpart have already been
//! lowered to `Unresolved`, which compiles to `any()`.
//!
//! | type                         | schema                              |
//! |------------------------------|-------------------------------------|
//! | `string`, `Date`, ...        | `z.string()`, `z.date()`, ...       |
//! | `"a"`, `1`, `true`, `1n`     | `z.literal(...)`                    |
//! | `{ a: A }`, interfaces       | `z.object({ a: ... })`              |
//! | enums                        | `z.enum(["A", "B"])`                |
//! | `A \| B`                     | `z.union([A, B])`                   |
//! | `A & B & C`                  | `z.intersection(z.intersection(A, B), C)` |
//! | `T[]`, `Array<T>`            | `z.array(T)`                        |

use crate::schema::SchemaExpr;
use crate::type_node::{LiteralValue, PrimitiveKind, PropertyNode, ResolvedDeclaration, TypeNode};

/// Compile `node` into a schema expression on `binding`.
#[must_use]
pub fn compile(node: &TypeNode, binding: &str) -> SchemaExpr {
    match node {
        TypeNode::Primitive(kind) => SchemaExpr::call(binding, kind.constructor_name(), vec![]),
        TypeNode::LiteralValue(value) => {
            SchemaExpr::call(binding, "literal", vec![literal_argument(value)])
        }
        TypeNode::InlineObject(properties) => compile_object(properties, binding),
        TypeNode::Reference { declaration, .. } => match declaration {
            ResolvedDeclaration::Object(properties) => compile_object(properties, binding),
            // `enum()` needs at least one member.
            ResolvedDeclaration::Enum(members) if members.is_empty() => {
                SchemaExpr::call(binding, PrimitiveKind::Never.constructor_name(), vec![])
            }
            ResolvedDeclaration::Enum(members) => SchemaExpr::call(
                binding,
                "enum",
                vec![SchemaExpr::array(
                    members.iter().map(|member| SchemaExpr::string(member.as_str())).collect(),
                )],
            ),
            ResolvedDeclaration::Alias(aliased) => compile(aliased, binding),
            ResolvedDeclaration::Unresolved(_) => any(binding),
        },
        TypeNode::UnionOf(members) => match members.as_slice() {
            [] => any(binding),
            [only] => compile(only, binding),
            _ => SchemaExpr::call(
                binding,
                "union",
                vec![SchemaExpr::array(
                    members.iter().map(|member| compile(member, binding)).collect(),
                )],
            ),
        },
        TypeNode::IntersectionOf(members) => {
            let mut compiled = members.iter().map(|member| compile(member, binding));
            match compiled.next() {
                Some(first) => compiled.fold(first, |left, right| {
                    SchemaExpr::call(binding, "intersection", vec![left, right])
                }),
                None => any(binding),
            }
        }
        TypeNode::ArrayOf(element) => {
            SchemaExpr::call(binding, "array", vec![compile(element, binding)])
        }
        TypeNode::Unresolved(_) => any(binding),
    }
}

/// Compile one property: the type's schema, the error message argument,
/// then `optional()` and `nullable()` in that order.
#[must_use]
pub fn compile_property(property: &PropertyNode, binding: &str) -> SchemaExpr {
    let mut schema = compile(&property.ty, binding);
    if let Some(message) = &property.error_message {
        schema = schema.with_argument(SchemaExpr::object(vec![(
            "message".to_string(),
            SchemaExpr::string(message.as_str()),
        )]));
    }
    if property.optional {
        schema = schema.chain("optional");
    }
    if property.nullable {
        schema = schema.chain("nullable");
    }
    schema
}

fn compile_object(properties: &[PropertyNode], binding: &str) -> SchemaExpr {
    let shape = properties
        .iter()
        .map(|property| (property.name.clone(), compile_property(property, binding)))
        .collect();
    SchemaExpr::call(binding, "object", vec![SchemaExpr::object(shape)])
}

fn literal_argument(value: &LiteralValue) -> SchemaExpr {
    match value {
        LiteralValue::String(text) => SchemaExpr::string(text.as_str()),
        LiteralValue::Number(text) => SchemaExpr::number(text.as_str()),
        LiteralValue::BigInt(digits) => SchemaExpr::BigIntLiteral(digits.clone()),
        LiteralValue::Boolean(value) => SchemaExpr::BooleanLiteral(*value),
    }
}

fn any(binding: &str) -> SchemaExpr {
    SchemaExpr::call(binding, PrimitiveKind::Any.constructor_name(), vec![])
}

#[cfg(test)]
#[path = "tests/compiler_tests.rs"]
mod compiler_tests;
