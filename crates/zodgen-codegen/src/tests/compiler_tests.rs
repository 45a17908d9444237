use super::*;
use crate::config::FormatOptions;
use crate::printer::SchemaPrinter;

fn print(node: &TypeNode) -> String {
    SchemaPrinter::emit_to_string(&compile(node, "z"))
}

fn print_unbounded(node: &TypeNode) -> String {
    let mut printer = SchemaPrinter::new(&FormatOptions {
        max_line_width: u32::MAX,
        ..FormatOptions::default()
    });
    printer.emit_expr(&compile(node, "z"), 0);
    printer.finish()
}

fn primitive(kind: PrimitiveKind) -> TypeNode {
    TypeNode::Primitive(kind)
}

fn string_literal(value: &str) -> TypeNode {
    TypeNode::LiteralValue(LiteralValue::String(value.to_string()))
}

#[test]
fn test_primitives() {
    assert_eq!(print(&primitive(PrimitiveKind::String)), "z.string()");
    assert_eq!(print(&primitive(PrimitiveKind::BigInt)), "z.bigint()");
    assert_eq!(print(&primitive(PrimitiveKind::Date)), "z.date()");
    assert_eq!(print(&primitive(PrimitiveKind::Never)), "z.never()");
    assert_eq!(
        SchemaPrinter::emit_to_string(&compile(&primitive(PrimitiveKind::Number), "v")),
        "v.number()"
    );
}

#[test]
fn test_literals() {
    assert_eq!(print(&string_literal("a\"b")), r#"z.literal("a\"b")"#);
    assert_eq!(
        print(&TypeNode::LiteralValue(LiteralValue::Number("-1.5".to_string()))),
        "z.literal(-1.5)"
    );
    assert_eq!(
        print(&TypeNode::LiteralValue(LiteralValue::BigInt("10".to_string()))),
        "z.literal(10n)"
    );
    assert_eq!(
        print(&TypeNode::LiteralValue(LiteralValue::Boolean(false))),
        "z.literal(false)"
    );
}

#[test]
fn test_union_of_literals() {
    let union = TypeNode::UnionOf(vec![string_literal("active"), string_literal("inactive")]);
    assert_eq!(
        print(&union),
        r#"z.union([z.literal("active"), z.literal("inactive")])"#
    );
}

#[test]
fn test_degenerate_unions() {
    assert_eq!(print(&TypeNode::UnionOf(vec![])), "z.any()");
    assert_eq!(
        print(&TypeNode::UnionOf(vec![primitive(PrimitiveKind::Boolean)])),
        "z.boolean()"
    );
}

#[test]
fn test_intersection_folds_left() {
    let reference = |name: &str, property: &str| TypeNode::Reference {
        name: name.to_string(),
        declaration: ResolvedDeclaration::Object(vec![PropertyNode::new(
            property,
            primitive(PrimitiveKind::String),
        )]),
    };
    let node = TypeNode::IntersectionOf(vec![
        reference("A", "a"),
        reference("B", "b"),
        reference("C", "c"),
    ]);
    assert_eq!(
        print_unbounded(&node),
        "z.intersection(z.intersection(z.object({ a: z.string() }), z.object({ b: z.string() })), z.object({ c: z.string() }))"
    );
    assert_eq!(print(&TypeNode::IntersectionOf(vec![])), "z.any()");
}

#[test]
fn test_arrays() {
    let node = TypeNode::ArrayOf(Box::new(TypeNode::ArrayOf(Box::new(primitive(
        PrimitiveKind::Number,
    )))));
    assert_eq!(print(&node), "z.array(z.array(z.number()))");
}

#[test]
fn test_references() {
    let role = TypeNode::Reference {
        name: "Role".to_string(),
        declaration: ResolvedDeclaration::Enum(vec!["Admin".to_string(), "User".to_string()]),
    };
    assert_eq!(print(&role), r#"z.enum(["Admin", "User"])"#);

    let empty = TypeNode::Reference {
        name: "Nothing".to_string(),
        declaration: ResolvedDeclaration::Enum(Vec::new()),
    };
    assert_eq!(print(&empty), "z.never()");

    let alias = TypeNode::Reference {
        name: "Id".to_string(),
        declaration: ResolvedDeclaration::Alias(Box::new(primitive(PrimitiveKind::String))),
    };
    assert_eq!(print(&alias), "z.string()");

    let missing = TypeNode::Reference {
        name: "Missing".to_string(),
        declaration: ResolvedDeclaration::Unresolved("unresolved reference".to_string()),
    };
    assert_eq!(print(&missing), "z.any()");
    assert_eq!(print(&TypeNode::unresolved("tuple types")), "z.any()");
}

#[test]
fn test_empty_object() {
    assert_eq!(print(&TypeNode::InlineObject(vec![])), "z.object({})");
}

#[test]
fn test_property_modifier_order() {
    let mut property = PropertyNode::new("email", primitive(PrimitiveKind::String));
    property.optional = true;
    property.nullable = true;
    property.error_message = Some("Invalid email".to_string());
    assert_eq!(
        SchemaPrinter::emit_to_string(&compile_property(&property, "z")),
        r#"z.string({ message: "Invalid email" }).optional().nullable()"#
    );
}

#[test]
fn test_message_on_outer_call() {
    let mut property = PropertyNode::new(
        "tags",
        TypeNode::ArrayOf(Box::new(primitive(PrimitiveKind::String))),
    );
    property.error_message = Some("Bad tags".to_string());
    assert_eq!(
        SchemaPrinter::emit_to_string(&compile_property(&property, "z")),
        r#"z.array(z.string(), { message: "Bad tags" })"#
    );
}

#[test]
fn test_quoted_property_keys() {
    let node = TypeNode::InlineObject(vec![
        PropertyNode::new("first-name", primitive(PrimitiveKind::String)),
        PropertyNode::new("$id", primitive(PrimitiveKind::Number)),
    ]);
    assert_eq!(
        print(&node),
        r#"z.object({ "first-name": z.string(), $id: z.number() })"#
    );
}
