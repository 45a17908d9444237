//! Semantic type tree the schema compiler consumes.
//!
//! Built from syntax by [`crate::lower`]. References carry their resolved
//! declaration so the compiler never consults the program again, and every
//! shape the compiler cannot express is an explicit `Unresolved`.

use zodgen_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    BigInt,
    Any,
    Unknown,
    Never,
    Void,
    Symbol,
    Date,
}

impl PrimitiveKind {
    /// Name of the Zod constructor for this primitive.
    #[must_use]
    pub const fn constructor_name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Never => "never",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::Date => "date",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralValue {
    String(String),
    /// Numeric text as written in a JS literal, `-` included.
    Number(String),
    /// Digits without the `n` suffix, `-` included.
    BigInt(String),
    Boolean(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeNode {
    Primitive(PrimitiveKind),
    ArrayOf(Box<TypeNode>),
    UnionOf(Vec<TypeNode>),
    IntersectionOf(Vec<TypeNode>),
    LiteralValue(LiteralValue),
    Reference {
        name: String,
        declaration: ResolvedDeclaration,
    },
    InlineObject(Vec<PropertyNode>),
    Unresolved(String),
}

impl TypeNode {
    #[must_use]
    pub fn unresolved(reason: impl Into<String>) -> Self {
        TypeNode::Unresolved(reason.into())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, TypeNode::Primitive(PrimitiveKind::Null))
    }
}

/// What a type reference names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedDeclaration {
    /// An interface or an object type literal.
    Object(Vec<PropertyNode>),
    /// Enum member names in declaration order.
    Enum(Vec<String>),
    /// A type alias and its lowered body.
    Alias(Box<TypeNode>),
    Unresolved(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyNode {
    pub name: String,
    pub ty: TypeNode,
    pub optional: bool,
    /// The declared type was a union with `null`; `ty` has it removed.
    pub nullable: bool,
    pub error_message: Option<String>,
}

impl PropertyNode {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        PropertyNode {
            name: name.into(),
            ty,
            optional: false,
            nullable: false,
            error_message: None,
        }
    }
}

/// The declaration being converted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationNode {
    pub name: String,
    pub exported: bool,
    /// Source span of the whole declaration, modifiers included.
    pub span: Span,
    /// `InlineObject` for interfaces, the aliased type for type aliases.
    pub body: TypeNode,
}

impl DeclarationNode {
    /// Properties of an object-shaped declaration, in declared order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyNode] {
        match &self.body {
            TypeNode::InlineObject(properties)
            | TypeNode::Reference {
                declaration: ResolvedDeclaration::Object(properties),
                ..
            } => properties,
            _ => &[],
        }
    }
}
