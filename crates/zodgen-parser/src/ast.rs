//! Declaration-level AST.
//!
//! The parser only builds nodes for the parts of a module the schema
//! generator looks at: imports, re-exports, interfaces, type aliases and
//! enums, together with the full type syntax that can appear inside them.
//! Every other top-level statement is kept as an opaque span.

use bitflags::bitflags;
use zodgen_common::{Diagnostic, JsDoc, Span, Spanned};

bitflags! {
    /// Modifiers written before a top-level declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u16 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const DECLARE = 1 << 2;
        const CONST = 1 << 3;
    }
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub statements: Vec<Statement>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceFile {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Source text covered by `span`.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        span.slice(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub span: Span,
    pub text: String,
}

impl Identifier {
    /// An identifier was required but missing; the parser reported it.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub span: Span,
    /// Unescaped contents, without quotes.
    pub value: String,
}

/// A possibly dotted name such as `User` or `Models.User`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityName {
    pub span: Span,
    pub parts: Vec<Identifier>,
}

impl EntityName {
    /// The name when it has a single part.
    #[must_use]
    pub fn as_simple(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [only] => Some(only.text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Import(ImportDeclaration),
    Export(ExportDeclaration),
    Interface(InterfaceDeclaration),
    TypeAlias(TypeAliasDeclaration),
    Enum(EnumDeclaration),
    /// Any statement the generator does not need to understand.
    Other(Span),
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Import(decl) => decl.span,
            Statement::Export(decl) => decl.span,
            Statement::Interface(decl) => decl.span,
            Statement::TypeAlias(decl) => decl.span,
            Statement::Enum(decl) => decl.span,
            Statement::Other(span) => *span,
        }
    }
}

/// `import ... from "module"` or a side-effect `import "module"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub span: Span,
    pub is_type_only: bool,
    /// `None` for side-effect imports.
    pub clause: Option<ImportClause>,
    pub module_specifier: StringLiteral,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportClause {
    pub default_binding: Option<Identifier>,
    pub named_bindings: Option<NamedImportBindings>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamedImportBindings {
    /// `* as name`
    Namespace(Identifier),
    /// `{ a, b as c, type d }`
    Named(Vec<ImportSpecifier>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub span: Span,
    pub is_type_only: bool,
    /// The exported name when renamed with `as`.
    pub property_name: Option<Identifier>,
    /// The local binding.
    pub name: Identifier,
}

impl ImportSpecifier {
    /// Name of the export this specifier imports.
    #[must_use]
    pub fn imported_name(&self) -> &str {
        self.property_name.as_ref().unwrap_or(&self.name).text.as_str()
    }
}

/// `export { a, b as c }`, `export { a } from "m"`, `export * from "m"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDeclaration {
    pub span: Span,
    pub is_type_only: bool,
    pub clause: ExportClause,
    pub module_specifier: Option<StringLiteral>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportClause {
    Named(Vec<ExportSpecifier>),
    /// `export *` or `export * as ns`.
    Namespace(Option<Identifier>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub span: Span,
    pub is_type_only: bool,
    /// The local (or re-exported module's) name when renamed with `as`.
    pub property_name: Option<Identifier>,
    /// The exported name.
    pub name: Identifier,
}

impl ExportSpecifier {
    /// Name of the binding this specifier exports.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.property_name.as_ref().unwrap_or(&self.name).text.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameter {
    pub span: Span,
    pub name: Identifier,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

/// A type in an `extends` clause: `Base` or `Models.Base<T>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeritageType {
    pub span: Span,
    pub expression: EntityName,
    pub type_arguments: Vec<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    /// From the first modifier to the closing brace.
    pub span: Span,
    pub modifiers: ModifierFlags,
    pub name: Identifier,
    pub type_parameters: Vec<TypeParameter>,
    pub heritage: Vec<HeritageType>,
    pub members: Vec<TypeElement>,
    pub jsdoc: Vec<JsDoc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasDeclaration {
    /// From the first modifier to the terminating `;` when present.
    pub span: Span,
    pub modifiers: ModifierFlags,
    pub name: Identifier,
    pub type_parameters: Vec<TypeParameter>,
    pub ty: TypeNode,
    pub jsdoc: Vec<JsDoc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub span: Span,
    pub modifiers: ModifierFlags,
    pub name: Identifier,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    pub span: Span,
    pub name: PropertyName,
    pub initializer: Option<EnumInitializer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumInitializer {
    String(String),
    /// Numeric value, with a leading `-` when negated.
    Number(String),
    /// Any other constant expression.
    Expression(Span),
}

// =============================================================================
// Type members
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(StringLiteral),
    /// `[expr]`; only the span is kept.
    Computed(Span),
}

impl PropertyName {
    /// Static text of the name; `None` for computed names.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            PropertyName::Identifier(ident) => Some(&ident.text),
            PropertyName::StringLiteral(lit) | PropertyName::NumericLiteral(lit) => {
                Some(&lit.value)
            }
            PropertyName::Computed(_) => None,
        }
    }
}

impl Spanned for PropertyName {
    fn span(&self) -> Span {
        match self {
            PropertyName::Identifier(ident) => ident.span,
            PropertyName::StringLiteral(lit) | PropertyName::NumericLiteral(lit) => lit.span,
            PropertyName::Computed(span) => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeElement {
    Property(PropertySignature),
    Method(MethodSignature),
    CallSignature(SignatureDeclaration),
    ConstructSignature(SignatureDeclaration),
    Index(IndexSignature),
}

impl Spanned for TypeElement {
    fn span(&self) -> Span {
        match self {
            TypeElement::Property(prop) => prop.span,
            TypeElement::Method(method) => method.span,
            TypeElement::CallSignature(sig) | TypeElement::ConstructSignature(sig) => sig.span,
            TypeElement::Index(index) => index.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySignature {
    pub span: Span,
    pub readonly: bool,
    pub name: PropertyName,
    /// `name?: T`
    pub question: bool,
    /// `None` when the annotation is omitted (`name;`), which means `any`.
    pub ty: Option<TypeNode>,
    /// JSDoc comments directly before the property, in source order.
    pub jsdoc: Vec<JsDoc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    pub span: Span,
    pub name: PropertyName,
    pub question: bool,
    pub signature: SignatureDeclaration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureDeclaration {
    pub span: Span,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Box<TypeNode>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub span: Span,
    /// Source text of the binding name or pattern.
    pub name: String,
    pub rest: bool,
    pub question: bool,
    pub ty: Option<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSignature {
    pub span: Span,
    pub readonly: bool,
    pub parameter: Identifier,
    pub key_type: Box<TypeNode>,
    pub ty: Option<Box<TypeNode>>,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub span: Span,
    pub kind: TypeKind,
}

impl TypeNode {
    #[must_use]
    pub fn new(span: Span, kind: TypeKind) -> Self {
        TypeNode { span, kind }
    }

    /// Strip any number of enclosing parentheses.
    #[must_use]
    pub fn skip_parentheses(&self) -> &TypeNode {
        let mut node = self;
        while let TypeKind::Parenthesized(inner) = &node.kind {
            node = inner;
        }
        node
    }
}

impl Spanned for TypeNode {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Void,
    Undefined,
    Null,
    Never,
    Object,
    This,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralType {
    String(String),
    /// Normalized numeric text, with a leading `-` when negated.
    Number(String),
    /// Digits without the `n` suffix, with a leading `-` when negated.
    BigInt(String),
    Boolean(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeOperator {
    KeyOf,
    Readonly,
    Unique,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TupleElement {
    pub span: Span,
    pub name: Option<Identifier>,
    pub optional: bool,
    pub rest: bool,
    pub ty: TypeNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedType {
    pub readonly: bool,
    pub type_parameter: Identifier,
    pub constraint: Box<TypeNode>,
    pub name_type: Option<Box<TypeNode>>,
    pub question: bool,
    pub ty: Option<Box<TypeNode>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Keyword(KeywordType),
    Literal(LiteralType),
    Reference {
        name: EntityName,
        type_arguments: Vec<TypeNode>,
    },
    /// `T[]`
    Array(Box<TypeNode>),
    Tuple(Vec<TupleElement>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Parenthesized(Box<TypeNode>),
    TypeLiteral(Vec<TypeElement>),
    /// `(a: A) => R` or `new (a: A) => R`.
    Function {
        is_constructor: bool,
        signature: SignatureDeclaration,
    },
    Operator {
        operator: TypeOperator,
        ty: Box<TypeNode>,
    },
    /// `T[K]`
    IndexedAccess {
        object: Box<TypeNode>,
        index: Box<TypeNode>,
    },
    /// `typeof value`
    Query(EntityName),
    /// `import("module").Name<T>`
    Import {
        module: StringLiteral,
        qualifier: Option<EntityName>,
        type_arguments: Vec<TypeNode>,
    },
    Mapped(MappedType),
    Conditional {
        check: Box<TypeNode>,
        extends: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
    },
    Infer(Identifier),
    /// `x is T` or `asserts x is T` in a return position.
    Predicate {
        asserts: bool,
        parameter: Identifier,
        ty: Option<Box<TypeNode>>,
    },
    /// A template literal type; the raw text between the backticks.
    TemplateLiteral(String),
    /// A type was expected but could not be parsed. A diagnostic was reported.
    Error,
}
