//! Lowering from type syntax to the semantic [`TypeNode`] tree.
//!
//! References are resolved through the [`TypeResolver`] and their
//! declarations lowered in place, so the compiler sees a self-contained
//! tree. Shapes without a schema counterpart fail with
//! [`UnsupportedTypeShape`]; the failure is caught at the enclosing
//! property, logged, and that property falls back to `any`.

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};
use zodgen_binder::{FileId, ResolvedKind, ResolvedType, TypeResolver};
use zodgen_common::limits::MAX_LOWERING_DEPTH;
use zodgen_parser::{
    self as ast, EntityName, InterfaceDeclaration, KeywordType, LiteralType, PropertySignature,
    TypeElement, TypeKind, TypeOperator,
};

use crate::config::ConverterConfig;
use crate::error::UnsupportedTypeShape;
use crate::jsdoc::extract_error_message;
use crate::locator::DeclarationTarget;
use crate::type_node::{
    DeclarationNode, LiteralValue, PrimitiveKind, PropertyNode, ResolvedDeclaration, TypeNode,
};

type LowerResult<T> = Result<T, UnsupportedTypeShape>;

pub struct Lowering<'a, R: TypeResolver + ?Sized> {
    resolver: &'a R,
    config: &'a ConverterConfig,
    /// Declarations currently being lowered; a reference to one of them
    /// is a cycle.
    active: Vec<(FileId, String)>,
    depth: u32,
}

impl<'a, R: TypeResolver + ?Sized> Lowering<'a, R> {
    pub fn new(resolver: &'a R, config: &'a ConverterConfig) -> Self {
        Lowering {
            resolver,
            config,
            active: Vec::new(),
            depth: 0,
        }
    }

    /// Lower the declaration being converted. Never fails: an unsupported
    /// alias body becomes `Unresolved`.
    pub fn lower_declaration(
        &mut self,
        file: FileId,
        target: DeclarationTarget<'_>,
    ) -> DeclarationNode {
        let name = target.name().to_string();
        self.active.push((file, name.clone()));

        let body = match target {
            DeclarationTarget::Interface(decl) => {
                let resolver = self.resolver;
                let merged = match resolver.resolve_type_reference(file, &name) {
                    Some(ResolvedType {
                        file: declared_in,
                        kind: ResolvedKind::Interface(decls),
                        ..
                    }) if declared_in == file && decls.len() > 1 => decls,
                    _ => vec![decl],
                };
                TypeNode::InlineObject(self.lower_interface(file, &merged))
            }
            DeclarationTarget::TypeAlias(decl) => match self.lower_type(file, &decl.ty) {
                Ok(body) => body,
                Err(err) => {
                    warn!(declaration = %name, %err, "falling back to any");
                    TypeNode::Unresolved(err.0)
                }
            },
        };

        self.active.pop();
        debug!(declaration = %name, "lowered declaration");
        DeclarationNode {
            name,
            exported: target.is_exported(),
            span: target.span(),
            body,
        }
    }

    /// Own properties of all merged declarations, then inherited ones.
    /// The first declaration of a name wins.
    fn lower_interface(
        &mut self,
        file: FileId,
        decls: &[&InterfaceDeclaration],
    ) -> Vec<PropertyNode> {
        let mut seen = FxHashSet::default();
        let mut properties = Vec::new();
        for decl in decls {
            self.collect_properties(file, &decl.members, &mut seen, &mut properties);
        }
        for decl in decls {
            for heritage in &decl.heritage {
                for property in self.lower_heritage(file, heritage) {
                    if seen.insert(property.name.clone()) {
                        properties.push(property);
                    }
                }
            }
        }
        properties
    }

    fn collect_properties(
        &mut self,
        file: FileId,
        members: &[TypeElement],
        seen: &mut FxHashSet<String>,
        properties: &mut Vec<PropertyNode>,
    ) {
        for member in members {
            let TypeElement::Property(signature) = member else {
                trace!("skipping non-property member");
                continue;
            };
            let Some(name) = signature.name.text() else {
                debug!("skipping computed property name");
                continue;
            };
            if seen.insert(name.to_string()) {
                properties.push(self.lower_property(file, name, signature));
            }
        }
    }

    fn lower_heritage(&mut self, file: FileId, heritage: &ast::HeritageType) -> Vec<PropertyNode> {
        let Some(name) = heritage.expression.as_simple() else {
            debug!(base = %heritage.expression.text(), "qualified base type not followed");
            return Vec::new();
        };
        if !heritage.type_arguments.is_empty() {
            debug!(base = name, "generic base type not followed");
            return Vec::new();
        }
        let resolver = self.resolver;
        let Some(resolved) = resolver.resolve_type_reference(file, name) else {
            debug!(base = name, "base type did not resolve");
            return Vec::new();
        };

        match self.lower_resolved(resolved) {
            Ok(ResolvedDeclaration::Object(properties)) => properties,
            Ok(ResolvedDeclaration::Alias(body)) => match *body {
                TypeNode::InlineObject(properties)
                | TypeNode::Reference {
                    declaration: ResolvedDeclaration::Object(properties),
                    ..
                } => properties,
                _ => Vec::new(),
            },
            Ok(_) => Vec::new(),
            Err(err) => {
                warn!(base = name, %err, "base type skipped");
                Vec::new()
            }
        }
    }

    fn lower_property(
        &mut self,
        file: FileId,
        name: &str,
        signature: &PropertySignature,
    ) -> PropertyNode {
        let lowered = match &signature.ty {
            // `name;` without an annotation is implicitly `any`.
            None => Ok((TypeNode::Primitive(PrimitiveKind::Any), false)),
            Some(ty) => self.lower_property_type(file, ty),
        };
        let (ty, nullable) = lowered.unwrap_or_else(|err| {
            warn!(property = name, %err, "falling back to any");
            (TypeNode::Unresolved(err.0), false)
        });

        PropertyNode {
            name: name.to_string(),
            ty,
            optional: signature.question,
            nullable,
            error_message: extract_error_message(&signature.jsdoc, self.config),
        }
    }

    /// Lower a property type, lifting a `null` union member into the
    /// nullable flag.
    fn lower_property_type(
        &mut self,
        file: FileId,
        ty: &ast::TypeNode,
    ) -> LowerResult<(TypeNode, bool)> {
        if let TypeKind::Union(members) = &ty.skip_parentheses().kind {
            let non_null: Vec<&ast::TypeNode> =
                members.iter().filter(|member| !is_null_type(member)).collect();
            if non_null.len() < members.len() && !non_null.is_empty() {
                let lowered = non_null
                    .into_iter()
                    .map(|member| self.lower_type(file, member))
                    .collect::<LowerResult<Vec<_>>>()?;
                return Ok((union_of(lowered), true));
            }
        }
        Ok((self.lower_type(file, ty)?, false))
    }

    pub fn lower_type(&mut self, file: FileId, node: &ast::TypeNode) -> LowerResult<TypeNode> {
        if self.depth >= MAX_LOWERING_DEPTH {
            return Err(UnsupportedTypeShape::new("type nesting too deep"));
        }
        self.depth += 1;
        let result = self.lower_type_worker(file, node);
        self.depth -= 1;
        result
    }

    fn lower_type_worker(&mut self, file: FileId, node: &ast::TypeNode) -> LowerResult<TypeNode> {
        match &node.kind {
            TypeKind::Keyword(keyword) => lower_keyword(*keyword),
            TypeKind::Literal(literal) => Ok(TypeNode::LiteralValue(match literal {
                LiteralType::String(value) => LiteralValue::String(value.clone()),
                LiteralType::Number(value) => LiteralValue::Number(value.clone()),
                LiteralType::BigInt(value) => LiteralValue::BigInt(value.clone()),
                LiteralType::Boolean(value) => LiteralValue::Boolean(*value),
            })),
            TypeKind::Reference {
                name,
                type_arguments,
            } => self.lower_reference(file, name, type_arguments),
            TypeKind::Array(element) => {
                Ok(TypeNode::ArrayOf(Box::new(self.lower_type(file, element)?)))
            }
            TypeKind::Union(members) => Ok(TypeNode::UnionOf(self.lower_all(file, members)?)),
            TypeKind::Intersection(members) => {
                Ok(TypeNode::IntersectionOf(self.lower_all(file, members)?))
            }
            TypeKind::Parenthesized(inner) => self.lower_type(file, inner),
            TypeKind::TypeLiteral(members) => {
                let mut properties = Vec::new();
                self.collect_properties(file, members, &mut FxHashSet::default(), &mut properties);
                Ok(TypeNode::InlineObject(properties))
            }
            // `readonly T[]` validates like `T[]`.
            TypeKind::Operator {
                operator: TypeOperator::Readonly,
                ty,
            } => self.lower_type(file, ty),
            TypeKind::Operator {
                operator: TypeOperator::KeyOf,
                ..
            } => Err(UnsupportedTypeShape::new("keyof types")),
            TypeKind::Operator {
                operator: TypeOperator::Unique,
                ..
            } => Err(UnsupportedTypeShape::new("unique symbol types")),
            TypeKind::Tuple(_) => Err(UnsupportedTypeShape::new("tuple types")),
            TypeKind::Function { .. } => Err(UnsupportedTypeShape::new("function types")),
            TypeKind::IndexedAccess { .. } => Err(UnsupportedTypeShape::new("indexed access types")),
            TypeKind::Query(_) => Err(UnsupportedTypeShape::new("typeof queries")),
            TypeKind::Import { .. } => Err(UnsupportedTypeShape::new("import types")),
            TypeKind::Mapped(_) => Err(UnsupportedTypeShape::new("mapped types")),
            TypeKind::Conditional { .. } | TypeKind::Infer(_) => {
                Err(UnsupportedTypeShape::new("conditional types"))
            }
            TypeKind::Predicate { .. } => Err(UnsupportedTypeShape::new("type predicates")),
            TypeKind::TemplateLiteral(_) => Err(UnsupportedTypeShape::new("template literal types")),
            TypeKind::Error => Err(UnsupportedTypeShape::new("malformed type")),
        }
    }

    fn lower_all(&mut self, file: FileId, members: &[ast::TypeNode]) -> LowerResult<Vec<TypeNode>> {
        members.iter().map(|member| self.lower_type(file, member)).collect()
    }

    fn lower_reference(
        &mut self,
        file: FileId,
        name: &EntityName,
        type_arguments: &[ast::TypeNode],
    ) -> LowerResult<TypeNode> {
        let text = name.text();
        let Some(simple) = name.as_simple() else {
            return Ok(unresolved_reference(text, "qualified names are not resolved"));
        };

        let resolver = self.resolver;
        let Some(resolved) = resolver.resolve_type_reference(file, simple) else {
            return self.lower_global(file, text, type_arguments);
        };
        if !type_arguments.is_empty() {
            debug!(reference = %text, "generic instantiation not expanded");
            return Ok(unresolved_reference(text, "generic instantiation"));
        }
        Ok(TypeNode::Reference {
            name: text,
            declaration: self.lower_resolved(resolved)?,
        })
    }

    /// Global types with a schema counterpart, used when no declaration
    /// in the program shadows them.
    fn lower_global(
        &mut self,
        file: FileId,
        name: String,
        type_arguments: &[ast::TypeNode],
    ) -> LowerResult<TypeNode> {
        match (name.as_str(), type_arguments) {
            ("Date", []) => Ok(TypeNode::Primitive(PrimitiveKind::Date)),
            ("Array" | "ReadonlyArray", [element]) => {
                Ok(TypeNode::ArrayOf(Box::new(self.lower_type(file, element)?)))
            }
            _ => {
                trace!(reference = %name, "unresolved type reference");
                Ok(unresolved_reference(name, "unresolved reference"))
            }
        }
    }

    fn lower_resolved(&mut self, resolved: ResolvedType<'_>) -> LowerResult<ResolvedDeclaration> {
        let ResolvedType { file, name, kind } = resolved;
        match kind {
            ResolvedKind::Enum(decl) => {
                Ok(ResolvedDeclaration::Enum(self.resolver.enum_members(decl)))
            }
            ResolvedKind::Interface(decls) => self.with_active(file, name, |this| {
                Ok(ResolvedDeclaration::Object(this.lower_interface(file, &decls)))
            }),
            ResolvedKind::TypeAlias(decl) => self.with_active(file, name, |this| {
                this.lower_type(file, &decl.ty)
                    .map(|body| ResolvedDeclaration::Alias(Box::new(body)))
            }),
        }
    }

    /// Run `lower` with the declaration `name` marked active, or report a
    /// cycle when it already is.
    fn with_active(
        &mut self,
        file: FileId,
        name: String,
        lower: impl FnOnce(&mut Self) -> LowerResult<ResolvedDeclaration>,
    ) -> LowerResult<ResolvedDeclaration> {
        let key = (file, name);
        if self.active.contains(&key) {
            debug!(reference = %key.1, "circular reference");
            return Ok(ResolvedDeclaration::Unresolved(format!(
                "circular reference to {}",
                key.1
            )));
        }
        self.active.push(key);
        let result = lower(self);
        self.active.pop();
        result
    }
}

fn lower_keyword(keyword: KeywordType) -> LowerResult<TypeNode> {
    let kind = match keyword {
        KeywordType::Any => PrimitiveKind::Any,
        KeywordType::Unknown => PrimitiveKind::Unknown,
        KeywordType::String => PrimitiveKind::String,
        KeywordType::Number => PrimitiveKind::Number,
        KeywordType::Boolean => PrimitiveKind::Boolean,
        KeywordType::BigInt => PrimitiveKind::BigInt,
        KeywordType::Symbol => PrimitiveKind::Symbol,
        KeywordType::Void => PrimitiveKind::Void,
        KeywordType::Undefined => PrimitiveKind::Undefined,
        KeywordType::Null => PrimitiveKind::Null,
        KeywordType::Never => PrimitiveKind::Never,
        KeywordType::Object => return Err(UnsupportedTypeShape::new("the object type")),
        KeywordType::This => return Err(UnsupportedTypeShape::new("this types")),
    };
    Ok(TypeNode::Primitive(kind))
}

fn is_null_type(node: &ast::TypeNode) -> bool {
    matches!(node.skip_parentheses().kind, TypeKind::Keyword(KeywordType::Null))
}

fn union_of(mut members: Vec<TypeNode>) -> TypeNode {
    if members.len() == 1
        && let Some(only) = members.pop()
    {
        return only;
    }
    TypeNode::UnionOf(members)
}

fn unresolved_reference(name: String, reason: &str) -> TypeNode {
    TypeNode::Reference {
        name,
        declaration: ResolvedDeclaration::Unresolved(reason.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lower_tests.rs"]
mod lower_tests;
