//! Finding the declaration to convert.

use zodgen_binder::{FileId, TypeResolver};
use zodgen_common::Span;
use zodgen_parser::{
    ImportDeclaration, InterfaceDeclaration, ModifierFlags, SourceFile, Statement,
    TypeAliasDeclaration, TypeKind,
};

use crate::emitter::schema_name;
use crate::error::ConvertError;

/// A declaration that can be converted into a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationTarget<'a> {
    Interface(&'a InterfaceDeclaration),
    TypeAlias(&'a TypeAliasDeclaration),
}

impl<'a> DeclarationTarget<'a> {
    /// The convertible declaration of `statement`, if any. Inferred-type
    /// aliases produced by an earlier conversion are not convertible.
    #[must_use]
    pub fn from_statement(statement: &'a Statement) -> Option<Self> {
        match statement {
            Statement::Interface(decl) => Some(DeclarationTarget::Interface(decl)),
            Statement::TypeAlias(decl) if !is_inferred_type_alias(decl) => {
                Some(DeclarationTarget::TypeAlias(decl))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            DeclarationTarget::Interface(decl) => &decl.name.text,
            DeclarationTarget::TypeAlias(decl) => &decl.name.text,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            DeclarationTarget::Interface(decl) => decl.span,
            DeclarationTarget::TypeAlias(decl) => decl.span,
        }
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        let modifiers = match self {
            DeclarationTarget::Interface(decl) => decl.modifiers,
            DeclarationTarget::TypeAlias(decl) => decl.modifiers,
        };
        modifiers.contains(ModifierFlags::EXPORT)
    }
}

/// Whether `decl` has the generated form `type X = b.infer<typeof XSchema>`.
#[must_use]
pub fn is_inferred_type_alias(decl: &TypeAliasDeclaration) -> bool {
    let TypeKind::Reference {
        name,
        type_arguments,
    } = &decl.ty.kind
    else {
        return false;
    };
    let [_, infer] = name.parts.as_slice() else {
        return false;
    };
    let [argument] = type_arguments.as_slice() else {
        return false;
    };
    let TypeKind::Query(query) = &argument.kind else {
        return false;
    };
    infer.text == "infer"
        && decl.type_parameters.is_empty()
        && query.as_simple() == Some(schema_name(&decl.name.text).as_str())
}

/// What the locator found: the target declaration and the import context
/// the import resolver needs.
#[derive(Clone, Debug)]
pub struct LocatorResult<'a> {
    pub file: FileId,
    pub source: &'a SourceFile,
    pub target: DeclarationTarget<'a>,
    /// Imports of the schema library, in source order.
    pub library_imports: Vec<&'a ImportDeclaration>,
    /// End offset of the last top-level import declaration.
    pub last_import_end: Option<u32>,
}

/// Find the convertible declaration enclosing `offset` and record the
/// existing imports of `module_specifier`.
pub fn locate<'a, R: TypeResolver + ?Sized>(
    resolver: &'a R,
    file: FileId,
    offset: u32,
    module_specifier: &str,
) -> Result<LocatorResult<'a>, ConvertError> {
    let source = resolver
        .source_file(file)
        .ok_or_else(|| ConvertError::UnknownFile(format!("#{}", file.0)))?;
    let target = resolver
        .declaration_at(file, offset)
        .and_then(DeclarationTarget::from_statement)
        .ok_or(ConvertError::NotFound { offset })?;

    let library_imports = source
        .imports()
        .filter(|import| import.module_specifier.value == module_specifier)
        .collect();
    let last_import_end = source.imports().map(|import| import.span.end).last();

    Ok(LocatorResult {
        file,
        source,
        target,
        library_imports,
        last_import_end,
    })
}

/// All convertible declarations of `source`, in source order.
#[must_use]
pub fn candidates(source: &SourceFile) -> Vec<DeclarationTarget<'_>> {
    source
        .statements
        .iter()
        .filter_map(DeclarationTarget::from_statement)
        .filter(|target| !target.name().is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/locator_tests.rs"]
mod locator_tests;
