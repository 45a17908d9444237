//! Type-reference resolution over a [`Program`].
//!
//! [`TypeResolver`] is the seam between the schema generator and whatever
//! holds the parsed sources. [`Program`] answers it from its bound files,
//! following named and default imports of relative modules through
//! re-exports.

use tracing::{debug, trace};
use zodgen_common::limits::MAX_IMPORT_HOPS;
use zodgen_common::Spanned;
use zodgen_parser::{
    EnumDeclaration, InterfaceDeclaration, SourceFile, Statement, TypeAliasDeclaration,
};

use crate::program::{FileId, Program};
use crate::state::symbol_flags;
use crate::state_import_export::ExportTarget;

/// The declaration(s) a type name resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedKind<'a> {
    /// All merged declarations of an interface, in source order.
    Interface(Vec<&'a InterfaceDeclaration>),
    TypeAlias(&'a TypeAliasDeclaration),
    Enum(&'a EnumDeclaration),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    /// The file that declares the type.
    pub file: FileId,
    /// The declared name, which differs from the referenced name for
    /// renamed imports.
    pub name: String,
    pub kind: ResolvedKind<'a>,
}

pub trait TypeResolver {
    fn source_file(&self, file: FileId) -> Option<&SourceFile>;

    /// The first top-level interface or type alias whose span contains
    /// `offset`, the end offset included.
    fn declaration_at(&self, file: FileId, offset: u32) -> Option<&Statement> {
        self.source_file(file)?.statements.iter().find(|statement| {
            matches!(statement, Statement::Interface(_) | Statement::TypeAlias(_))
                && statement.span().contains_inclusive(offset)
        })
    }

    /// Resolve the type named `name` as seen from the top level of `file`.
    fn resolve_type_reference(&self, file: FileId, name: &str) -> Option<ResolvedType<'_>>;

    /// Member names of an enum, in declaration order.
    fn enum_members(&self, declaration: &EnumDeclaration) -> Vec<String> {
        declaration
            .members
            .iter()
            .filter_map(|member| member.name.text())
            .map(str::to_string)
            .collect()
    }
}

impl TypeResolver for Program {
    fn source_file(&self, file: FileId) -> Option<&SourceFile> {
        self.get_file(file).map(|bound| &bound.source)
    }

    fn resolve_type_reference(&self, file: FileId, name: &str) -> Option<ResolvedType<'_>> {
        let resolved = self.resolve_local(file, name, 0);
        if resolved.is_none() {
            trace!(file = file.0, name, "type reference did not resolve");
        }
        resolved
    }
}

impl Program {
    fn resolve_local(&self, file: FileId, name: &str, hops: u32) -> Option<ResolvedType<'_>> {
        let bound = self.get_file(file)?;
        let symbol = bound.binder.get_symbol(name)?;

        if symbol.is_alias() {
            // Namespace imports carry no export name; qualified access
            // through them is not followed.
            let import_name = symbol.import_name.as_deref()?;
            let module = symbol.import_module.as_deref()?;
            let target = self.resolve_module(file, module)?;
            return self.resolve_export(target, import_name, hops + 1);
        }

        let statements = &bound.source.statements;
        let mut declarations = symbol
            .declarations
            .iter()
            .filter_map(|&index| statements.get(index));

        let kind = if symbol.has_flags(symbol_flags::INTERFACE) {
            let interfaces: Vec<_> = declarations
                .filter_map(|statement| match statement {
                    Statement::Interface(decl) => Some(decl),
                    _ => None,
                })
                .collect();
            ResolvedKind::Interface(interfaces)
        } else if symbol.has_flags(symbol_flags::TYPE_ALIAS) {
            ResolvedKind::TypeAlias(declarations.find_map(|statement| match statement {
                Statement::TypeAlias(decl) => Some(decl),
                _ => None,
            })?)
        } else if symbol.has_flags(symbol_flags::ENUM) {
            ResolvedKind::Enum(declarations.find_map(|statement| match statement {
                Statement::Enum(decl) => Some(decl),
                _ => None,
            })?)
        } else {
            return None;
        };

        Some(ResolvedType {
            file,
            name: symbol.name.clone(),
            kind,
        })
    }

    fn resolve_export(&self, file: FileId, name: &str, hops: u32) -> Option<ResolvedType<'_>> {
        if hops > MAX_IMPORT_HOPS {
            debug!(file = file.0, name, "import chain too long");
            return None;
        }
        let binder = &self.get_file(file)?.binder;

        match binder.get_export(name) {
            Some(ExportTarget::Local(local)) => self.resolve_local(file, local, hops + 1),
            Some(ExportTarget::ReExport { module, name }) => {
                let target = self.resolve_module(file, module)?;
                self.resolve_export(target, name, hops + 1)
            }
            // `export *` never forwards a default export.
            None if name == "default" => None,
            None => binder.star_exports().iter().find_map(|module| {
                let target = self.resolve_module(file, module)?;
                self.resolve_export(target, name, hops + 1)
            }),
        }
    }
}
