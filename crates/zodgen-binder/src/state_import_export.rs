//! Import and export declaration binding.
//!
//! Imports become alias symbols that remember their module specifier and
//! the exported name they refer to, so the resolver can follow them into
//! the target file. Export declarations fill the file's export table.

use crate::state::BinderState;
use zodgen_parser::{ExportClause, ExportDeclaration, ImportDeclaration, NamedImportBindings};

/// Where an exported name comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    /// A top-level binding of the exporting file.
    Local(String),
    /// `export { name } from "module"`.
    ReExport { module: String, name: String },
}

impl BinderState {
    pub(crate) fn bind_import_declaration(&mut self, import: &ImportDeclaration) {
        let Some(clause) = &import.clause else {
            return;
        };
        let module = import.module_specifier.value.as_str();

        if let Some(default) = &clause.default_binding {
            // Default imports resolve the module's `default` export,
            // regardless of the local binding name.
            self.declare_alias(&default.text, module, Some("default"), import.is_type_only);
        }

        match &clause.named_bindings {
            Some(NamedImportBindings::Namespace(name)) => {
                self.declare_alias(&name.text, module, None, import.is_type_only);
            }
            Some(NamedImportBindings::Named(specifiers)) => {
                for specifier in specifiers {
                    self.declare_alias(
                        &specifier.name.text,
                        module,
                        Some(specifier.imported_name()),
                        import.is_type_only || specifier.is_type_only,
                    );
                }
            }
            None => {}
        }
    }

    pub(crate) fn bind_export_declaration(&mut self, export: &ExportDeclaration) {
        let module = export
            .module_specifier
            .as_ref()
            .map(|specifier| specifier.value.clone());

        match (&export.clause, module) {
            (ExportClause::Namespace(None), Some(module)) => self.star_exports.push(module),
            // `export * as ns from "m"` only exports a namespace.
            (ExportClause::Namespace(_), _) => {}
            (ExportClause::Named(specifiers), module) => {
                for specifier in specifiers {
                    let local = specifier.local_name().to_string();
                    let target = match &module {
                        Some(module) => ExportTarget::ReExport {
                            module: module.clone(),
                            name: local,
                        },
                        None => ExportTarget::Local(local),
                    };
                    self.exports.insert(specifier.name.text.clone(), target);
                }
            }
        }
    }
}
