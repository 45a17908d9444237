//! Binder state - the top-level symbol table of one source file.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;
use zodgen_parser::{ModifierFlags, SourceFile, Statement};

use crate::state_import_export::ExportTarget;

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const INTERFACE: u32 = 1 << 0;
    pub const TYPE_ALIAS: u32 = 1 << 1;
    pub const ENUM: u32 = 1 << 2;
    pub const CONST_ENUM: u32 = 1 << 3;
    /// An import binding.
    pub const ALIAS: u32 = 1 << 4;
    /// Declared with `export`.
    pub const EXPORTED: u32 = 1 << 5;
    /// Imported with `import type` or `{ type X }`.
    pub const TYPE_ONLY: u32 = 1 << 6;

    pub const TYPE: u32 = INTERFACE | TYPE_ALIAS | ENUM;
}

/// A top-level name and what declares it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub flags: u32,
    /// Indices into `SourceFile::statements`, in source order. Interfaces
    /// with the same name merge into one symbol.
    pub declarations: Vec<usize>,
    /// Module specifier of an import binding.
    pub import_module: Option<String>,
    /// Exported name an import binding refers to: the imported name,
    /// `"default"` for default imports, `None` for namespace imports.
    pub import_name: Option<String>,
}

impl Symbol {
    fn new(name: &str, flags: u32) -> Self {
        Symbol {
            name: name.to_string(),
            flags,
            declarations: Vec::new(),
            import_module: None,
            import_name: None,
        }
    }

    #[must_use]
    pub fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }

    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.has_flags(symbol_flags::ALIAS)
    }
}

/// Symbols in declaration order.
pub type SymbolTable = IndexMap<String, Symbol>;

#[derive(Debug, Default)]
pub struct BinderState {
    pub(crate) symbols: SymbolTable,
    pub(crate) exports: FxHashMap<String, ExportTarget>,
    /// Module specifiers of `export * from "m"`.
    pub(crate) star_exports: Vec<String>,
}

impl BinderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the top-level declarations of `source`.
    #[must_use]
    pub fn bind_source_file(source: &SourceFile) -> Self {
        let mut binder = BinderState::new();
        for (index, statement) in source.statements.iter().enumerate() {
            binder.bind_statement(index, statement);
        }
        debug!(
            file = %source.file_name,
            symbols = binder.symbols.len(),
            exports = binder.exports.len(),
            "bound source file"
        );
        binder
    }

    fn bind_statement(&mut self, index: usize, statement: &Statement) {
        match statement {
            Statement::Interface(decl) => {
                self.declare(&decl.name.text, symbol_flags::INTERFACE, index, decl.modifiers);
            }
            Statement::TypeAlias(decl) => {
                self.declare(&decl.name.text, symbol_flags::TYPE_ALIAS, index, decl.modifiers);
            }
            Statement::Enum(decl) => {
                let flags = if decl.modifiers.contains(ModifierFlags::CONST) {
                    symbol_flags::ENUM | symbol_flags::CONST_ENUM
                } else {
                    symbol_flags::ENUM
                };
                self.declare(&decl.name.text, flags, index, decl.modifiers);
            }
            Statement::Import(decl) => self.bind_import_declaration(decl),
            Statement::Export(decl) => self.bind_export_declaration(decl),
            Statement::Other(_) => {}
        }
    }

    fn declare(&mut self, name: &str, flags: u32, index: usize, modifiers: ModifierFlags) {
        if name.is_empty() {
            return;
        }
        let symbol = self
            .symbols
            .entry(name.to_string())
            .or_insert_with(|| Symbol::new(name, symbol_flags::NONE));
        symbol.flags |= flags;
        symbol.declarations.push(index);

        if modifiers.contains(ModifierFlags::EXPORT) {
            symbol.flags |= symbol_flags::EXPORTED;
            let target = ExportTarget::Local(name.to_string());
            if modifiers.contains(ModifierFlags::DEFAULT) {
                self.exports.insert("default".to_string(), target);
            } else {
                self.exports.insert(name.to_string(), target);
            }
        }
    }

    pub(crate) fn declare_alias(
        &mut self,
        name: &str,
        module: &str,
        import_name: Option<&str>,
        is_type_only: bool,
    ) {
        if name.is_empty() {
            return;
        }
        let mut flags = symbol_flags::ALIAS;
        if is_type_only {
            flags |= symbol_flags::TYPE_ONLY;
        }
        let mut symbol = Symbol::new(name, flags);
        symbol.import_module = Some(module.to_string());
        symbol.import_name = import_name.map(str::to_string);
        // An import never merges with a local declaration; the first binding wins.
        self.symbols.entry(name.to_string()).or_insert(symbol);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[must_use]
    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    #[must_use]
    pub fn get_export(&self, name: &str) -> Option<&ExportTarget> {
        self.exports.get(name)
    }

    #[must_use]
    pub fn star_exports(&self) -> &[String] {
        &self.star_exports
    }

    /// Names of the type declarations (interfaces, aliases, enums) in
    /// declaration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.symbols
            .values()
            .filter(|symbol| symbol.has_flags(symbol_flags::TYPE))
            .map(|symbol| symbol.name.as_str())
    }
}
