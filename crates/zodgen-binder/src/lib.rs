//! Binder for the zodgen schema generator.
//!
//! This crate provides:
//! - `BinderState` - Top-level symbol table of one source file
//! - `Program` - A set of parsed and bound files
//! - `TypeResolver` - Type-reference resolution across the files of a program
//! - `module_resolver` - Relative module specifier resolution

mod state;
pub use state::{BinderState, Symbol, SymbolTable, symbol_flags};

mod state_import_export;
pub use state_import_export::ExportTarget;

pub mod module_resolver;

mod program;
pub use program::{BoundFile, FileId, Program};

mod resolver;
pub use resolver::{ResolvedKind, ResolvedType, TypeResolver};

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod binder_tests;
