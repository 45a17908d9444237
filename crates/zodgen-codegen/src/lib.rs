//! Zod schema generation from TypeScript declarations.
//!
//! This crate provides:
//! - `locator` - Finding the interface or type alias at a cursor
//! - `imports` - Resolving or synthesizing the Zod import binding
//! - `jsdoc` - Error messages from property documentation comments
//! - `lower` - Syntax types to the semantic `TypeNode` tree
//! - `compiler` - `TypeNode` to schema expression
//! - `emitter`, `printer`, `render` - Declarations and their text
//! - `convert`, `edits`, `actions` - The entry point and its edit batch

pub mod config;
pub use config::{ConverterConfig, FormatOptions, MAIN_TAG};

pub mod error;
pub use error::{ConvertError, UnsupportedTypeShape};

pub mod type_node;
pub use type_node::{
    DeclarationNode, LiteralValue, PrimitiveKind, PropertyNode, ResolvedDeclaration, TypeNode,
};

pub mod schema;
pub use schema::{SchemaExpr, SchemaProperty};

pub mod jsdoc;
pub use jsdoc::extract_error_message;

pub mod locator;
pub use locator::{DeclarationTarget, LocatorResult, candidates, locate};

pub mod imports;
pub use imports::{ImportBinding, ImportStyle, resolve_binding};

pub mod lower;
pub use lower::Lowering;

pub mod compiler;
pub use compiler::{compile, compile_property};

pub mod emitter;
pub use emitter::{Declaration, emit};

pub mod printer;
pub use printer::SchemaPrinter;

pub mod render;
pub use render::{Rendered, render};

pub mod edits;
pub use edits::{EditKind, TextEdit, apply_edits};

pub mod convert;
pub use convert::{ConvertAction, Conversion, Cursor, convert, convert_file};

pub mod actions;
pub use actions::{CodeAction, code_actions};
