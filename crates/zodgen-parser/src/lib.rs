//! TypeScript parser for the zodgen schema generator.
//!
//! This crate provides:
//! - `ast` - Declaration-level syntax tree (imports, interfaces, type aliases, enums, types)
//! - `ParserState` - Recursive-descent parser producing a `SourceFile`

pub mod ast;
pub use ast::*;

pub mod parser;
pub use parser::ParserState;

/// Parse `source_text` as the file `file_name`.
#[must_use]
pub fn parse_source(file_name: &str, source_text: &str) -> SourceFile {
    let mut parser = ParserState::new(file_name.to_string(), source_text.to_string());
    parser.parse_source_file()
}
