//! TypeScript scanner/tokenizer for the zodgen schema generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;

mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner_impl;
pub use scanner_impl::{ScannerDiagnostic, ScannerSnapshot, ScannerState, TokenFlags};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
