//! Common types and utilities for the zodgen schema generator.
//!
//! This crate provides foundational types used across all zodgen crates:
//! - Source spans (`Span`, `Spanned`)
//! - Position/Range types and the `LineMap` for offset <-> line/column conversion
//! - Common enums (`NewLineKind`)
//! - Comment and JSDoc parsing utilities
//! - Diagnostics reported by the scanner and parser
//! - Recursion and size limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::NewLineKind;

// Comment parsing utilities
pub mod comments;
pub use comments::{CommentRange, JsDoc, JsDocTag};

// Scanner/parser diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
