//! Parser state - token handling, look-ahead and diagnostics.

use crate::ast::{Identifier, SourceFile, StringLiteral};
use tracing::trace;
use zodgen_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use zodgen_common::{Diagnostic, JsDoc, Span};
use zodgen_scanner::{ScannerState, SyntaxKind, token_is_identifier, token_to_text};

/// Recursive-descent parser over a [`ScannerState`].
///
/// The parser keeps the current token kind alongside the scanner so that
/// look-ahead can save and restore both together.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End of the last consumed token; node spans end here.
    pub(crate) prev_token_end: u32,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Current nesting depth of type syntax.
    pub(crate) type_depth: u32,
    /// Set while parsing the `extends` clause of a conditional type, where a
    /// nested conditional must be parenthesized.
    pub(crate) disallow_conditional_types: bool,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> Self {
        ParserState {
            scanner: ScannerState::new(source_text),
            file_name,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            diagnostics: Vec::new(),
            type_depth: 0,
            disallow_conditional_types: false,
        }
    }

    /// Parse the whole file.
    pub fn parse_source_file(&mut self) -> SourceFile {
        trace!(file = %self.file_name, "parse_source_file");
        self.next_token();

        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement());
        }

        for diag in self.scanner.take_diagnostics() {
            self.diagnostics.push(Diagnostic::error(
                self.file_name.clone(),
                diag.start,
                diag.length,
                diag.message.to_string(),
                diag.code,
            ));
        }
        self.diagnostics.sort_by_key(|d| d.start);

        SourceFile {
            file_name: self.file_name.clone(),
            text: self.scanner.source_text().to_string(),
            statements,
            diagnostics: self.diagnostics.clone(),
        }
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    pub(crate) fn token_value(&self) -> &str {
        self.scanner.get_token_value()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_token_end.max(start))
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, reporting "'x' expected." when it is missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current(
            &format_message(diagnostic_messages::TOKEN_EXPECTED, &[token_to_text(kind)]),
            diagnostic_codes::TOKEN_EXPECTED,
        );
        false
    }

    /// Statements may end with `;`, a line break, `}` or end of file.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_expected(SyntaxKind::SemicolonToken);
        }
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn is_identifier(&self) -> bool {
        token_is_identifier(self.current_token)
    }

    /// Parse a binding or type name. Reports and returns an empty identifier
    /// when the current token cannot name anything.
    pub(crate) fn parse_identifier(&mut self) -> Identifier {
        if self.is_identifier() {
            return self.take_identifier();
        }
        self.error_at_current(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        Identifier {
            span: Span::at(self.token_pos()),
            text: String::new(),
        }
    }

    /// Consume the current token as an identifier, keyword or not.
    pub(crate) fn take_identifier(&mut self) -> Identifier {
        let ident = Identifier {
            span: Span::new(self.token_pos(), self.token_end()),
            text: self.token_value().to_string(),
        };
        self.next_token();
        ident
    }

    pub(crate) fn parse_string_literal(&mut self) -> StringLiteral {
        if self.is_token(SyntaxKind::StringLiteral) {
            let literal = StringLiteral {
                span: Span::new(self.token_pos(), self.token_end()),
                value: self.token_value().to_string(),
            };
            self.next_token();
            return literal;
        }
        self.error_at_current(
            diagnostic_messages::STRING_LITERAL_EXPECTED,
            diagnostic_codes::STRING_LITERAL_EXPECTED,
        );
        StringLiteral {
            span: Span::at(self.token_pos()),
            value: String::new(),
        }
    }

    /// JSDoc comments in the trivia before the current token.
    pub(crate) fn leading_jsdoc(&self) -> Vec<JsDoc> {
        let source = self.scanner.source_text();
        self.scanner
            .get_preceding_jsdoc()
            .iter()
            .map(|range| JsDoc::from_range(range, source))
            .collect()
    }

    // =========================================================================
    // Look-ahead
    // =========================================================================

    /// Run `f` and rewind the parser to where it was, discarding anything
    /// reported meanwhile.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let diagnostic_count = self.diagnostics.len();

        let result = f(self);

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        self.diagnostics.truncate(diagnostic_count);
        result
    }

    pub(crate) fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    pub(crate) fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier() && !p.has_preceding_line_break()
        })
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end() - start;
        self.error_at(start, length, message, code);
    }

    /// Report an error unless one was already reported at the same position.
    pub(crate) fn error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self.diagnostics.last().is_some_and(|last| last.start == start) {
            return;
        }
        trace!(start, code, message, "parse error");
        self.diagnostics.push(Diagnostic::error(
            self.file_name.clone(),
            start,
            length,
            message.to_string(),
            code,
        ));
    }
}
