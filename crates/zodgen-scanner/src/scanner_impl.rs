//! Scanner implementation.
//!
//! `ScannerState` walks a source string and produces one token per call to
//! [`ScannerState::scan`]. Trivia (whitespace, line breaks, comments) is
//! always skipped; the ranges of `/** ... */` comments seen in the trivia
//! before the current token are kept so the parser can attach JSDoc to the
//! declaration or property that follows.
//!
//! The scanner works on byte offsets. Non-ASCII text is decoded only where an
//! identifier or whitespace check needs the full character.

use bitflags::bitflags;
use memchr::memmem;

use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::{SyntaxKind, text_to_keyword};
use zodgen_common::CommentRange;
use zodgen_common::comments::is_jsdoc_text;
use zodgen_common::diagnostics::{diagnostic_codes, diagnostic_messages};

bitflags! {
    /// Facts about the current token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u32 {
        /// A line break appears in the trivia before this token.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// String, template or comment ran into the end of its line or file.
        const UNTERMINATED = 1 << 1;
        /// The preceding trivia contains a JSDoc comment.
        const PRECEDING_JSDOC_COMMENT = 1 << 2;
        /// Numeric literal written with a `0x`/`0o`/`0b` prefix.
        const NON_DECIMAL_NUMBER = 1 << 3;
    }
}

/// A diagnostic reported while scanning.
///
/// The scanner does not know its file name; the parser turns these into
/// [`zodgen_common::Diagnostic`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    jsdoc_comments: Vec<CommentRange>,
    diagnostic_count: usize,
}

pub struct ScannerState {
    source: String,
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    jsdoc_comments: Vec<CommentRange>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    #[must_use]
    pub fn new(text: String) -> Self {
        let mut scanner = ScannerState {
            source: text,
            pos: 0,
            full_start_pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            jsdoc_comments: Vec::new(),
            diagnostics: Vec::new(),
        };
        scanner.skip_shebang();
        scanner
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, after leading trivia.
    #[must_use]
    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    #[must_use]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Start of the current token including its leading trivia.
    #[must_use]
    pub fn get_token_full_start(&self) -> u32 {
        self.full_start_pos as u32
    }

    /// Cooked value of the current token: identifier text, unescaped string
    /// contents, or the normalized digits of a numeric literal.
    #[must_use]
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn get_token_text(&self) -> &str {
        self.source
            .get(self.token_start..self.pos)
            .unwrap_or("")
    }

    #[must_use]
    pub fn get_token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[must_use]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    /// JSDoc comments found in the trivia directly before the current token,
    /// in source order.
    #[must_use]
    pub fn get_preceding_jsdoc(&self) -> &[CommentRange] {
        &self.jsdoc_comments
    }

    /// Diagnostics reported so far, draining the buffer.
    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop diagnostics starting inside `[start, end)`.
    pub fn discard_diagnostics_in(&mut self, start: u32, end: u32) {
        self.diagnostics
            .retain(|diag| diag.start < start || diag.start >= end);
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start_pos: self.full_start_pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            jsdoc_comments: self.jsdoc_comments.clone(),
            diagnostic_count: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start_pos = snapshot.full_start_pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.jsdoc_comments = snapshot.jsdoc_comments;
        self.diagnostics.truncate(snapshot.diagnostic_count);
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token, skipping leading trivia.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start_pos = self.pos;
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();
        self.jsdoc_comments.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(&byte) = self.source.as_bytes().get(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match byte {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'@' => self.single(SyntaxKind::AtToken),
            b'#' => self.single(SyntaxKind::HashToken),
            // `<` and `>` are never merged with what follows; type argument
            // lists like `Map<K, Array<V>>` need them one at a time.
            b'<' => self.single(SyntaxKind::LessThanToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b'.' => self.scan_dot(),
            b'=' => {
                if self.peek(1) == Some(b'>') {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                } else if self.peek(1) == Some(b'=') {
                    self.pos += if self.peek(2) == Some(b'=') { 3 } else { 2 };
                    SyntaxKind::OtherPunctuation
                } else {
                    self.single(SyntaxKind::EqualsToken)
                }
            }
            b'!' => {
                if self.peek(1) == Some(b'=') {
                    self.pos += if self.peek(2) == Some(b'=') { 3 } else { 2 };
                    SyntaxKind::OtherPunctuation
                } else {
                    self.single(SyntaxKind::ExclamationToken)
                }
            }
            b'?' => match self.peek(1) {
                Some(b'?') => {
                    self.pos += if self.peek(2) == Some(b'=') { 3 } else { 2 };
                    SyntaxKind::OtherPunctuation
                }
                Some(b'.') if !self.peek(2).is_some_and(|b| b.is_ascii_digit()) => {
                    self.pos += 2;
                    SyntaxKind::OtherPunctuation
                }
                _ => self.single(SyntaxKind::QuestionToken),
            },
            b'&' => self.scan_doubled(b'&', SyntaxKind::AmpersandToken),
            b'|' => self.scan_doubled(b'|', SyntaxKind::BarToken),
            b'+' => self.scan_doubled(b'+', SyntaxKind::PlusToken),
            b'-' => self.scan_doubled(b'-', SyntaxKind::MinusToken),
            b'*' => self.scan_doubled(b'*', SyntaxKind::AsteriskToken),
            b'/' => {
                if self.peek(1) == Some(b'=') {
                    self.pos += 2;
                    SyntaxKind::OtherPunctuation
                } else {
                    self.single(SyntaxKind::SlashToken)
                }
            }
            b'%' | b'^' | b'~' => {
                self.pos += 1;
                if self.peek(0) == Some(b'=') {
                    self.pos += 1;
                }
                SyntaxKind::OtherPunctuation
            }
            b'"' | b'\'' => self.scan_string(byte),
            b'`' => self.scan_template(),
            b'0'..=b'9' => self.scan_number(),
            _ => {
                let ch = self.current_char();
                if ch.is_some_and(is_identifier_start) {
                    self.scan_identifier()
                } else {
                    let len = ch.map_or(1, char::len_utf8);
                    self.error_at(
                        self.pos,
                        len,
                        diagnostic_messages::INVALID_CHARACTER,
                        diagnostic_codes::INVALID_CHARACTER,
                    );
                    self.pos += len;
                    SyntaxKind::Unknown
                }
            }
        };

        self.token
    }

    /// Scan forward until the next token of `kind` or end of file.
    pub fn scan_until(&mut self, kind: SyntaxKind) -> SyntaxKind {
        while self.token != kind && self.token != SyntaxKind::EndOfFileToken {
            self.scan();
        }
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `&`, `|`, `+`, `-`, `*`: the single character is a token the parser
    /// cares about; doubled or compound forms are not.
    fn scan_doubled(&mut self, ch: u8, single: SyntaxKind) -> SyntaxKind {
        match self.peek(1) {
            Some(next) if next == ch => {
                self.pos += 2;
                if self.peek(0) == Some(b'=') {
                    self.pos += 1;
                }
                SyntaxKind::OtherPunctuation
            }
            Some(b'=') => {
                self.pos += 2;
                SyntaxKind::OtherPunctuation
            }
            _ => self.single(single),
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            return self.scan_number();
        }
        if self.peek(1) == Some(b'.') && self.peek(2) == Some(b'.') {
            self.pos += 3;
            return SyntaxKind::DotDotDotToken;
        }
        self.single(SyntaxKind::DotToken)
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_shebang(&mut self) {
        if self.source.starts_with("#!") {
            self.pos = self.find_line_end(0);
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(&byte) = self.source.as_bytes().get(self.pos) {
            match byte {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => {
                    self.pos = self.find_line_end(self.pos);
                }
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment(),
                _ if byte >= 0x80 => {
                    let Some(ch) = self.current_char() else {
                        return;
                    };
                    if is_line_break(ch) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    } else if !is_white_space_single_line(ch) {
                        return;
                    }
                    self.pos += ch.len_utf8();
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let body_start = start + 2;
        let len = self.source.len();
        let end = match memmem::find(&self.source.as_bytes()[body_start..], b"*/") {
            Some(offset) => body_start + offset + 2,
            None => {
                self.error_at(
                    len,
                    0,
                    diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                );
                self.token_flags |= TokenFlags::UNTERMINATED;
                len
            }
        };

        let text = &self.source[start..end];
        if text.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        if is_jsdoc_text(text) {
            self.token_flags |= TokenFlags::PRECEDING_JSDOC_COMMENT;
            self.jsdoc_comments
                .push(CommentRange::new(start as u32, end as u32, true));
        }
        self.pos = end;
    }

    fn find_line_end(&self, from: usize) -> usize {
        let bytes = self.source.as_bytes();
        memchr::memchr2(b'\n', b'\r', &bytes[from..]).map_or(bytes.len(), |i| from + i)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let text = &self.source[start..self.pos];
        self.token_value.push_str(text);
        text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    // =========================================================================
    // Strings and templates
    // =========================================================================

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();

        loop {
            let Some(ch) = self.current_char() else {
                self.report_unterminated_string(start);
                break;
            };
            if ch as u32 == u32::from(quote) {
                self.pos += 1;
                break;
            }
            if ch == '\n' || ch == '\r' {
                self.report_unterminated_string(start);
                break;
            }
            if ch == '\\' {
                self.scan_escape(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }

        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn report_unterminated_string(&mut self, start: usize) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error_at(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan a template literal. A template without substitutions is cooked
    /// like a string; one with `${...}` parts is scanned whole and its value
    /// is the raw text between the backticks.
    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut cooked = String::new();
        let mut has_substitution = false;
        let mut terminated = false;

        while let Some(ch) = self.current_char() {
            match ch {
                '`' => {
                    self.pos += 1;
                    terminated = true;
                    break;
                }
                '\\' => self.scan_escape(&mut cooked),
                '$' if self.peek(1) == Some(b'{') => {
                    has_substitution = true;
                    self.pos += 2;
                    if !self.skip_template_substitution() {
                        break;
                    }
                }
                _ => {
                    cooked.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }

        if !terminated {
            self.token_flags |= TokenFlags::UNTERMINATED;
            self.error_at(
                start,
                self.pos - start,
                diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
            );
        }

        if has_substitution {
            let raw_end = if terminated { self.pos - 1 } else { self.pos };
            self.token_value = self.source[start + 1..raw_end].to_string();
            SyntaxKind::TemplateLiteral
        } else {
            self.token_value = cooked;
            SyntaxKind::NoSubstitutionTemplateLiteral
        }
    }

    /// Skip the body of a `${ ... }` substitution, including nested braces,
    /// strings and templates. Returns `false` at end of file.
    fn skip_template_substitution(&mut self) -> bool {
        let mut depth = 1u32;
        while let Some(&byte) = self.source.as_bytes().get(self.pos) {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return true;
                    }
                }
                b'"' | b'\'' | b'`' => {
                    let saved_value = std::mem::take(&mut self.token_value);
                    if byte == b'`' {
                        self.scan_template();
                    } else {
                        self.scan_string(byte);
                    }
                    self.token_value = saved_value;
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }
        false
    }

    /// Scan an escape sequence starting at the backslash, appending the
    /// cooked character(s) to `out`.
    fn scan_escape(&mut self, out: &mut String) {
        self.pos += 1;
        let Some(ch) = self.current_char() else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.peek(0).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => match self.scan_hex_digits(2, 2) {
                Some(code) => push_code_point(out, code),
                None => out.push('x'),
            },
            'u' => {
                if self.peek(0) == Some(b'{') {
                    let save = self.pos;
                    self.pos += 1;
                    match self.scan_hex_digits(1, 6) {
                        Some(code) if self.peek(0) == Some(b'}') => {
                            self.pos += 1;
                            push_code_point(out, code);
                        }
                        _ => {
                            self.pos = save;
                            out.push('u');
                        }
                    }
                } else {
                    match self.scan_hex_digits(4, 4) {
                        Some(code) => push_code_point(out, code),
                        None => out.push('u'),
                    }
                }
            }
            // Line continuation.
            '\r' => {
                if self.peek(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        let mut end = start;
        while end < bytes.len() && end - start < max && bytes[end].is_ascii_hexdigit() {
            end += 1;
        }
        if end - start < min {
            return None;
        }
        let value = u32::from_str_radix(&self.source[start..end], 16).ok()?;
        self.pos = end;
        Some(value)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.peek(0) == Some(b'0') {
            let radix = match self.peek(1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'o' | b'O') => Some(8),
                Some(b'b' | b'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 2;
                let digits = self.take_digits(|b| (b as char).is_digit(radix));
                self.token_flags |= TokenFlags::NON_DECIMAL_NUMBER;
                if self.peek(0) == Some(b'n') {
                    self.pos += 1;
                    self.token_value = self.source[start..self.pos - 1].replace('_', "");
                    return SyntaxKind::BigIntLiteral;
                }
                self.token_value = u128::from_str_radix(&digits, radix)
                    .map_or_else(|_| self.source[start..self.pos].to_string(), |v| v.to_string());
                return SyntaxKind::NumericLiteral;
            }
        }

        let mut digits = self.take_digits(|b| b.is_ascii_digit());
        let mut is_decimal_form = false;

        if self.peek(0) == Some(b'n') && !digits.is_empty() {
            self.pos += 1;
            self.token_value = digits;
            return SyntaxKind::BigIntLiteral;
        }

        if self.peek(0) == Some(b'.') {
            is_decimal_form = true;
            self.pos += 1;
            digits.push('.');
            digits.push_str(&self.take_digits(|b| b.is_ascii_digit()));
        }

        if matches!(self.peek(0), Some(b'e' | b'E')) {
            let sign_len = usize::from(matches!(self.peek(1), Some(b'+' | b'-')));
            if self
                .peek(1 + sign_len)
                .is_some_and(|b| b.is_ascii_digit())
            {
                is_decimal_form = true;
                digits.push('e');
                if sign_len == 1 {
                    digits.push(self.source.as_bytes()[self.pos + 1] as char);
                }
                self.pos += 1 + sign_len;
                digits.push_str(&self.take_digits(|b| b.is_ascii_digit()));
            }
        }

        self.token_value = if is_decimal_form {
            normalize_decimal(&digits)
        } else {
            digits
        };
        SyntaxKind::NumericLiteral
    }

    /// Consume digits accepted by `is_digit` plus `_` separators, returning
    /// the digits without separators.
    fn take_digits(&mut self, is_digit: impl Fn(u8) -> bool) -> String {
        let mut out = String::new();
        while let Some(byte) = self.peek(0) {
            if is_digit(byte) {
                out.push(byte as char);
            } else if byte != b'_' {
                break;
            }
            self.pos += 1;
        }
        out
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    fn error_at(&mut self, start: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            start: start as u32,
            length: length as u32,
            message,
            code,
        });
    }
}

fn push_code_point(out: &mut String, code: u32) {
    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
}

/// Normalize a decimal literal with a fraction or exponent the way
/// JavaScript prints the number (`1.50` -> `1.5`, `1e3` -> `1000`).
/// Values Rust would print differently from JavaScript are kept as written.
fn normalize_decimal(digits: &str) -> String {
    let text = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && (value == 0.0 || (1e-6..1e21).contains(&value)) => {
            value.to_string()
        }
        _ => text,
    }
}
