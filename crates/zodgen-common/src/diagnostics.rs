//! Diagnostic types and message lookup for the scanner and parser.
//!
//! Codes and message templates follow TypeScript's numbering so that
//! reports read the same as `tsc` output for the same mistake.

use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A scanner or parser diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}): error TS{}: {}",
            self.file, self.start, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const PROPERTY_OR_SIGNATURE_EXPECTED: u32 = 1131;
    pub const ENUM_MEMBER_EXPECTED: u32 = 1132;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const STRING_LITERAL_EXPECTED: u32 = 1141;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const INVALID_CHARACTER: u32 = 1127;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const TOKEN_EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const PROPERTY_OR_SIGNATURE_EXPECTED: &str = "Property or signature expected.";
    pub const ENUM_MEMBER_EXPECTED: &str = "Enum member expected.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const STRING_LITERAL_EXPECTED: &str = "String literal expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
}
