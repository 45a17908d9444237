//! Shared enums used by more than one crate.

use serde::{Deserialize, Serialize};

/// Newline sequence used when printing generated code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewLineKind {
    #[default]
    #[serde(rename = "lf", alias = "LF", alias = "\n")]
    LineFeed,
    #[serde(rename = "crlf", alias = "CRLF", alias = "\r\n")]
    CarriageReturnLineFeed,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }

    /// Guess the newline style of existing text from its first line break.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match memchr::memchr(b'\n', text.as_bytes()) {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => {
                NewLineKind::CarriageReturnLineFeed
            }
            _ => NewLineKind::LineFeed,
        }
    }
}
