use thiserror::Error;

/// Failures that abort a conversion. No edit is produced when one occurs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no interface or type alias found at offset {offset}")]
    NotFound { offset: u32 },

    #[error("the import of '{module}' has no usable value binding")]
    ImportBinding { module: String },

    #[error("{file} has {count} syntax error(s): {first}")]
    UpstreamParse {
        file: String,
        count: usize,
        first: String,
    },

    #[error("position {line}:{character} is outside the document")]
    InvalidPosition { line: u32, character: u32 },

    #[error("file '{0}' is not part of the program")]
    UnknownFile(String),

    #[error("edits overlap at offset {offset}")]
    OverlappingEdits { offset: u32 },

    #[error("edit {start}..{end} does not fit the document")]
    InvalidEdit { start: u32, end: u32 },
}

/// A type the schema compiler has no mapping for. Recovered by falling
/// back to `any()` for the affected property.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported type shape: {0}")]
pub struct UnsupportedTypeShape(pub String);

impl UnsupportedTypeShape {
    pub fn new(reason: impl Into<String>) -> Self {
        UnsupportedTypeShape(reason.into())
    }
}
