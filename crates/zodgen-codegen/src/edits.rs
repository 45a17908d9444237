//! Text edits and their atomic application.

use serde::Serialize;
use zodgen_common::{LineMap, Range, Span};

use crate::error::ConvertError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditKind {
    Insert,
    Replace,
}

/// One edit of a batch. `span` is in bytes; `range` is the same location
/// in lines and UTF-16 columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub kind: EditKind,
    pub span: Span,
    pub range: Range,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn insert(offset: u32, new_text: String, line_map: &LineMap, source: &str) -> Self {
        let span = Span::at(offset);
        TextEdit {
            kind: EditKind::Insert,
            span,
            range: line_map.span_to_range(span, source),
            new_text,
        }
    }

    #[must_use]
    pub fn replace(span: Span, new_text: String, line_map: &LineMap, source: &str) -> Self {
        TextEdit {
            kind: EditKind::Replace,
            span,
            range: line_map.span_to_range(span, source),
            new_text,
        }
    }
}

/// Apply a batch of edits to `text`.
///
/// Edits are applied back to front, so every span refers to the original
/// text. Inserts at the same offset keep their batch order. Nothing is
/// applied when two edits overlap or a span does not fit the text.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, ConvertError> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.span.start, edit.span.end));

    for edit in &ordered {
        let (start, end) = (edit.span.start as usize, edit.span.end as usize);
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(ConvertError::InvalidEdit {
                start: edit.span.start,
                end: edit.span.end,
            });
        }
    }
    for pair in ordered.windows(2) {
        if pair[0].span.end > pair[1].span.start {
            return Err(ConvertError::OverlappingEdits {
                offset: pair[1].span.start,
            });
        }
    }

    let mut result = text.to_string();
    for edit in ordered.iter().rev() {
        result.replace_range(
            edit.span.start as usize..edit.span.end as usize,
            &edit.new_text,
        );
    }
    Ok(result)
}

#[cfg(test)]
#[path = "tests/edits_tests.rs"]
mod edits_tests;
