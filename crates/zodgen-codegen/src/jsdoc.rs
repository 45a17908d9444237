//! Error messages from property documentation comments.
//!
//! ```typescript
//! interface SignUp {
//!   /**
//!    * Your email
//!    * @error Please enter a valid email
//!    */
//!   email: string;
//! }
//! ```
//!
//! With the default precedence `["error"]` the message is the `@error`
//! text; with `<main>` in the list the untagged body competes as well.

use crate::config::{ConverterConfig, MAIN_TAG};
use zodgen_common::JsDoc;

/// Pick the error message for a property from its JSDoc comments.
///
/// Tags are ranked by their position in the configured precedence; among
/// equally ranked tags source order decides. The first candidate with
/// non-empty text wins.
#[must_use]
pub fn extract_error_message(docs: &[JsDoc], config: &ConverterConfig) -> Option<String> {
    if !config.render_error_messages || docs.is_empty() {
        return None;
    }
    let precedence = config.error_tags();

    let mut candidates: Vec<(usize, &str)> = Vec::new();
    for doc in docs {
        for tag in &doc.tags {
            if let Some(rank) = precedence.iter().position(|name| *name == tag.name) {
                candidates.push((rank, tag.comment.as_deref().unwrap_or("")));
            }
        }
        if let Some(rank) = precedence.iter().position(|name| *name == MAIN_TAG) {
            candidates.push((rank, doc.comment.as_deref().unwrap_or("")));
        }
    }

    // Stable sort keeps source order within a rank.
    candidates.sort_by_key(|(rank, _)| *rank);
    candidates
        .into_iter()
        .map(|(_, text)| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "tests/jsdoc_tests.rs"]
mod jsdoc_tests;
