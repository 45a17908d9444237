//! Comment and JSDoc utilities.
//!
//! Comments are not part of the AST. The scanner records the ranges of the
//! `/** ... */` comments it skips in leading trivia, and this module turns
//! their text into a [`JsDoc`]: the untagged main body plus `@tag` entries.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

/// Check if comment text is a JSDoc comment (`/**` but not `/***` or `/**/`).
pub fn is_jsdoc_text(text: &str) -> bool {
    text.starts_with("/**") && !text.starts_with("/***") && text != "/**/"
}

/// Check if a comment is a JSDoc comment.
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    is_jsdoc_text(comment.get_text(source))
}

/// Extract the content lines of a JSDoc comment, without the delimiters and
/// the leading `*` of each line.
pub fn get_jsdoc_lines(text: &str) -> Vec<&str> {
    let inner = text
        .strip_prefix("/**")
        .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
        .unwrap_or(text);

    inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => trimmed,
            }
        })
        .collect()
}

/// A `@name text` annotation inside a JSDoc comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDocTag {
    pub name: String,
    /// Tag text, trimmed. `None` when the tag carries no text.
    pub comment: Option<String>,
}

/// A parsed JSDoc comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDoc {
    /// The untagged main body, trimmed. `None` when empty.
    pub comment: Option<String>,
    pub tags: Vec<JsDocTag>,
}

impl JsDoc {
    /// Parse the full text of a `/** ... */` comment.
    ///
    /// A tag starts only at the beginning of a line (after the optional
    /// leading `*`); an `@` in the middle of prose stays part of the text.
    /// Tag text continues over following lines until the next tag.
    pub fn parse(text: &str) -> JsDoc {
        let mut body: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, Vec<&str>)> = Vec::new();

        for line in get_jsdoc_lines(text) {
            let trimmed = line.trim();
            if let Some((name, rest)) = split_tag(trimmed) {
                tags.push((name.to_string(), vec![rest]));
            } else if let Some((_, lines)) = tags.last_mut() {
                lines.push(line);
            } else {
                body.push(line);
            }
        }

        JsDoc {
            comment: join_trimmed(&body),
            tags: tags
                .into_iter()
                .map(|(name, lines)| JsDocTag {
                    name,
                    comment: join_trimmed(&lines),
                })
                .collect(),
        }
    }

    /// Parse the JSDoc comment covered by `range`.
    pub fn from_range(range: &CommentRange, source: &str) -> JsDoc {
        JsDoc::parse(range.get_text(source))
    }

    /// Find the first tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&JsDocTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}

fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('@')?;
    let name_len = rest
        .char_indices()
        .find(|(_, ch)| !(ch.is_alphanumeric() || *ch == '_' || *ch == '-'))
        .map_or(rest.len(), |(i, _)| i);
    if name_len == 0 {
        return None;
    }
    Some((&rest[..name_len], &rest[name_len..]))
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "tests/comments_tests.rs"]
mod comments_tests;
