//! Converter configuration.
//!
//! Every option is optional in JSON; missing keys take the defaults below.
//! Boolean options also accept their string spellings (`"true"`, `"off"`,
//! ...) and the tag precedence accepts a comma-separated string.

use serde::{Deserialize, Deserializer, Serialize};
use zodgen_common::NewLineKind;

/// Tag name that stands for the untagged main body of a JSDoc comment.
pub const MAIN_TAG: &str = "<main>";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterConfig {
    /// Local name bound by a synthesized import.
    pub default_binding_name: String,
    /// Synthesize `import * as z` rather than `import z`.
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub use_namespace_import: bool,
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub render_error_messages: bool,
    /// Only the untagged body of a comment supplies error messages.
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub use_main_content_as_error_message: bool,
    #[serde(deserialize_with = "deserialize_tag_list")]
    pub error_tag_precedence: Vec<String>,
    /// Module specifier of the schema library.
    pub module_specifier: String,
    pub format: FormatOptions,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            default_binding_name: "z".to_string(),
            use_namespace_import: true,
            render_error_messages: true,
            use_main_content_as_error_message: false,
            error_tag_precedence: vec!["error".to_string()],
            module_specifier: "zod".to_string(),
            format: FormatOptions::default(),
        }
    }
}

impl ConverterConfig {
    /// Tag names consulted for error messages, in precedence order.
    #[must_use]
    pub fn error_tags(&self) -> Vec<&str> {
        if self.use_main_content_as_error_message {
            vec![MAIN_TAG]
        } else {
            self.error_tag_precedence.iter().map(String::as_str).collect()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub indent_width: u32,
    pub max_line_width: u32,
    pub new_line: NewLineKind,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent_width: 2,
            max_line_width: 100,
            new_line: NewLineKind::LineFeed,
        }
    }
}

/// Accept `true`/`false` or a string spelling of either.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Accept a list of tag names or a single comma-separated string.
fn deserialize_tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        String(String),
    }

    let tags = match ListOrString::deserialize(deserializer)? {
        ListOrString::List(tags) => tags,
        ListOrString::String(s) => s.split(',').map(str::to_string).collect(),
    };
    Ok(tags
        .into_iter()
        .map(|tag| tag.trim().trim_start_matches('@').to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}
