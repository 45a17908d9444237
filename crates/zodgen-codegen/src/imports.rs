//! Schema-library import resolution.
//!
//! Generated code refers to Zod through one local binding. An existing
//! import of the library supplies it unchanged:
//!
//! ```typescript
//! import * as z from "zod";     // namespace
//! import z from "zod";          // default
//! import { z as v } from "zod"; // named
//! ```
//!
//! Without one, a new import binding `config.defaultBindingName` is
//! queued for insertion on the line after the last existing import.

use serde::Serialize;
use zodgen_common::LineMap;
use zodgen_parser::{ImportDeclaration, NamedImportBindings, SourceFile};

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::locator::LocatorResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportStyle {
    Namespace,
    Default,
    Named,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    pub binding_name: String,
    pub style: ImportStyle,
    pub already_present: bool,
    /// Where a missing import is inserted.
    pub insertion_point: u32,
}

impl ImportBinding {
    /// The import declaration binding this name, as it would be written.
    #[must_use]
    pub fn import_statement(&self, module_specifier: &str) -> String {
        match self.style {
            ImportStyle::Namespace => {
                format!("import * as {} from \"{module_specifier}\";", self.binding_name)
            }
            ImportStyle::Default => {
                format!("import {} from \"{module_specifier}\";", self.binding_name)
            }
            ImportStyle::Named if self.binding_name == "z" => {
                format!("import {{ z }} from \"{module_specifier}\";")
            }
            ImportStyle::Named => format!(
                "import {{ z as {} }} from \"{module_specifier}\";",
                self.binding_name
            ),
        }
    }
}

/// Establish the binding generated code uses.
///
/// Fails with `ImportBinding` when the library is imported but none of its
/// imports binds a usable value (`import "zod"`, `import type { ... }`).
pub fn resolve_binding(
    located: &LocatorResult<'_>,
    config: &ConverterConfig,
) -> Result<ImportBinding, ConvertError> {
    let mut insertion_point = insertion_point(located.source, located.last_import_end);
    // A declaration sharing the last import's line gets the import in front
    // of it instead of inside its span.
    let target = located.target.span();
    if insertion_point > target.start && insertion_point <= target.end {
        insertion_point = target.start;
    }

    let existing = located
        .library_imports
        .iter()
        .find_map(|import| existing_binding(import));
    if let Some((binding_name, style)) = existing {
        return Ok(ImportBinding {
            binding_name,
            style,
            already_present: true,
            insertion_point,
        });
    }
    if !located.library_imports.is_empty() {
        return Err(ConvertError::ImportBinding {
            module: config.module_specifier.clone(),
        });
    }

    Ok(ImportBinding {
        binding_name: config.default_binding_name.clone(),
        style: if config.use_namespace_import {
            ImportStyle::Namespace
        } else {
            ImportStyle::Default
        },
        already_present: false,
        insertion_point,
    })
}

fn existing_binding(import: &ImportDeclaration) -> Option<(String, ImportStyle)> {
    if import.is_type_only {
        return None;
    }
    let clause = import.clause.as_ref()?;
    if let Some(default) = &clause.default_binding {
        return Some((default.text.clone(), ImportStyle::Default));
    }
    match clause.named_bindings.as_ref()? {
        NamedImportBindings::Namespace(name) => Some((name.text.clone(), ImportStyle::Namespace)),
        NamedImportBindings::Named(specifiers) => specifiers
            .iter()
            .find(|specifier| !specifier.is_type_only && specifier.imported_name() == "z")
            .map(|specifier| (specifier.name.text.clone(), ImportStyle::Named)),
    }
}

/// Start of the line after the last import, or the document start.
#[must_use]
pub fn insertion_point(source: &SourceFile, last_import_end: Option<u32>) -> u32 {
    let Some(end) = last_import_end else {
        return 0;
    };
    let line_map = LineMap::build(&source.text);
    line_map
        .line_start(line_map.line_of(end) + 1)
        .unwrap_or(source.text.len() as u32)
}

/// Text inserted at `binding.insertion_point` for a missing import.
#[must_use]
pub fn import_insertion_text(
    binding: &ImportBinding,
    source: &SourceFile,
    config: &ConverterConfig,
) -> String {
    let new_line = config.format.new_line.as_str();
    let statement = binding.import_statement(&config.module_specifier);
    let at_end = binding.insertion_point as usize >= source.text.len();
    if at_end && !source.text.is_empty() && !source.text.ends_with(['\n', '\r']) {
        // The last import ends the document without a line break.
        format!("{new_line}{statement}{new_line}")
    } else {
        format!("{statement}{new_line}")
    }
}

#[cfg(test)]
#[path = "tests/imports_tests.rs"]
mod imports_tests;
