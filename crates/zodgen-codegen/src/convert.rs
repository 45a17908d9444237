//! The conversion entry point.
//!
//! One call runs the whole pipeline on a fresh snapshot and returns the
//! complete edit batch, or an error and no edits:
//!
//! locate -> resolve binding -> lower -> compile -> emit -> render -> edits

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};
use zodgen_binder::{FileId, Program, TypeResolver};
use zodgen_common::{LineMap, Position};
use zodgen_parser::SourceFile;

use crate::compiler::compile;
use crate::config::ConverterConfig;
use crate::edits::TextEdit;
use crate::emitter::emit;
use crate::error::ConvertError;
use crate::imports::{ImportBinding, import_insertion_text, resolve_binding};
use crate::locator::locate;
use crate::lower::Lowering;
use crate::render::render;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertAction {
    /// Insert the schema after the declaration and keep the declaration.
    #[default]
    Generate,
    /// Replace the declaration with the schema and its inferred type.
    Replace,
}

/// Where the conversion was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Offset(u32),
    Position(Position),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub declaration_name: String,
    pub action: ConvertAction,
    pub binding: ImportBinding,
    /// The missing-import insertion, if any, comes first.
    pub edits: Vec<TextEdit>,
}

/// Convert the declaration at `cursor` in the program file `file_name`.
pub fn convert(
    program: &Program,
    file_name: &str,
    cursor: Cursor,
    action: ConvertAction,
    config: &ConverterConfig,
) -> Result<Conversion, ConvertError> {
    let file = program
        .file_id(file_name)
        .ok_or_else(|| ConvertError::UnknownFile(file_name.to_string()))?;
    convert_file(program, file, cursor, action, config)
}

pub fn convert_file<R: TypeResolver + ?Sized>(
    resolver: &R,
    file: FileId,
    cursor: Cursor,
    action: ConvertAction,
    config: &ConverterConfig,
) -> Result<Conversion, ConvertError> {
    let source = resolver
        .source_file(file)
        .ok_or_else(|| ConvertError::UnknownFile(format!("#{}", file.0)))?;
    let _span = info_span!("convert", file = %source.file_name, ?action).entered();

    check_parse_errors(source)?;
    let line_map = LineMap::build(&source.text);
    let offset = resolve_cursor(source, &line_map, cursor)?;

    let located = locate(resolver, file, offset, &config.module_specifier)?;
    let binding = resolve_binding(&located, config)?;
    debug!(
        declaration = located.target.name(),
        binding = %binding.binding_name,
        already_present = binding.already_present,
        "located declaration"
    );

    let declaration = Lowering::new(resolver, config).lower_declaration(file, located.target);
    let schema = compile(&declaration.body, &binding.binding_name);
    let (schema_decl, inferred_decl) = emit(
        &declaration.name,
        &binding.binding_name,
        schema,
        declaration.exported,
    );
    let rendered = render(&declaration, &[schema_decl, inferred_decl], &config.format);

    let mut edits = Vec::with_capacity(2);
    if !binding.already_present {
        edits.push(TextEdit::insert(
            binding.insertion_point,
            import_insertion_text(&binding, source, config),
            &line_map,
            &source.text,
        ));
    }
    edits.push(match action {
        ConvertAction::Replace => TextEdit::replace(
            rendered.replacement_span,
            rendered.text,
            &line_map,
            &source.text,
        ),
        ConvertAction::Generate => {
            let new_line = config.format.new_line.as_str();
            TextEdit::insert(
                rendered.replacement_span.end,
                format!("{new_line}{new_line}{}", rendered.text),
                &line_map,
                &source.text,
            )
        }
    });
    debug!(edits = edits.len(), "conversion complete");

    Ok(Conversion {
        declaration_name: declaration.name,
        action,
        binding,
        edits,
    })
}

/// Byte offset of `cursor`. A position must name an existing line and a
/// column within it.
pub fn resolve_cursor(
    source: &SourceFile,
    line_map: &LineMap,
    cursor: Cursor,
) -> Result<u32, ConvertError> {
    match cursor {
        Cursor::Offset(offset) => Ok(offset),
        Cursor::Position(position) => {
            let invalid = ConvertError::InvalidPosition {
                line: position.line,
                character: position.character,
            };
            let offset = line_map
                .position_to_offset(position, &source.text)
                .ok_or_else(|| invalid.clone())?;
            if line_map.offset_to_position(offset, &source.text) == position {
                Ok(offset)
            } else {
                Err(invalid)
            }
        }
    }
}

fn check_parse_errors(source: &SourceFile) -> Result<(), ConvertError> {
    let errors: Vec<_> = source.diagnostics.iter().filter(|diag| diag.is_error()).collect();
    match errors.first() {
        Some(first) => Err(ConvertError::UpstreamParse {
            file: source.file_name.clone(),
            count: errors.len(),
            first: first.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod convert_tests;
