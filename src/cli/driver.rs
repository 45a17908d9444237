//! One command-line run: load the program, convert or list, produce output.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use zodgen_binder::TypeResolver;
use zodgen_codegen::{
    ConvertError, Cursor, DeclarationTarget, apply_edits, candidates, convert,
};
use zodgen_common::{Diagnostic, LineMap, Position};
use zodgen_parser::SourceFile;
use zodgen_scanner::char_codes::is_identifier_text;

use crate::cli::args::CliArgs;
use crate::cli::config::resolve_config;
use crate::host::load_program;

#[derive(Debug, Default)]
pub struct RunResult {
    /// Text for stdout. Empty after `--write`.
    pub output: String,
    /// Syntax errors that stopped the conversion.
    pub diagnostics: Vec<Diagnostic>,
    /// File rewritten by `--write`.
    pub written: Option<PathBuf>,
}

impl RunResult {
    fn output(output: String) -> Self {
        RunResult {
            output,
            ..RunResult::default()
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A convertible declaration as reported by `--list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationEntry {
    pub name: String,
    pub kind: &'static str,
    pub exported: bool,
    /// 1-based.
    pub line: u32,
    /// 1-based, UTF-16 code units.
    pub character: u32,
    pub offset: u32,
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let file = if args.file.is_absolute() {
        args.file.clone()
    } else {
        cwd.join(&args.file)
    };
    let config = resolve_config(args, &file)?;
    if !is_identifier_text(&config.default_binding_name) {
        bail!(
            "'{}' is not a valid binding name",
            config.default_binding_name
        );
    }

    let loaded = load_program(&file)?;
    let source = loaded
        .program
        .source_file(loaded.root)
        .context("root file missing from program")?;

    if args.list {
        let entries = list_declarations(source);
        debug!(declarations = entries.len(), "listing declarations");
        return Ok(RunResult::output(if args.json {
            serde_json::to_string_pretty(&entries)? + "\n"
        } else {
            format_entries(&entries)
        }));
    }

    let cursor = cursor_from_args(args)?;
    let conversion = match convert(
        &loaded.program,
        &loaded.root_name,
        cursor,
        args.action.into(),
        &config,
    ) {
        Ok(conversion) => conversion,
        Err(ConvertError::UpstreamParse { .. }) => {
            return Ok(RunResult {
                diagnostics: source
                    .diagnostics
                    .iter()
                    .filter(|diag| diag.is_error())
                    .cloned()
                    .collect(),
                ..RunResult::default()
            });
        }
        Err(err) => {
            return Err(err).with_context(|| format!("cannot convert {}", file.display()));
        }
    };
    info!(
        declaration = %conversion.declaration_name,
        edits = conversion.edits.len(),
        "converted declaration"
    );

    if args.json {
        return Ok(RunResult::output(
            serde_json::to_string_pretty(&conversion)? + "\n",
        ));
    }

    let text = apply_edits(&source.text, &conversion.edits)?;
    if args.write {
        std::fs::write(&file, &text)
            .with_context(|| format!("failed to write {}", file.display()))?;
        return Ok(RunResult {
            written: Some(file),
            ..RunResult::default()
        });
    }
    Ok(RunResult::output(text))
}

/// Cursor from `--offset` or the 1-based `--line`/`--character` pair.
pub fn cursor_from_args(args: &CliArgs) -> Result<Cursor> {
    match (args.offset, args.line, args.character) {
        (Some(offset), _, _) => Ok(Cursor::Offset(offset)),
        (None, Some(line), Some(character)) => {
            if line == 0 || character == 0 {
                bail!("--line and --character are 1-based");
            }
            Ok(Cursor::Position(Position::new(line - 1, character - 1)))
        }
        _ => bail!("a cursor is required: pass --offset, or --line and --character"),
    }
}

pub fn list_declarations(source: &SourceFile) -> Vec<DeclarationEntry> {
    let line_map = LineMap::build(&source.text);
    candidates(source)
        .into_iter()
        .map(|target| {
            let offset = target.span().start;
            let position = line_map.offset_to_position(offset, &source.text);
            DeclarationEntry {
                name: target.name().to_string(),
                kind: match target {
                    DeclarationTarget::Interface(_) => "interface",
                    DeclarationTarget::TypeAlias(_) => "type",
                },
                exported: target.is_exported(),
                line: position.line + 1,
                character: position.character + 1,
                offset,
            }
        })
        .collect()
}

fn format_entries(entries: &[DeclarationEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}:{}\t{}\t{}\n",
                entry.line, entry.character, entry.kind, entry.name
            )
        })
        .collect()
}
