//! Loading a program from disk.
//!
//! Starting at the file being converted, relative imports and re-exports
//! are followed breadth-first and every file they reach is parsed into one
//! [`Program`]. Package imports such as `"zod"` are never loaded.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use zodgen_binder::module_resolver::module_candidates;
use zodgen_binder::{FileId, Program};
use zodgen_common::limits::MAX_PROGRAM_FILES;
use zodgen_parser::{SourceFile, Statement};

pub struct LoadedProgram {
    pub program: Program,
    pub root: FileId,
    /// Name of the root file inside the program.
    pub root_name: String,
}

/// Load `entry` and the relative modules it reaches.
///
/// Only the entry file must be readable; a module that disappears or
/// cannot be read is skipped and its types stay unresolved.
pub fn load_program(entry: &Path) -> Result<LoadedProgram> {
    let entry = std::fs::canonicalize(entry)
        .with_context(|| format!("failed to resolve {}", entry.display()))?;
    let text = std::fs::read_to_string(&entry)
        .with_context(|| format!("failed to read {}", entry.display()))?;

    let mut program = Program::new();
    let root = program.add_source_file(&entry.to_string_lossy(), &text);
    let root_name = program
        .get_file(root)
        .map(|bound| bound.file_name().to_string())
        .unwrap_or_default();

    let mut queue = VecDeque::from([root]);
    'load: while let Some(file) = queue.pop_front() {
        let Some(bound) = program.get_file(file) else {
            continue;
        };
        let from = bound.file_name().to_string();
        for specifier in relative_specifiers(&bound.source) {
            let Some(path) = find_module(&from, &specifier) else {
                debug!(from = %from, specifier = %specifier, "module not found on disk");
                continue;
            };
            if program.file_id(&path).is_some() {
                continue;
            }
            if program.len() >= MAX_PROGRAM_FILES {
                warn!(limit = MAX_PROGRAM_FILES, "program file limit reached");
                break 'load;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => queue.push_back(program.add_source_file(&path, &text)),
                Err(err) => warn!(file = %path, %err, "skipping unreadable module"),
            }
        }
    }

    debug!(files = program.len(), root = %root_name, "program loaded");
    Ok(LoadedProgram {
        program,
        root,
        root_name,
    })
}

/// Specifiers of imports and `export ... from` declarations, in source
/// order.
fn relative_specifiers(source: &SourceFile) -> Vec<String> {
    source
        .statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Import(import) => Some(&import.module_specifier),
            Statement::Export(export) => export.module_specifier.as_ref(),
            _ => None,
        })
        .map(|specifier| specifier.value.clone())
        .collect()
}

fn find_module(from: &str, specifier: &str) -> Option<String> {
    module_candidates(from, specifier)
        .into_iter()
        .find(|candidate| Path::new(candidate).is_file())
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod host_tests;
