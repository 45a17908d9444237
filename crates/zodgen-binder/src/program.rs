//! A set of parsed and bound source files.

use rustc_hash::FxHashMap;
use tracing::debug;
use zodgen_parser::{SourceFile, parse_source};

use crate::module_resolver::{module_candidates, normalize_path};
use crate::state::BinderState;

/// Index of a file within a [`Program`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

#[derive(Debug)]
pub struct BoundFile {
    pub source: SourceFile,
    pub binder: BinderState,
}

impl BoundFile {
    #[must_use]
    pub fn new(source: SourceFile) -> Self {
        let binder = BinderState::bind_source_file(&source);
        BoundFile { source, binder }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.source.file_name
    }
}

/// Files keyed by normalized path. The first file added is the root.
#[derive(Debug, Default)]
pub struct Program {
    files: Vec<BoundFile>,
    by_name: FxHashMap<String, FileId>,
    root: Option<FileId>,
}

impl Program {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-file program rooted at `file_name`.
    #[must_use]
    pub fn from_source(file_name: &str, text: &str) -> Self {
        let mut program = Program::new();
        program.add_source_file(file_name, text);
        program
    }

    /// Parse and bind `text` as `file_name`. Adding a file name that is
    /// already present replaces its contents and keeps its id.
    pub fn add_source_file(&mut self, file_name: &str, text: &str) -> FileId {
        let file_name = normalize_path(file_name);
        let bound = BoundFile::new(parse_source(&file_name, text));
        debug!(
            file = %file_name,
            statements = bound.source.statements.len(),
            diagnostics = bound.source.diagnostics.len(),
            "added source file"
        );

        if let Some(&id) = self.by_name.get(&file_name) {
            self.files[id.0 as usize] = bound;
            return id;
        }
        let id = FileId(self.files.len() as u32);
        self.files.push(bound);
        self.by_name.insert(file_name, id);
        self.root.get_or_insert(id);
        id
    }

    #[must_use]
    pub fn root(&self) -> Option<FileId> {
        self.root
    }

    pub fn set_root(&mut self, file: FileId) {
        if self.get_file(file).is_some() {
            self.root = Some(file);
        }
    }

    #[must_use]
    pub fn file_id(&self, file_name: &str) -> Option<FileId> {
        self.by_name.get(&normalize_path(file_name)).copied()
    }

    #[must_use]
    pub fn get_file(&self, file: FileId) -> Option<&BoundFile> {
        self.files.get(file.0 as usize)
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &BoundFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| (FileId(index as u32), file))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The file a relative `specifier` imported from `from` refers to, if
    /// it is part of the program.
    #[must_use]
    pub fn resolve_module(&self, from: FileId, specifier: &str) -> Option<FileId> {
        let from_name = self.get_file(from)?.file_name();
        module_candidates(from_name, specifier)
            .iter()
            .find_map(|candidate| self.by_name.get(candidate).copied())
    }
}
