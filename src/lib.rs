//! zodgen: generate Zod schemas from TypeScript interfaces and type aliases.
//!
//! The conversion pipeline lives in the workspace crates and is re-exported
//! here; this crate adds the filesystem host and the command-line driver.
//!
//! ```no_run
//! use zodgen::codegen::{ConvertAction, ConverterConfig, Cursor, convert};
//! use zodgen::host::load_program;
//!
//! let loaded = load_program(std::path::Path::new("src/user.ts"))?;
//! let conversion = convert(
//!     &loaded.program,
//!     &loaded.root_name,
//!     Cursor::Offset(0),
//!     ConvertAction::Replace,
//!     &ConverterConfig::default(),
//! )?;
//! for edit in &conversion.edits {
//!     println!("{:?}: {}", edit.range, edit.new_text);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use zodgen_binder as binder;
pub use zodgen_codegen as codegen;
pub use zodgen_common as common;
pub use zodgen_parser as parser;

pub mod cli;
pub mod host;
pub mod tracing_config;
