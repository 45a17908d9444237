//! `zodgen.json` lookup and CLI overrides.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use zodgen_codegen::ConverterConfig;

use crate::cli::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "zodgen.json";

/// The nearest `zodgen.json` in `start` or one of its ancestors.
#[must_use]
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn parse_config(source: &str) -> Result<ConverterConfig> {
    serde_json::from_str(source).context("failed to parse zodgen config JSON")
}

pub fn load_config(path: &Path) -> Result<ConverterConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Configuration for converting `file`: `--config`, else the nearest
/// `zodgen.json` above the file, else defaults. Flags override the file.
pub fn resolve_config(args: &CliArgs, file: &Path) -> Result<ConverterConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => file.parent().and_then(find_config),
    };
    let mut config = match &path {
        Some(path) => {
            debug!(config = %path.display(), "loading config");
            load_config(path)?
        }
        None => ConverterConfig::default(),
    };

    if let Some(binding) = &args.binding {
        config.default_binding_name = binding.clone();
    }
    if args.default_import {
        config.use_namespace_import = false;
    }
    Ok(config)
}
