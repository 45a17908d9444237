use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use zodgen_codegen::ConvertAction;

/// CLI arguments for the zodgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "zodgen",
    version,
    about = "Generate Zod schemas from TypeScript interfaces and type aliases"
)]
pub struct CliArgs {
    /// TypeScript file containing the declaration.
    pub file: PathBuf,

    /// Byte offset of the cursor inside the declaration.
    #[arg(long, conflicts_with_all = ["line", "character"])]
    pub offset: Option<u32>,

    /// 1-based line of the cursor.
    #[arg(short = 'l', long, requires = "character")]
    pub line: Option<u32>,

    /// 1-based column of the cursor, in UTF-16 code units.
    #[arg(short = 'c', long, requires = "line")]
    pub character: Option<u32>,

    /// Keep the declaration and insert the schema after it, or replace it.
    #[arg(short = 'a', long, value_enum, default_value_t = Action::Generate, ignore_case = true)]
    pub action: Action,

    /// Path to a zodgen.json configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Local name for a synthesized Zod import.
    #[arg(long)]
    pub binding: Option<String>,

    /// Synthesize `import z from "zod"` instead of a namespace import.
    #[arg(long = "default-import")]
    pub default_import: bool,

    /// Write the result back to the file instead of printing it.
    #[arg(short = 'w', long, conflicts_with = "json")]
    pub write: bool,

    /// Print the edit batch (or the declaration list) as JSON.
    #[arg(long)]
    pub json: bool,

    /// List the convertible declarations of the file and exit.
    #[arg(long, conflicts_with_all = ["offset", "line", "write"])]
    pub list: bool,

    /// Color diagnostics (default: when stderr is a terminal).
    #[arg(long)]
    pub pretty: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Generate,
    Replace,
}

impl From<Action> for ConvertAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Generate => ConvertAction::Generate,
            Action::Replace => ConvertAction::Replace,
        }
    }
}
