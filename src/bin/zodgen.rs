#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use zodgen::cli::args::CliArgs;
use zodgen::cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() -> Result<()> {
    // ZODGEN_LOG or RUST_LOG enables tracing; ZODGEN_LOG_FORMAT=tree|json|text.
    zodgen::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let mut reporter = Reporter::new(pretty);

    let result = match driver::run(&args, &cwd) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", reporter.format_error(&err));
            std::process::exit(EXIT_FAILURE);
        }
    };

    if !result.is_success() {
        eprintln!("{}", reporter.render(&result.diagnostics));
        std::process::exit(EXIT_DIAGNOSTICS);
    }
    if let Some(path) = &result.written {
        eprintln!("wrote {}", path.display());
    }
    print!("{}", result.output);
    std::process::exit(EXIT_SUCCESS);
}
