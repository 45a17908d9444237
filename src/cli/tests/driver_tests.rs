use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::args::CliArgs;
use super::driver::{cursor_from_args, list_declarations, run};
use zodgen_codegen::Cursor;
use zodgen_common::Position;
use zodgen_parser::parse_source;

const USER: &str = "import * as z from \"zod\";\n\ninterface User {\n  name: string;\n}\n";

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn cli(file: &Path, extra: &[&str]) -> CliArgs {
    let file = file.to_string_lossy().into_owned();
    let mut argv = vec!["zodgen"];
    argv.extend_from_slice(extra);
    argv.push(&file);
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn prints_replaced_text() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "user.ts", USER);

    let result = run(&cli(&file, &["-l", "3", "-c", "11", "-a", "replace"]), dir.path()).unwrap();
    assert!(result.is_success());
    assert_eq!(result.written, None);
    assert_eq!(
        result.output,
        "import * as z from \"zod\";\n\nconst UserSchema = z.object({ name: z.string() });\n\ntype User = z.infer<typeof UserSchema>;\n"
    );
    assert_eq!(fs::read_to_string(&file).unwrap(), USER);
}

#[test]
fn relative_file_resolves_against_cwd() {
    let dir = TempDir::new().unwrap();
    write(&dir, "user.ts", USER);

    let result = run(&cli(Path::new("user.ts"), &["--offset", "40"]), dir.path()).unwrap();
    assert!(result.output.starts_with(USER));
    assert!(result.output.contains("const UserSchema = z.object("));
}

#[test]
fn writes_generated_schema_in_place() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "user.ts", "interface User {\n  name: string;\n}\n");

    let result = run(&cli(&file, &["--offset", "0", "--write"]), dir.path()).unwrap();
    assert_eq!(result.output, "");
    assert_eq!(result.written.as_deref(), Some(file.as_path()));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "import * as z from \"zod\";\ninterface User {\n  name: string;\n}\n\nconst UserSchema = z.object({ name: z.string() });\n\ntype User = z.infer<typeof UserSchema>;\n"
    );
}

#[test]
fn prints_edit_batch_as_json() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "user.ts", USER);

    let result = run(&cli(&file, &["--offset", "40", "--json"]), dir.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.output).unwrap();
    assert_eq!(json["declarationName"], "User");
    assert_eq!(json["action"], "generate");
    assert_eq!(json["edits"].as_array().map(Vec::len), Some(1));
}

#[test]
fn lists_declarations() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "models.ts",
        "interface User {\n  name: string;\n}\nexport type Id = string;\n",
    );

    let result = run(&cli(&file, &["--list"]), dir.path()).unwrap();
    assert_eq!(result.output, "1:1\tinterface\tUser\n4:1\ttype\tId\n");

    let result = run(&cli(&file, &["--list", "--json"]), dir.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.output).unwrap();
    assert_eq!(json[1]["name"], "Id");
    assert_eq!(json[1]["exported"], true);
    assert_eq!(json[1]["offset"], 35);
}

#[test]
fn syntax_errors_are_returned_as_diagnostics() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "broken.ts", "interface Broken {\n  name: string;\n");

    let result = run(&cli(&file, &["--offset", "0"]), dir.path()).unwrap();
    assert!(!result.is_success());
    assert!(result.diagnostics.iter().all(|diag| diag.is_error()));
    assert_eq!(result.output, "");
}

#[test]
fn conversion_failures_are_errors() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "value.ts", "const value = 1;\n");

    let err = run(&cli(&file, &["--offset", "0"]), dir.path()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("cannot convert"), "{message}");
    assert!(message.contains("no interface or type alias found at offset 0"));
}

#[test]
fn rejects_invalid_binding_name() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "user.ts", USER);

    let err = run(&cli(&file, &["--offset", "40", "--binding", "2z"]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("not a valid binding name"));
}

#[test]
fn cursor_is_one_based() {
    let args = CliArgs::try_parse_from(["zodgen", "-l", "3", "-c", "1", "a.ts"]).unwrap();
    assert_eq!(
        cursor_from_args(&args).unwrap(),
        Cursor::Position(Position::new(2, 0))
    );

    let args = CliArgs::try_parse_from(["zodgen", "--offset", "7", "a.ts"]).unwrap();
    assert_eq!(cursor_from_args(&args).unwrap(), Cursor::Offset(7));

    let args = CliArgs::try_parse_from(["zodgen", "-l", "0", "-c", "1", "a.ts"]).unwrap();
    assert!(cursor_from_args(&args).is_err());

    let args = CliArgs::try_parse_from(["zodgen", "a.ts"]).unwrap();
    assert!(cursor_from_args(&args).is_err());
}

#[test]
fn list_skips_inferred_aliases() {
    let source = parse_source(
        "/a.ts",
        "const ASchema = z.object({});\ntype A = z.infer<typeof ASchema>;\ntype B = string;\n",
    );
    let names: Vec<_> = list_declarations(&source)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["B"]);
}
