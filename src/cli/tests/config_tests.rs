use clap::Parser;
use std::fs;
use tempfile::TempDir;

use super::args::CliArgs;
use super::config::{CONFIG_FILE_NAME, find_config, load_config, parse_config, resolve_config};
use zodgen_common::NewLineKind;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["zodgen"];
    argv.extend_from_slice(extra);
    argv.push("a.ts");
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn finds_config_in_ancestor_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("src/models");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();

    assert_eq!(
        find_config(&nested),
        Some(dir.path().join(CONFIG_FILE_NAME))
    );
}

#[test]
fn nearest_config_wins() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("pkg");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
    fs::write(nested.join(CONFIG_FILE_NAME), "{}").unwrap();

    assert_eq!(find_config(&nested), Some(nested.join(CONFIG_FILE_NAME)));
}

#[test]
fn parses_partial_config() {
    let config = parse_config(
        r#"{ "defaultBindingName": "schema", "format": { "newLine": "crlf", "indentWidth": 4 } }"#,
    )
    .unwrap();
    assert_eq!(config.default_binding_name, "schema");
    assert_eq!(config.format.new_line, NewLineKind::CarriageReturnLineFeed);
    assert_eq!(config.format.indent_width, 4);
    assert_eq!(config.module_specifier, "zod");
    assert!(config.use_namespace_import);
}

#[test]
fn reports_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "{ \"renderErrorMessages\": 3 }").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse config"));
    assert!(load_config(&dir.path().join("missing.json")).is_err());
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "defaultBindingName": "schema", "moduleSpecifier": "zod/v4" }"#,
    )
    .unwrap();
    let file = dir.path().join("a.ts");

    let config = resolve_config(&args(&[]), &file).unwrap();
    assert_eq!(config.default_binding_name, "schema");
    assert_eq!(config.module_specifier, "zod/v4");

    let config = resolve_config(&args(&["--binding", "v", "--default-import"]), &file).unwrap();
    assert_eq!(config.default_binding_name, "v");
    assert!(!config.use_namespace_import);
    assert_eq!(config.module_specifier, "zod/v4");
}

#[test]
fn explicit_config_path_skips_lookup() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "defaultBindingName": "near" }"#).unwrap();
    let explicit = dir.path().join("other.json");
    fs::write(&explicit, r#"{ "defaultBindingName": "far" }"#).unwrap();

    let explicit_arg = explicit.to_string_lossy().into_owned();
    let config =
        resolve_config(&args(&["--config", &explicit_arg]), &dir.path().join("a.ts")).unwrap();
    assert_eq!(config.default_binding_name, "far");
}
