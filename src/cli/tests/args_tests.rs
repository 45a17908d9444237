use clap::Parser;
use std::path::Path;

use super::args::{Action, CliArgs};
use zodgen_codegen::ConvertAction;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["zodgen", "src/user.ts"]).expect("file alone parses");

    assert_eq!(args.file, Path::new("src/user.ts"));
    assert_eq!(args.offset, None);
    assert_eq!(args.line, None);
    assert_eq!(args.action, Action::Generate);
    assert!(args.config.is_none());
    assert!(args.binding.is_none());
    assert!(!args.default_import);
    assert!(!args.write);
    assert!(!args.json);
    assert!(!args.list);
    assert_eq!(args.pretty, None);
}

#[test]
fn parses_cursor_and_flags() {
    let args = CliArgs::try_parse_from([
        "zodgen",
        "-l",
        "3",
        "-c",
        "11",
        "--action",
        "REPLACE",
        "--binding",
        "v",
        "--default-import",
        "--config",
        "cfg/zodgen.json",
        "--pretty",
        "false",
        "-w",
        "user.ts",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.line, Some(3));
    assert_eq!(args.character, Some(11));
    assert_eq!(args.action, Action::Replace);
    assert_eq!(ConvertAction::from(args.action), ConvertAction::Replace);
    assert_eq!(args.binding.as_deref(), Some("v"));
    assert!(args.default_import);
    assert_eq!(args.config.as_deref(), Some(Path::new("cfg/zodgen.json")));
    assert_eq!(args.pretty, Some(false));
    assert!(args.write);
}

#[test]
fn line_requires_character() {
    assert!(CliArgs::try_parse_from(["zodgen", "--line", "2", "a.ts"]).is_err());
    assert!(CliArgs::try_parse_from(["zodgen", "--character", "2", "a.ts"]).is_err());
}

#[test]
fn offset_conflicts_with_line() {
    let result = CliArgs::try_parse_from([
        "zodgen", "--offset", "4", "--line", "1", "--character", "1", "a.ts",
    ]);
    assert!(result.is_err());
}

#[test]
fn write_conflicts_with_json() {
    assert!(CliArgs::try_parse_from(["zodgen", "--offset", "0", "-w", "--json", "a.ts"]).is_err());
}

#[test]
fn list_conflicts_with_cursor() {
    assert!(CliArgs::try_parse_from(["zodgen", "--list", "--offset", "0", "a.ts"]).is_err());
    let args = CliArgs::try_parse_from(["zodgen", "--list", "--json", "a.ts"]).unwrap();
    assert!(args.list && args.json);
}

#[test]
fn rejects_unknown_action() {
    assert!(CliArgs::try_parse_from(["zodgen", "--action", "merge", "a.ts"]).is_err());
}
