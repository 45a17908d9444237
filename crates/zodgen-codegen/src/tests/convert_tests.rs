use super::*;
use crate::edits::{EditKind, apply_edits};
use zodgen_parser::parse_source;

const USER: &str = "export interface User {\n  name: string;\n}\n";

fn program(text: &str) -> Program {
    Program::from_source("/proj/user.ts", text)
}

#[test]
fn test_resolve_cursor_offset_passes_through() {
    let source = parse_source("/proj/user.ts", USER);
    let line_map = LineMap::build(&source.text);
    assert_eq!(resolve_cursor(&source, &line_map, Cursor::Offset(7)), Ok(7));
    assert_eq!(resolve_cursor(&source, &line_map, Cursor::Offset(999)), Ok(999));
}

#[test]
fn test_resolve_cursor_position() {
    let source = parse_source("/proj/user.ts", USER);
    let line_map = LineMap::build(&source.text);
    assert_eq!(
        resolve_cursor(&source, &line_map, Cursor::Position(Position::new(1, 2))),
        Ok(26)
    );
    for position in [Position::new(1, 40), Position::new(9, 0)] {
        assert_eq!(
            resolve_cursor(&source, &line_map, Cursor::Position(position)),
            Err(ConvertError::InvalidPosition {
                line: position.line,
                character: position.character,
            })
        );
    }
}

#[test]
fn test_generate_inserts_after_declaration() {
    let program = program(USER);
    let conversion = convert(
        &program,
        "/proj/user.ts",
        Cursor::Offset(10),
        ConvertAction::Generate,
        &ConverterConfig::default(),
    )
    .unwrap();

    assert_eq!(conversion.declaration_name, "User");
    assert_eq!(conversion.edits.len(), 2);
    assert_eq!(conversion.edits[0].kind, EditKind::Insert);
    assert_eq!(conversion.edits[0].span.start, 0);
    assert_eq!(conversion.edits[1].kind, EditKind::Insert);
    assert_eq!(conversion.edits[1].span.start as usize, USER.len() - 1);

    assert_eq!(
        apply_edits(USER, &conversion.edits).unwrap(),
        "import * as z from \"zod\";\nexport interface User {\n  name: string;\n}\n\nexport const UserSchema = z.object({ name: z.string() });\n\nexport type User = z.infer<typeof UserSchema>;\n"
    );
}

#[test]
fn test_replace_with_existing_import() {
    let text = format!("import {{ z }} from \"zod\";\n\n{USER}");
    let program = program(&text);
    let conversion = convert(
        &program,
        "/proj/user.ts",
        Cursor::Position(Position::new(3, 4)),
        ConvertAction::Replace,
        &ConverterConfig::default(),
    )
    .unwrap();

    assert!(conversion.binding.already_present);
    assert_eq!(conversion.edits.len(), 1);
    assert_eq!(conversion.edits[0].kind, EditKind::Replace);
    assert_eq!(
        apply_edits(&text, &conversion.edits).unwrap(),
        "import { z } from \"zod\";\n\nexport const UserSchema = z.object({ name: z.string() });\n\nexport type User = z.infer<typeof UserSchema>;\n"
    );
}

#[test]
fn test_parse_errors_abort() {
    let program = program("interface Broken {\n  name: string;\n");
    let err = convert(
        &program,
        "/proj/user.ts",
        Cursor::Offset(0),
        ConvertAction::Generate,
        &ConverterConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UpstreamParse { ref file, count, .. } if file == "/proj/user.ts" && count >= 1
    ));
}

#[test]
fn test_unknown_file() {
    let program = program(USER);
    assert_eq!(
        convert(
            &program,
            "/proj/other.ts",
            Cursor::Offset(0),
            ConvertAction::Generate,
            &ConverterConfig::default(),
        )
        .unwrap_err(),
        ConvertError::UnknownFile("/proj/other.ts".to_string())
    );
}

#[test]
fn test_no_declaration_at_cursor() {
    let text = format!("const x = 1;\n{USER}");
    let program = program(&text);
    assert_eq!(
        convert(
            &program,
            "/proj/user.ts",
            Cursor::Offset(3),
            ConvertAction::Replace,
            &ConverterConfig::default(),
        )
        .unwrap_err(),
        ConvertError::NotFound { offset: 3 }
    );
}

#[test]
fn test_conversion_serializes_camel_case() {
    let program = program(USER);
    let conversion = convert(
        &program,
        "/proj/user.ts",
        Cursor::Offset(0),
        ConvertAction::Replace,
        &ConverterConfig::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&conversion).unwrap();
    assert_eq!(json["declarationName"], "User");
    assert_eq!(json["action"], "replace");
    assert_eq!(json["binding"]["bindingName"], "z");
    assert_eq!(json["binding"]["alreadyPresent"], false);
    assert_eq!(json["edits"][1]["kind"], "replace");
    assert_eq!(json["edits"][1]["range"]["start"]["line"], 0);
}
