//! End-to-end conversions: source text in, edited source text out.

use zodgen_binder::Program;
use zodgen_codegen::actions::{CONVERT_TITLE, REPLACE_TITLE};
use zodgen_codegen::{
    ConvertAction, ConvertError, ConverterConfig, Cursor, apply_edits, code_actions, convert,
};

const MAIN: &str = "/proj/src/main.ts";

fn run_in(
    files: &[(&str, &str)],
    needle: &str,
    action: ConvertAction,
    config: &ConverterConfig,
) -> Result<String, ConvertError> {
    let mut program = Program::new();
    for (name, text) in files {
        program.add_source_file(name, text);
    }
    let text = files[0].1;
    let offset = text.find(needle).expect("needle present") as u32;
    let conversion = convert(&program, files[0].0, Cursor::Offset(offset), action, config)?;
    apply_edits(text, &conversion.edits)
}

fn replace(text: &str, needle: &str) -> String {
    run_in(
        &[(MAIN, text)],
        needle,
        ConvertAction::Replace,
        &ConverterConfig::default(),
    )
    .unwrap()
}

#[test]
fn simple_interface() {
    let text = "import * as z from \"zod\";\n\ninterface Foo {\n  a: string;\n  b?: number;\n}\n";
    assert_eq!(
        replace(text, "Foo"),
        "import * as z from \"zod\";\n\nconst FooSchema = z.object({ a: z.string(), b: z.number().optional() });\n\ntype Foo = z.infer<typeof FooSchema>;\n"
    );
}

#[test]
fn literal_union_alias() {
    let text = "import * as z from \"zod\";\n\nexport type Status = \"active\" | \"inactive\";\n";
    assert_eq!(
        replace(text, "Status"),
        "import * as z from \"zod\";\n\nexport const StatusSchema = z.union([z.literal(\"active\"), z.literal(\"inactive\")]);\n\nexport type Status = z.infer<typeof StatusSchema>;\n"
    );
}

#[test]
fn enum_reference() {
    let text = "import * as z from \"zod\";\n\nenum E { X, Y }\n\ninterface Holder {\n  e: E;\n}\n";
    assert_eq!(
        replace(text, "Holder"),
        "import * as z from \"zod\";\n\nenum E { X, Y }\n\nconst HolderSchema = z.object({ e: z.enum([\"X\", \"Y\"]) });\n\ntype Holder = z.infer<typeof HolderSchema>;\n"
    );
}

#[test]
fn missing_import_is_added_after_last_import() {
    let text = "import { helper } from \"./helper\";\n\ntype Id = string;\n";
    assert_eq!(
        run_in(
            &[(MAIN, text), ("/proj/src/helper.ts", "export const helper = 1;\n")],
            "Id",
            ConvertAction::Generate,
            &ConverterConfig::default(),
        )
        .unwrap(),
        "import { helper } from \"./helper\";\nimport * as z from \"zod\";\n\ntype Id = string;\n\nconst IdSchema = z.string();\n\ntype Id = z.infer<typeof IdSchema>;\n"
    );
}

#[test]
fn error_messages_and_modifiers() {
    let text = "import * as z from \"zod\";\n\nexport interface SignUp {\n  /**\n   * Your email\n   * @error Please enter a valid email\n   */\n  email: string;\n  /** @error Too short */\n  nickname?: string | null;\n  age: number | null;\n}\n";
    assert_eq!(
        replace(text, "SignUp"),
        concat!(
            "import * as z from \"zod\";\n\n",
            "export const SignUpSchema = z.object({\n",
            "  email: z.string({ message: \"Please enter a valid email\" }),\n",
            "  nickname: z.string({ message: \"Too short\" }).optional().nullable(),\n",
            "  age: z.number().nullable(),\n",
            "});\n\n",
            "export type SignUp = z.infer<typeof SignUpSchema>;\n",
        )
    );
}

#[test]
fn error_messages_can_be_disabled() {
    let text = "import * as z from \"zod\";\ninterface A {\n  /** @error nope */\n  a: string;\n}\n";
    let config: ConverterConfig =
        serde_json::from_str(r#"{ "renderErrorMessages": "false" }"#).unwrap();
    assert_eq!(
        run_in(&[(MAIN, text)], "A", ConvertAction::Replace, &config).unwrap(),
        "import * as z from \"zod\";\nconst ASchema = z.object({ a: z.string() });\n\ntype A = z.infer<typeof ASchema>;\n"
    );
}

#[test]
fn cross_file_references() {
    let text = "import * as z from \"zod\";\nimport { Address } from \"./models\";\nimport type { Role } from \"./role\";\n\nexport interface User {\n  address: Address;\n  role: Role;\n  friends: User[];\n}\n";
    let models = "export * from \"./address\";\n";
    let address = "export interface Address {\n  city: string;\n}\n";
    let role = "export type Role = \"admin\" | \"user\";\n";
    let output = run_in(
        &[
            (MAIN, text),
            ("/proj/src/models/index.ts", models),
            ("/proj/src/models/address.ts", address),
            ("/proj/src/role.ts", role),
        ],
        "User",
        ConvertAction::Replace,
        &ConverterConfig::default(),
    )
    .unwrap();
    assert!(output.contains(
        "export const UserSchema = z.object({\n  address: z.object({ city: z.string() }),\n  role: z.union([z.literal(\"admin\"), z.literal(\"user\")]),\n  friends: z.array(z.any()),\n});"
    ));
}

#[test]
fn unsupported_property_falls_back_to_any() {
    let text = "import { z } from \"zod\";\ninterface A {\n  pair: [string, number];\n  ok: boolean;\n}\n";
    assert!(replace(text, "pair").contains("z.object({ pair: z.any(), ok: z.boolean() })"));
}

#[test]
fn configured_binding_and_module() {
    let text = "interface A {\n  a: string;\n}\n";
    let config: ConverterConfig = serde_json::from_str(
        r#"{
            "defaultBindingName": "v",
            "useNamespaceImport": false,
            "moduleSpecifier": "zod/v4",
            "format": { "newLine": "crlf" }
        }"#,
    )
    .unwrap();
    assert_eq!(
        run_in(&[(MAIN, text)], "a:", ConvertAction::Generate, &config).unwrap(),
        "import v from \"zod/v4\";\r\ninterface A {\n  a: string;\n}\r\n\r\nconst ASchema = v.object({ a: v.string() });\r\n\r\ntype A = v.infer<typeof ASchema>;\n"
    );
}

#[test]
fn type_only_library_import_fails_without_edits() {
    let text = "import type { ZodType } from \"zod\";\ninterface A {\n  a: string;\n}\n";
    assert_eq!(
        run_in(
            &[(MAIN, text)],
            "A",
            ConvertAction::Replace,
            &ConverterConfig::default()
        ),
        Err(ConvertError::ImportBinding {
            module: "zod".to_string()
        })
    );
}

#[test]
fn converted_output_is_not_offered_again() {
    let text = "import * as z from \"zod\";\ninterface A {\n  a: string;\n}\n";
    let output = replace(text, "A");
    let program = Program::from_source(MAIN, &output);
    let root = program.root().unwrap();
    let inferred = output.find("type A").unwrap() as u32;
    assert!(code_actions(&program, root, inferred).is_empty());
}

#[test]
fn code_actions_for_declaration() {
    let text = "const x = 1;\nexport type Id = string;\n";
    let program = Program::from_source(MAIN, text);
    let root = program.root().unwrap();

    assert!(code_actions(&program, root, 2).is_empty());

    let actions = code_actions(&program, root, text.find("Id").unwrap() as u32);
    let titles: Vec<_> = actions.iter().map(|action| action.title).collect();
    assert_eq!(titles, vec![CONVERT_TITLE, REPLACE_TITLE]);
    assert_eq!(actions[0].action, ConvertAction::Generate);
    assert_eq!(actions[1].action, ConvertAction::Replace);
    assert!(actions.iter().all(|action| action.declaration_name == "Id"));
}

#[test]
fn config_accepts_string_spellings() {
    let config: ConverterConfig = serde_json::from_str(
        r#"{ "useNamespaceImport": "off", "errorTagPrecedence": "@message, error,," }"#,
    )
    .unwrap();
    assert!(!config.use_namespace_import);
    assert_eq!(config.error_tag_precedence, vec!["message", "error"]);
    assert_eq!(config.default_binding_name, "z");

    let err = serde_json::from_str::<ConverterConfig>(r#"{ "renderErrorMessages": "maybe" }"#);
    assert!(err.is_err());
}

#[test]
fn declaration_on_the_import_line() {
    let text = "import x from \"./x\"; interface Foo {\n  a: string;\n}\n";
    assert_eq!(
        replace(text, "Foo"),
        "import x from \"./x\"; import * as z from \"zod\";\nconst FooSchema = z.object({ a: z.string() });\n\ntype Foo = z.infer<typeof FooSchema>;\n"
    );
    assert_eq!(
        run_in(
            &[(MAIN, text)],
            "Foo",
            ConvertAction::Generate,
            &ConverterConfig::default()
        )
        .unwrap(),
        "import x from \"./x\"; import * as z from \"zod\";\ninterface Foo {\n  a: string;\n}\n\nconst FooSchema = z.object({ a: z.string() });\n\ntype Foo = z.infer<typeof FooSchema>;\n"
    );
}

#[test]
fn empty_enum_reference() {
    let text = "import * as z from \"zod\";\nenum Empty {}\ninterface Holder {\n  e: Empty;\n}\n";
    assert!(replace(text, "Holder").contains("z.object({ e: z.never() })"));
}
