//! Whole-program runs through the command-line driver.

use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use zodgen::cli::args::CliArgs;
use zodgen::cli::driver::run;

fn write(root: &Path, name: &str, text: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["zodgen"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).unwrap()
}

#[test]
fn converts_across_modules_with_project_config() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "zodgen.json",
        r#"{ "defaultBindingName": "v", "useNamespaceImport": false, "errorTagPrecedence": ["message"] }"#,
    );
    write(
        root,
        "src/roles.ts",
        "export enum Role {\n  Admin,\n  Member,\n}\n",
    );
    write(root, "src/models/index.ts", "export * from \"./ids\";\n");
    write(root, "src/models/ids.ts", "export type UserId = string;\n");
    write(
        root,
        "src/user.ts",
        concat!(
            "import { Role } from \"./roles\";\n",
            "import type { UserId } from \"./models\";\n",
            "\n",
            "export interface User {\n",
            "  id: UserId;\n",
            "  /** @message Pick a role */\n",
            "  role: Role;\n",
            "}\n",
        ),
    );

    let result = run(&args(&["-l", "4", "-c", "18", "-a", "replace", "src/user.ts"]), root).unwrap();
    assert!(result.is_success());
    assert_eq!(
        result.output,
        concat!(
            "import { Role } from \"./roles\";\n",
            "import type { UserId } from \"./models\";\n",
            "import v from \"zod\";\n",
            "\n",
            "export const UserSchema = v.object({\n",
            "  id: v.string(),\n",
            "  role: v.enum([\"Admin\", \"Member\"], { message: \"Pick a role\" }),\n",
            "});\n",
            "\n",
            "export type User = v.infer<typeof UserSchema>;\n",
        )
    );
}

#[test]
fn rerunning_on_written_output_finds_nothing_new() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.ts", "type Point = { x: number; y: number };\n");

    let first = run(&args(&["--offset", "0", "-a", "replace", "-w", "a.ts"]), root).unwrap();
    assert!(first.written.is_some());
    let text = fs::read_to_string(root.join("a.ts")).unwrap();
    assert_eq!(
        text,
        "import * as z from \"zod\";\nconst PointSchema = z.object({ x: z.number(), y: z.number() });\n\ntype Point = z.infer<typeof PointSchema>;\n"
    );

    let listed = run(&args(&["--list", "a.ts"]), root).unwrap();
    assert_eq!(listed.output, "");
}
