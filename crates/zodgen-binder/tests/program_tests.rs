//! Cross-file resolution through a `Program`.

use zodgen_binder::{FileId, Program, ResolvedKind, TypeResolver};
use zodgen_parser::Statement;

fn program(files: &[(&str, &str)]) -> (Program, FileId) {
    let mut program = Program::new();
    for (name, text) in files {
        program.add_source_file(name, text);
    }
    let root = program.root().expect("program has a root file");
    (program, root)
}

#[test]
fn resolves_local_declarations() {
    let (program, root) = program(&[(
        "/proj/a.ts",
        "interface User { id: string }\ninterface User { name: string }\ntype Id = string;\nenum Role { Admin, User }\n",
    )]);

    let user = program.resolve_type_reference(root, "User").unwrap();
    assert_eq!(user.file, root);
    assert!(matches!(user.kind, ResolvedKind::Interface(ref decls) if decls.len() == 2));

    let id = program.resolve_type_reference(root, "Id").unwrap();
    assert!(matches!(id.kind, ResolvedKind::TypeAlias(_)));

    let role = program.resolve_type_reference(root, "Role").unwrap();
    let ResolvedKind::Enum(decl) = role.kind else {
        panic!("expected enum");
    };
    assert_eq!(program.enum_members(decl), vec!["Admin", "User"]);

    assert!(program.resolve_type_reference(root, "Missing").is_none());
}

#[test]
fn follows_named_and_default_imports() {
    let (program, root) = program(&[
        (
            "/proj/src/form.ts",
            "import { Address as Addr } from './models/address';\nimport Settings from '../settings';\n",
        ),
        (
            "/proj/src/models/address.ts",
            "export interface Address { street: string }",
        ),
        (
            "/proj/settings.ts",
            "export default interface Settings { theme: string }",
        ),
    ]);

    let address = program.resolve_type_reference(root, "Addr").unwrap();
    assert_eq!(address.name, "Address");
    assert_eq!(address.file, program.file_id("/proj/src/models/address.ts").unwrap());

    let settings = program.resolve_type_reference(root, "Settings").unwrap();
    assert_eq!(settings.file, program.file_id("/proj/settings.ts").unwrap());
}

#[test]
fn follows_re_exports_and_index_files() {
    let (program, root) = program(&[
        ("/p/main.ts", "import { Role, Shared } from './lib';"),
        (
            "/p/lib/index.ts",
            "export { Role } from './roles';\nexport * from './shared';",
        ),
        ("/p/lib/roles.ts", "export enum Role { A }"),
        ("/p/lib/shared.ts", "export type Shared = { ok: boolean };"),
    ]);

    assert!(matches!(
        program.resolve_type_reference(root, "Role").map(|r| r.kind),
        Some(ResolvedKind::Enum(_))
    ));
    assert!(matches!(
        program.resolve_type_reference(root, "Shared").map(|r| r.kind),
        Some(ResolvedKind::TypeAlias(_))
    ));
}

#[test]
fn unexported_and_namespace_imports_do_not_resolve() {
    let (program, root) = program(&[
        (
            "/p/main.ts",
            "import { Hidden } from './lib';\nimport * as Lib from './lib';\nimport { z } from 'zod';",
        ),
        ("/p/lib.ts", "interface Hidden { a: string }"),
    ]);
    assert!(program.resolve_type_reference(root, "Hidden").is_none());
    assert!(program.resolve_type_reference(root, "Lib").is_none());
    assert!(program.resolve_type_reference(root, "z").is_none());
}

#[test]
fn import_cycles_terminate() {
    let (program, root) = program(&[
        ("/p/a.ts", "import { Loop } from './b';\nexport { Loop } from './b';"),
        ("/p/b.ts", "export { Loop } from './a';"),
    ]);
    assert!(program.resolve_type_reference(root, "Loop").is_none());
}

#[test]
fn declaration_at_includes_end_offset() {
    let source = "import * as z from 'zod';\ninterface A { a: string }\ntype B = A;";
    let (program, root) = program(&[("/p/a.ts", source)]);

    let start = source.find("interface").unwrap() as u32;
    let end = source.find('}').unwrap() as u32 + 1;
    assert!(matches!(program.declaration_at(root, start), Some(Statement::Interface(_))));
    assert!(matches!(program.declaration_at(root, end), Some(Statement::Interface(_))));
    assert!(program.declaration_at(root, 3).is_none());
    assert!(matches!(
        program.declaration_at(root, source.len() as u32),
        Some(Statement::TypeAlias(_))
    ));
}

#[test]
fn re_adding_a_file_keeps_its_id() {
    let mut program = Program::from_source("/p/a.ts", "interface A { a: string }");
    let root = program.root().unwrap();
    let again = program.add_source_file("/p/./a.ts", "type A = string;");
    assert_eq!(root, again);
    assert_eq!(program.len(), 1);
    assert!(matches!(
        program.resolve_type_reference(root, "A").map(|r| r.kind),
        Some(ResolvedKind::TypeAlias(_))
    ));
}
