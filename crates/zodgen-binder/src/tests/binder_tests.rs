//! Tests for symbol binding of a single file.

use crate::{BinderState, ExportTarget, symbol_flags};
use zodgen_parser::parse_source;

fn bind(source: &str) -> BinderState {
    BinderState::bind_source_file(&parse_source("test.ts", source))
}

#[test]
fn test_declarations_in_source_order() {
    let binder = bind(
        "enum Role { Admin }\ninterface User { id: string }\ntype Id = string;\nconst x = 1;\n",
    );
    let names: Vec<_> = binder.type_names().collect();
    assert_eq!(names, vec!["Role", "User", "Id"]);

    let user = binder.get_symbol("User").unwrap();
    assert!(user.has_flags(symbol_flags::INTERFACE));
    assert_eq!(user.declarations, vec![1]);
    assert!(!user.has_flags(symbol_flags::EXPORTED));
    assert!(binder.get_symbol("x").is_none());
}

#[test]
fn test_interfaces_merge() {
    let binder = bind("interface A { a: string }\ntype B = A;\ninterface A { b: number }\n");
    let symbol = binder.get_symbol("A").unwrap();
    assert_eq!(symbol.declarations, vec![0, 2]);
    assert_eq!(binder.symbols().len(), 2);
}

#[test]
fn test_const_enum_flags() {
    let binder = bind("export const enum Color { Red }");
    let symbol = binder.get_symbol("Color").unwrap();
    assert!(symbol.has_flags(symbol_flags::CONST_ENUM));
    assert!(symbol.has_flags(symbol_flags::EXPORTED));
    assert_eq!(
        binder.get_export("Color"),
        Some(&ExportTarget::Local("Color".to_string()))
    );
}

#[test]
fn test_import_bindings() {
    let binder = bind(
        r#"
import * as z from "zod";
import Base from "./base";
import { User, Admin as Root, type Role } from "./users";
import type { Audit } from "./audit";
import "./polyfill";
"#,
    );

    let z = binder.get_symbol("z").unwrap();
    assert!(z.is_alias());
    assert_eq!(z.import_module.as_deref(), Some("zod"));
    assert_eq!(z.import_name, None);

    let base = binder.get_symbol("Base").unwrap();
    assert_eq!(base.import_name.as_deref(), Some("default"));

    let root = binder.get_symbol("Root").unwrap();
    assert_eq!(root.import_name.as_deref(), Some("Admin"));
    assert_eq!(root.import_module.as_deref(), Some("./users"));
    assert!(!root.has_flags(symbol_flags::TYPE_ONLY));

    assert!(binder.get_symbol("Role").unwrap().has_flags(symbol_flags::TYPE_ONLY));
    assert!(binder.get_symbol("Audit").unwrap().has_flags(symbol_flags::TYPE_ONLY));
    assert!(binder.get_symbol("Admin").is_none());
    assert_eq!(binder.type_names().count(), 0);
}

#[test]
fn test_export_table() {
    let binder = bind(
        r#"
interface User { id: string }
export default interface Settings { theme: string }
export { User as Account };
export { Role } from "./roles";
export * from "./shared";
export * as ns from "./ns";
"#,
    );
    assert_eq!(
        binder.get_export("Account"),
        Some(&ExportTarget::Local("User".to_string()))
    );
    assert_eq!(
        binder.get_export("default"),
        Some(&ExportTarget::Local("Settings".to_string()))
    );
    assert_eq!(
        binder.get_export("Role"),
        Some(&ExportTarget::ReExport {
            module: "./roles".to_string(),
            name: "Role".to_string(),
        })
    );
    assert_eq!(binder.star_exports(), ["./shared".to_string()]);
    assert!(binder.get_export("ns").is_none());
}
