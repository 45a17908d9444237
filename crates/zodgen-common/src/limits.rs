//! Centralized limits and thresholds.
//!
//! Recursion depths and size caps shared by the parser, the lowering pass and
//! the filesystem host live here so they stay consistent across crates.

/// Maximum nesting depth of type syntax the parser descends into.
///
/// Beyond this depth the parser reports "Type expected." and stops nesting,
/// which keeps adversarial input from overflowing the stack.
///
/// ```typescript
/// type Deep = ((((((((((((((((string))))))))))))))));   // fine
/// type Bad = { a: { a: { a: /* ... 150 levels ... */ } } };
/// ```
pub const MAX_TYPE_NESTING_DEPTH: u32 = 100;

/// Maximum depth for lowering a type into the schema tree.
///
/// Every followed reference and nested object adds a level. Cycles are caught
/// separately by the lowering pass; this bounds long acyclic chains.
///
/// ```typescript
/// interface A { b: B }
/// interface B { c: C }
/// // ... hundreds of distinct interfaces referencing the next one
/// ```
pub const MAX_LOWERING_DEPTH: u32 = 128;

/// Maximum number of hops when following re-exported import bindings.
///
/// ```typescript
/// // a.ts: import { User } from './b';   b.ts: export { User } from './c'; ...
/// ```
pub const MAX_IMPORT_HOPS: u32 = 16;

/// Maximum number of files the filesystem host loads into one program.
pub const MAX_PROGRAM_FILES: usize = 256;
