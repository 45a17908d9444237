//! Recursive-descent parser.
//!
//! Split the way the syntax is: `state` holds token handling and
//! diagnostics, `state_statements` top-level declarations, and `state_types`
//! type syntax and object type members.

mod state;
mod state_statements;
mod state_types;

pub use state::ParserState;

#[cfg(test)]
#[path = "tests/statement_tests.rs"]
mod statement_tests;

#[cfg(test)]
#[path = "tests/type_tests.rs"]
mod type_tests;
