//! Printer for schema expressions and declarations.
//!
//! Output is deterministic. Array and object literals stay on one line
//! when the rest of the line fits within `max_line_width`; otherwise they
//! break one element per line with a trailing comma, indented one level
//! deeper than the line that opened them. A long call with a single
//! argument breaks inside that argument; a long call with several
//! arguments puts each argument on its own line first.

use std::fmt::Write as _;

use zodgen_scanner::char_codes::is_identifier_text;

use crate::config::FormatOptions;
use crate::emitter::Declaration;
use crate::schema::{SchemaExpr, SchemaProperty};

pub struct SchemaPrinter {
    output: String,
    indent_str: String,
    indent_level: usize,
    new_line: &'static str,
    max_line_width: usize,
    /// Characters written since the last line break.
    column: usize,
}

impl SchemaPrinter {
    #[must_use]
    pub fn new(options: &FormatOptions) -> Self {
        SchemaPrinter {
            output: String::new(),
            indent_str: " ".repeat(options.indent_width as usize),
            indent_level: 0,
            new_line: options.new_line.as_str(),
            max_line_width: options.max_line_width as usize,
            column: 0,
        }
    }

    /// Print an expression with default options.
    #[must_use]
    pub fn emit_to_string(expr: &SchemaExpr) -> String {
        let mut printer = SchemaPrinter::new(&FormatOptions::default());
        printer.emit_expr(expr, 0);
        printer.finish()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }

    pub fn emit_declaration(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::SchemaConst {
                exported,
                name,
                initializer,
            } => {
                if *exported {
                    self.write("export ");
                }
                self.write("const ");
                self.write(name);
                self.write(" = ");
                self.emit_expr(initializer, 1);
                self.write(";");
            }
            Declaration::InferredType {
                exported,
                name,
                binding,
                schema_name,
            } => {
                if *exported {
                    self.write("export ");
                }
                self.write("type ");
                self.write(name);
                self.write(" = ");
                self.write(binding);
                self.write(".infer<typeof ");
                self.write(schema_name);
                self.write(">;");
            }
        }
    }

    /// Emit `expr`, knowing that `suffix` more characters follow it on the
    /// same line.
    pub fn emit_expr(&mut self, expr: &SchemaExpr, suffix: usize) {
        match expr {
            SchemaExpr::Identifier(name) => self.write(name),
            SchemaExpr::StringLiteral(value) => self.write_quoted(value),
            SchemaExpr::NumericLiteral(value) => self.write(value),
            SchemaExpr::BigIntLiteral(value) => {
                self.write(value);
                self.write("n");
            }
            SchemaExpr::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            SchemaExpr::ArrayLiteral(elements) => self.emit_array(expr, elements, suffix),
            SchemaExpr::ObjectLiteral(properties) => self.emit_object(expr, properties, suffix),
            SchemaExpr::MethodCall {
                receiver,
                method,
                arguments,
            } => {
                self.emit_expr(receiver, 0);
                self.write(".");
                self.write(method);
                // `(...)` printed flat.
                let flat_args = flat_width(expr) - flat_width(receiver) - method.len() - 1;
                if arguments.len() > 1 && self.column + flat_args + suffix > self.max_line_width {
                    self.emit_broken_arguments(arguments);
                    return;
                }
                self.write("(");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    let rest: usize = arguments[index + 1..]
                        .iter()
                        .map(|arg| flat_width(arg) + 2)
                        .sum();
                    self.emit_expr(argument, rest + 1 + suffix);
                }
                self.write(")");
            }
            SchemaExpr::ChainedModifier { base, modifier } => {
                self.emit_expr(base, suffix + modifier.len() + 3);
                self.write(".");
                self.write(modifier);
                self.write("()");
            }
        }
    }

    /// One argument per line with a trailing comma.
    fn emit_broken_arguments(&mut self, arguments: &[SchemaExpr]) {
        self.write("(");
        self.increase_indent();
        for argument in arguments {
            self.write_line();
            self.write_indent();
            self.emit_expr(argument, 1);
            self.write(",");
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write(")");
    }

    fn emit_array(&mut self, expr: &SchemaExpr, elements: &[SchemaExpr], suffix: usize) {
        if elements.is_empty() {
            self.write("[]");
            return;
        }
        if self.try_emit_flat(expr, suffix) {
            return;
        }
        self.write("[");
        self.increase_indent();
        for element in elements {
            self.write_line();
            self.write_indent();
            self.emit_expr(element, 1);
            self.write(",");
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write("]");
    }

    fn emit_object(&mut self, expr: &SchemaExpr, properties: &[SchemaProperty], suffix: usize) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        if self.try_emit_flat(expr, suffix) {
            return;
        }
        self.write("{");
        self.increase_indent();
        for property in properties {
            self.write_line();
            self.write_indent();
            self.write_property_key(&property.key);
            self.write(": ");
            self.emit_expr(&property.value, 1);
            self.write(",");
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write("}");
    }

    fn try_emit_flat(&mut self, expr: &SchemaExpr, suffix: usize) -> bool {
        let mut flat = String::new();
        write_flat(&mut flat, expr);
        if self.column + flat.chars().count() + suffix <= self.max_line_width {
            self.write(&flat);
            true
        } else {
            false
        }
    }

    fn write_property_key(&mut self, key: &str) {
        let mut out = String::new();
        push_property_key(&mut out, key);
        self.write(&out);
    }

    fn write_quoted(&mut self, value: &str) {
        let mut out = String::new();
        push_quoted(&mut out, value);
        self.write(&out);
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
        self.column += s.chars().count();
    }

    pub fn write_line(&mut self) {
        self.output.push_str(self.new_line);
        self.column = 0;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_str);
            self.column += self.indent_str.len();
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Width of `expr` printed on a single line.
fn flat_width(expr: &SchemaExpr) -> usize {
    let mut out = String::new();
    write_flat(&mut out, expr);
    out.chars().count()
}

fn write_flat(out: &mut String, expr: &SchemaExpr) {
    match expr {
        SchemaExpr::Identifier(name) => out.push_str(name),
        SchemaExpr::StringLiteral(value) => push_quoted(out, value),
        SchemaExpr::NumericLiteral(value) => out.push_str(value),
        SchemaExpr::BigIntLiteral(value) => {
            out.push_str(value);
            out.push('n');
        }
        SchemaExpr::BooleanLiteral(value) => out.push_str(if *value { "true" } else { "false" }),
        SchemaExpr::ArrayLiteral(elements) => {
            out.push('[');
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_flat(out, element);
            }
            out.push(']');
        }
        SchemaExpr::ObjectLiteral(properties) => {
            if properties.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (index, property) in properties.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                push_property_key(out, &property.key);
                out.push_str(": ");
                write_flat(out, &property.value);
            }
            out.push_str(" }");
        }
        SchemaExpr::MethodCall {
            receiver,
            method,
            arguments,
        } => {
            write_flat(out, receiver);
            out.push('.');
            out.push_str(method);
            out.push('(');
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_flat(out, argument);
            }
            out.push(')');
        }
        SchemaExpr::ChainedModifier { base, modifier } => {
            write_flat(out, base);
            out.push('.');
            out.push_str(modifier);
            out.push_str("()");
        }
    }
}

/// Identifier keys print bare; anything else is quoted.
fn push_property_key(out: &mut String, key: &str) {
    if is_identifier_text(key) {
        out.push_str(key);
    } else {
        push_quoted(out, key);
    }
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 || c == '\x7F' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;
