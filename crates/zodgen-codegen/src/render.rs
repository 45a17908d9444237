//! Rendering emitted declarations into replacement text.

use zodgen_common::Span;

use crate::config::FormatOptions;
use crate::emitter::Declaration;
use crate::printer::SchemaPrinter;
use crate::type_node::DeclarationNode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Exactly the span of the converted declaration.
    pub replacement_span: Span,
}

/// Print `declarations` separated by one blank line. Each ends with `;`;
/// the text has no trailing newline.
#[must_use]
pub fn render_declarations(declarations: &[Declaration], format: &FormatOptions) -> String {
    let mut printer = SchemaPrinter::new(format);
    for (index, declaration) in declarations.iter().enumerate() {
        if index > 0 {
            printer.write_line();
            printer.write_line();
        }
        printer.emit_declaration(declaration);
    }
    printer.finish()
}

#[must_use]
pub fn render(
    target: &DeclarationNode,
    declarations: &[Declaration],
    format: &FormatOptions,
) -> Rendered {
    Rendered {
        text: render_declarations(declarations, format),
        replacement_span: target.span,
    }
}
