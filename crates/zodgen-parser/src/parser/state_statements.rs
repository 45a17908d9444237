//! Parser state - top-level statements and declarations.

use super::state::ParserState;
use crate::ast::{
    EnumDeclaration, EnumInitializer, EnumMember, ExportClause, ExportDeclaration,
    ExportSpecifier, HeritageType, Identifier, ImportClause, ImportDeclaration, ImportSpecifier,
    InterfaceDeclaration, ModifierFlags, NamedImportBindings, PropertyName, Statement,
    StringLiteral, TypeAliasDeclaration,
};
use tracing::trace;
use zodgen_common::Span;
use zodgen_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use zodgen_scanner::{SyntaxKind, token_is_identifier_or_keyword};

impl ParserState {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> Statement {
        let start = self.token_pos();
        let jsdoc = self.leading_jsdoc();

        let token = self.current_token;
        match token {
            SyntaxKind::ImportKeyword if self.look_ahead_is_import_declaration() => {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword if self.look_ahead_is_export_declaration() => {
                self.parse_export_declaration()
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Statement::Other(self.span_from(start))
            }
            _ => {
                let modifiers = self.parse_modifiers();
                let declaration = matches!(
                    self.current_token,
                    SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword | SyntaxKind::EnumKeyword
                ) && self.next_token_is_identifier_on_same_line();
                match self.current_token {
                    SyntaxKind::InterfaceKeyword if declaration => Statement::Interface(
                        self.parse_interface_declaration(start, modifiers, jsdoc),
                    ),
                    SyntaxKind::TypeKeyword if declaration => Statement::TypeAlias(
                        self.parse_type_alias_declaration(start, modifiers, jsdoc),
                    ),
                    SyntaxKind::EnumKeyword if declaration => {
                        Statement::Enum(self.parse_enum_declaration(start, modifiers))
                    }
                    _ => self.skip_statement(start),
                }
            }
        }
    }

    /// Parse `export`, `default`, `declare` and `const` (before `enum`).
    fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut flags = ModifierFlags::empty();
        loop {
            let token = self.current_token;
            let flag = match token {
                SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
                SyntaxKind::DefaultKeyword if flags.contains(ModifierFlags::EXPORT) => {
                    ModifierFlags::DEFAULT
                }
                SyntaxKind::DeclareKeyword if self.look_ahead_is_modifier_target() => {
                    ModifierFlags::DECLARE
                }
                SyntaxKind::ConstKeyword if self.next_token_is(SyntaxKind::EnumKeyword) => {
                    ModifierFlags::CONST
                }
                _ => return flags,
            };
            flags |= flag;
            self.next_token();
        }
    }

    fn look_ahead_is_modifier_target(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && token_is_identifier_or_keyword(p.current_token)
        })
    }

    /// Skip a statement the generator does not model.
    ///
    /// Brackets are balanced; the statement ends at a `;` outside brackets,
    /// after a closed top-level block followed by a line break, or before a
    /// declaration keyword that starts a new line.
    fn skip_statement(&mut self, start: u32) -> Statement {
        let mut depth = 0u32;
        loop {
            let token = self.current_token;
            if token == SyntaxKind::EndOfFileToken {
                break;
            }
            self.next_token();
            match token {
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0
                        && token == SyntaxKind::CloseBraceToken
                        && (self.has_preceding_line_break()
                            || self.is_token(SyntaxKind::EndOfFileToken))
                    {
                        break;
                    }
                }
                SyntaxKind::SemicolonToken if depth == 0 => break,
                _ => {}
            }
            if depth == 0 && self.has_preceding_line_break() && self.is_declaration_start() {
                break;
            }
        }

        let span = self.span_from(start);
        // Regex literals and JSX are not scanned as such; anything the
        // scanner complained about inside skipped code is noise.
        self.scanner.discard_diagnostics_in(span.start, span.end);
        trace!(start = span.start, end = span.end, "skipped statement");
        Statement::Other(span)
    }

    fn is_declaration_start(&self) -> bool {
        matches!(
            self.current_token,
            SyntaxKind::ImportKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
        )
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    /// `import(...)` calls and `import.meta` are expressions.
    fn look_ahead_is_import_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            next != SyntaxKind::OpenParenToken && next != SyntaxKind::DotToken
        })
    }

    /// `export {`, `export *` and `export type {` start an export declaration.
    fn look_ahead_is_export_declaration(&mut self) -> bool {
        self.look_ahead(|p| match p.next_token() {
            SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
            SyntaxKind::TypeKeyword => matches!(
                p.next_token(),
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
            ),
            _ => false,
        })
    }

    pub(crate) fn parse_import_declaration(&mut self) -> Statement {
        let start = self.token_pos();
        self.next_token();

        // `import x = require("m")` and `import x = A.B` are not modeled.
        if self.is_identifier() && self.next_token_is(SyntaxKind::EqualsToken) {
            return self.skip_statement(start);
        }

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                let next = p.next_token();
                matches!(next, SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)
                    || (p.is_identifier() && next != SyntaxKind::FromKeyword)
            });
        if is_type_only {
            self.next_token();
        }

        let clause = if self.is_token(SyntaxKind::StringLiteral) {
            None
        } else {
            let clause = self.parse_import_clause();
            self.parse_expected(SyntaxKind::FromKeyword);
            Some(clause)
        };
        let module_specifier = self.parse_string_literal();
        self.skip_import_attributes();
        self.parse_semicolon();

        Statement::Import(ImportDeclaration {
            span: self.span_from(start),
            is_type_only,
            clause,
            module_specifier,
        })
    }

    fn parse_import_clause(&mut self) -> ImportClause {
        let mut default_binding = None;
        if self.is_identifier() {
            default_binding = Some(self.take_identifier());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                return ImportClause {
                    default_binding,
                    named_bindings: None,
                };
            }
        }

        let named_bindings = match self.current_token {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                self.parse_expected(SyntaxKind::AsKeyword);
                Some(NamedImportBindings::Namespace(self.parse_identifier()))
            }
            SyntaxKind::OpenBraceToken => Some(NamedImportBindings::Named(
                self.parse_named_specifiers(|span, is_type_only, property_name, name| {
                    ImportSpecifier {
                        span,
                        is_type_only,
                        property_name,
                        name,
                    }
                }),
            )),
            _ => {
                self.error_at_current(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                None
            }
        };

        ImportClause {
            default_binding,
            named_bindings,
        }
    }

    /// Parse `{ a, b as c, type d }` for both imports and exports.
    fn parse_named_specifiers<T>(
        &mut self,
        make: impl Fn(Span, bool, Option<Identifier>, Identifier) -> T,
    ) -> Vec<T> {
        let mut specifiers = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
                && self.look_ahead(|p| {
                    p.next_token();
                    (token_is_identifier_or_keyword(p.current_token)
                        || p.is_token(SyntaxKind::StringLiteral))
                        && !p.is_token(SyntaxKind::AsKeyword)
                });
            if is_type_only {
                self.next_token();
            }

            let Some(first) = self.parse_module_export_name() else {
                self.error_at_current(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                self.next_token();
                continue;
            };
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                let name = self
                    .parse_module_export_name()
                    .unwrap_or_else(|| self.parse_identifier());
                (Some(first), name)
            } else {
                (None, first)
            };
            specifiers.push(make(self.span_from(start), is_type_only, property_name, name));

            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        specifiers
    }

    /// Identifier, keyword or string literal naming an import or export.
    fn parse_module_export_name(&mut self) -> Option<Identifier> {
        if token_is_identifier_or_keyword(self.current_token)
            || self.is_token(SyntaxKind::StringLiteral)
        {
            Some(self.take_identifier())
        } else {
            None
        }
    }

    /// Skip `with { type: "json" }` / `assert { ... }`.
    fn skip_import_attributes(&mut self) {
        let is_attributes = !self.has_preceding_line_break()
            && (self.is_token(SyntaxKind::Identifier) && self.token_value() == "assert"
                || self.is_token(SyntaxKind::Identifier) && self.token_value() == "with");
        if !is_attributes {
            return;
        }
        self.next_token();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced();
        }
    }

    /// Skip a bracketed group starting at the current opening token.
    pub(crate) fn skip_balanced(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    pub(crate) fn parse_export_declaration(&mut self) -> Statement {
        let start = self.token_pos();
        self.next_token();
        let is_type_only = self.parse_optional(SyntaxKind::TypeKeyword);

        let clause = if self.parse_optional(SyntaxKind::AsteriskToken) {
            let alias = if self.parse_optional(SyntaxKind::AsKeyword) {
                self.parse_module_export_name()
            } else {
                None
            };
            ExportClause::Namespace(alias)
        } else {
            ExportClause::Named(self.parse_named_specifiers(
                |span, is_type_only, property_name, name| ExportSpecifier {
                    span,
                    is_type_only,
                    property_name,
                    name,
                },
            ))
        };

        let module_specifier: Option<StringLiteral> =
            if self.parse_optional(SyntaxKind::FromKeyword) {
                Some(self.parse_string_literal())
            } else {
                if matches!(clause, ExportClause::Namespace(_)) {
                    self.parse_expected(SyntaxKind::FromKeyword);
                }
                None
            };
        self.skip_import_attributes();
        self.parse_semicolon();

        Statement::Export(ExportDeclaration {
            span: self.span_from(start),
            is_type_only,
            clause,
            module_specifier,
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(crate) fn parse_interface_declaration(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        jsdoc: Vec<zodgen_common::JsDoc>,
    ) -> InterfaceDeclaration {
        self.next_token();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();

        let mut heritage = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                heritage.push(self.parse_heritage_type());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }

        let members = self.parse_object_type_members();
        let decl = InterfaceDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            type_parameters,
            heritage,
            members,
            jsdoc,
        };
        trace!(name = %decl.name.text, members = decl.members.len(), "interface");
        decl
    }

    fn parse_heritage_type(&mut self) -> HeritageType {
        let start = self.token_pos();
        let expression = self.parse_entity_name();
        let type_arguments = self.parse_type_arguments();
        HeritageType {
            span: self.span_from(start),
            expression,
            type_arguments,
        }
    }

    pub(crate) fn parse_type_alias_declaration(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        jsdoc: Vec<zodgen_common::JsDoc>,
    ) -> TypeAliasDeclaration {
        self.next_token();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let ty = self.parse_type();
        self.parse_semicolon();

        TypeAliasDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            type_parameters,
            ty,
            jsdoc,
        }
    }

    pub(crate) fn parse_enum_declaration(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
    ) -> EnumDeclaration {
        self.next_token();
        let name = self.parse_identifier();
        let mut members = Vec::new();

        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let Some(member) = self.parse_enum_member() else {
                    self.error_at_current(
                        diagnostic_messages::ENUM_MEMBER_EXPECTED,
                        diagnostic_codes::ENUM_MEMBER_EXPECTED,
                    );
                    self.next_token();
                    continue;
                };
                members.push(member);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        EnumDeclaration {
            span: self.span_from(start),
            modifiers,
            name,
            members,
        }
    }

    fn parse_enum_member(&mut self) -> Option<EnumMember> {
        let start = self.token_pos();
        let name = self.parse_property_name()?;
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_enum_initializer())
        } else {
            None
        };
        Some(EnumMember {
            span: self.span_from(start),
            name,
            initializer,
        })
    }

    /// A lone string or (negated) number is kept as a value; anything else
    /// is skipped up to the next `,` or `}` and kept as a span.
    fn parse_enum_initializer(&mut self) -> EnumInitializer {
        let start = self.token_pos();
        let simple = self.look_ahead(|p| {
            let negative = p.parse_optional(SyntaxKind::MinusToken);
            let value = match p.current_token {
                SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral
                    if !negative =>
                {
                    EnumInitializer::String(p.token_value().to_string())
                }
                SyntaxKind::NumericLiteral => {
                    let digits = p.token_value();
                    EnumInitializer::Number(if negative {
                        format!("-{digits}")
                    } else {
                        digits.to_string()
                    })
                }
                _ => return None,
            };
            p.next_token();
            matches!(
                p.current_token,
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
            )
            .then_some((value, p.token_pos()))
        });

        if let Some((value, end_pos)) = simple {
            while self.token_pos() < end_pos {
                self.next_token();
            }
            return value;
        }

        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken if depth == 0 => break,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.next_token();
        }
        EnumInitializer::Expression(self.span_from(start))
    }

    /// Identifier, keyword, string, number or computed `[expr]` name.
    pub(crate) fn parse_property_name(&mut self) -> Option<PropertyName> {
        let span = Span::new(self.token_pos(), self.token_end());
        let name = match self.current_token {
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                PropertyName::StringLiteral(StringLiteral {
                    span,
                    value: self.token_value().to_string(),
                })
            }
            SyntaxKind::NumericLiteral => PropertyName::NumericLiteral(StringLiteral {
                span,
                value: self.token_value().to_string(),
            }),
            SyntaxKind::OpenBracketToken => {
                let start = self.token_pos();
                self.skip_balanced();
                return Some(PropertyName::Computed(self.span_from(start)));
            }
            kind if token_is_identifier_or_keyword(kind) => {
                return Some(PropertyName::Identifier(self.take_identifier()));
            }
            _ => return None,
        };
        self.next_token();
        Some(name)
    }
}
