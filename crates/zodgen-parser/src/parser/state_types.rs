//! Parser state - type syntax and type members.

use super::state::ParserState;
use crate::ast::{
    EntityName, IndexSignature, KeywordType, LiteralType, MappedType, MethodSignature, Parameter,
    PropertySignature, SignatureDeclaration, TupleElement, TypeElement, TypeKind, TypeNode,
    TypeOperator, TypeParameter,
};
use zodgen_common::Span;
use zodgen_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use zodgen_common::limits::MAX_TYPE_NESTING_DEPTH;
use zodgen_scanner::{SyntaxKind, token_is_identifier_or_keyword};

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// Parse a type: function types, unions, intersections and conditionals.
    pub(crate) fn parse_type(&mut self) -> TypeNode {
        if self.type_depth >= MAX_TYPE_NESTING_DEPTH {
            return self.type_expected();
        }
        self.type_depth += 1;
        let ty = self.parse_type_worker();
        self.type_depth -= 1;
        ty
    }

    fn parse_type_worker(&mut self) -> TypeNode {
        let start = self.token_pos();
        if self.is_start_of_function_type() {
            return self.parse_function_type(start, false);
        }
        if self.is_token(SyntaxKind::NewKeyword)
            || (self.is_token(SyntaxKind::AbstractKeyword)
                && self.next_token_is(SyntaxKind::NewKeyword))
        {
            self.parse_optional(SyntaxKind::AbstractKeyword);
            self.next_token();
            return self.parse_function_type(start, true);
        }

        let check = self.parse_union_type();
        if self.disallow_conditional_types
            || self.has_preceding_line_break()
            || !self.is_token(SyntaxKind::ExtendsKeyword)
        {
            return check;
        }

        self.next_token();
        let saved = self.disallow_conditional_types;
        self.disallow_conditional_types = true;
        let extends = self.parse_union_type();
        self.disallow_conditional_types = saved;

        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.parse_type();
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.parse_type();

        TypeNode::new(
            self.span_from(start),
            TypeKind::Conditional {
                check: Box::new(check),
                extends: Box::new(extends),
                true_type: Box::new(true_type),
                false_type: Box::new(false_type),
            },
        )
    }

    /// Parse a type where conditional types are allowed again, e.g. inside
    /// parentheses or brackets.
    fn parse_type_allowing_conditionals(&mut self) -> TypeNode {
        let saved = self.disallow_conditional_types;
        self.disallow_conditional_types = false;
        let ty = self.parse_type();
        self.disallow_conditional_types = saved;
        ty
    }

    fn type_expected(&mut self) -> TypeNode {
        self.error_at_current(
            diagnostic_messages::TYPE_EXPECTED,
            diagnostic_codes::TYPE_EXPECTED,
        );
        TypeNode::new(Span::at(self.token_pos()), TypeKind::Error)
    }

    fn parse_union_type(&mut self) -> TypeNode {
        self.parse_union_or_intersection(SyntaxKind::BarToken)
    }

    /// Parse `A | B | C` (or `A & B & C`). A leading operator is allowed.
    fn parse_union_or_intersection(&mut self, operator: SyntaxKind) -> TypeNode {
        let start = self.token_pos();
        let has_leading_operator = self.parse_optional(operator);
        let mut members = vec![self.parse_constituent(operator)];
        while self.parse_optional(operator) {
            members.push(self.parse_constituent(operator));
        }

        if members.len() == 1 && !has_leading_operator {
            return members.remove(0);
        }
        if members.len() == 1 {
            // `| A` is just `A`, but its span includes the operator.
            let mut only = members.remove(0);
            only.span = self.span_from(start);
            return only;
        }
        let kind = if operator == SyntaxKind::BarToken {
            TypeKind::Union(members)
        } else {
            TypeKind::Intersection(members)
        };
        TypeNode::new(self.span_from(start), kind)
    }

    fn parse_constituent(&mut self, operator: SyntaxKind) -> TypeNode {
        if operator == SyntaxKind::BarToken {
            self.parse_union_or_intersection(SyntaxKind::AmpersandToken)
        } else if self.is_start_of_function_type() {
            let start = self.token_pos();
            self.parse_function_type(start, false)
        } else {
            self.parse_type_operator()
        }
    }

    fn parse_type_operator(&mut self) -> TypeNode {
        let start = self.token_pos();
        let operator = match self.current_token {
            SyntaxKind::KeyOfKeyword => TypeOperator::KeyOf,
            SyntaxKind::ReadonlyKeyword => TypeOperator::Readonly,
            SyntaxKind::UniqueKeyword => TypeOperator::Unique,
            SyntaxKind::InferKeyword => {
                self.next_token();
                let name = self.parse_identifier();
                if self.is_token(SyntaxKind::ExtendsKeyword) && self.disallow_conditional_types {
                    // `infer U extends string` constraint.
                    self.next_token();
                    self.parse_type_operator();
                }
                return TypeNode::new(self.span_from(start), TypeKind::Infer(name));
            }
            _ => return self.parse_postfix_type(),
        };
        self.next_token();
        if self.type_depth >= MAX_TYPE_NESTING_DEPTH {
            return self.type_expected();
        }
        self.type_depth += 1;
        let ty = self.parse_type_operator();
        self.type_depth -= 1;
        TypeNode::new(
            self.span_from(start),
            TypeKind::Operator {
                operator,
                ty: Box::new(ty),
            },
        )
    }

    /// `T[]` and `T[K]`, which bind tighter than any operator.
    fn parse_postfix_type(&mut self) -> TypeNode {
        let start = self.token_pos();
        let mut ty = self.parse_non_array_type();
        let mut depth = self.type_depth;
        while !self.has_preceding_line_break() && self.is_token(SyntaxKind::OpenBracketToken) {
            if depth >= MAX_TYPE_NESTING_DEPTH {
                // Report once and drop the remaining suffixes unnested.
                if !matches!(ty.kind, TypeKind::Error) {
                    ty = self.type_expected();
                }
                self.next_token();
                if !self.parse_optional(SyntaxKind::CloseBracketToken) {
                    self.parse_type_allowing_conditionals();
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                }
                continue;
            }
            depth += 1;
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                ty = TypeNode::new(self.span_from(start), TypeKind::Array(Box::new(ty)));
            } else {
                let index = self.parse_type_allowing_conditionals();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                ty = TypeNode::new(
                    self.span_from(start),
                    TypeKind::IndexedAccess {
                        object: Box::new(ty),
                        index: Box::new(index),
                    },
                );
            }
        }
        ty
    }

    fn parse_non_array_type(&mut self) -> TypeNode {
        let start = self.token_pos();
        let keyword = match self.current_token {
            SyntaxKind::AnyKeyword => Some(KeywordType::Any),
            SyntaxKind::UnknownKeyword => Some(KeywordType::Unknown),
            SyntaxKind::StringKeyword => Some(KeywordType::String),
            SyntaxKind::NumberKeyword => Some(KeywordType::Number),
            SyntaxKind::BooleanKeyword => Some(KeywordType::Boolean),
            SyntaxKind::BigIntKeyword => Some(KeywordType::BigInt),
            SyntaxKind::SymbolKeyword => Some(KeywordType::Symbol),
            SyntaxKind::VoidKeyword => Some(KeywordType::Void),
            SyntaxKind::UndefinedKeyword => Some(KeywordType::Undefined),
            SyntaxKind::NullKeyword => Some(KeywordType::Null),
            SyntaxKind::NeverKeyword => Some(KeywordType::Never),
            SyntaxKind::ObjectKeyword => Some(KeywordType::Object),
            SyntaxKind::ThisKeyword => Some(KeywordType::This),
            _ => None,
        };
        // `string.Foo` is a qualified reference, not the keyword.
        if let Some(keyword) = keyword
            && !self.next_token_is(SyntaxKind::DotToken)
        {
            self.next_token();
            return TypeNode::new(self.span_from(start), TypeKind::Keyword(keyword));
        }

        let token = self.current_token;
        match token {
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                TypeNode::new(
                    self.span_from(start),
                    TypeKind::Literal(LiteralType::Boolean(value)),
                )
            }
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let value = self.token_value().to_string();
                self.next_token();
                TypeNode::new(
                    self.span_from(start),
                    TypeKind::Literal(LiteralType::String(value)),
                )
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_numeric_literal_type(start, false)
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|p| {
                    matches!(
                        p.next_token(),
                        SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
                    )
                }) =>
            {
                self.next_token();
                self.parse_numeric_literal_type(start, true)
            }
            SyntaxKind::TemplateLiteral => {
                let raw = self.token_value().to_string();
                self.next_token();
                TypeNode::new(self.span_from(start), TypeKind::TemplateLiteral(raw))
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let name = self.parse_entity_name();
                // `typeof f<T>` instantiation expressions keep their arguments
                // out of the model.
                self.parse_type_arguments();
                TypeNode::new(self.span_from(start), TypeKind::Query(name))
            }
            SyntaxKind::ImportKeyword => self.parse_import_type(start),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead_is_mapped_type() {
                    self.parse_mapped_type(start)
                } else {
                    let members = self.parse_object_type_members();
                    TypeNode::new(self.span_from(start), TypeKind::TypeLiteral(members))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(start),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type_allowing_conditionals();
                self.parse_expected(SyntaxKind::CloseParenToken);
                TypeNode::new(
                    self.span_from(start),
                    TypeKind::Parenthesized(Box::new(inner)),
                )
            }
            _ if self.is_identifier() || keyword.is_some() => {
                let name = self.parse_entity_name();
                let type_arguments = if self.has_preceding_line_break() {
                    Vec::new()
                } else {
                    self.parse_type_arguments()
                };
                TypeNode::new(
                    self.span_from(start),
                    TypeKind::Reference {
                        name,
                        type_arguments,
                    },
                )
            }
            _ => self.type_expected(),
        }
    }

    fn parse_numeric_literal_type(&mut self, start: u32, negative: bool) -> TypeNode {
        let sign = if negative { "-" } else { "" };
        let value = format!("{sign}{}", self.token_value());
        let literal = if self.is_token(SyntaxKind::BigIntLiteral) {
            LiteralType::BigInt(value)
        } else {
            LiteralType::Number(value)
        };
        self.next_token();
        TypeNode::new(self.span_from(start), TypeKind::Literal(literal))
    }

    fn parse_import_type(&mut self, start: u32) -> TypeNode {
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let module = self.parse_string_literal();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name())
        } else {
            None
        };
        let type_arguments = self.parse_type_arguments();
        TypeNode::new(
            self.span_from(start),
            TypeKind::Import {
                module,
                qualifier,
                type_arguments,
            },
        )
    }

    /// Parse `A` or `A.B.C`. Parts after a dot may be keywords.
    pub(crate) fn parse_entity_name(&mut self) -> EntityName {
        let start = self.token_pos();
        let first = if token_is_identifier_or_keyword(self.current_token) {
            self.take_identifier()
        } else {
            self.parse_identifier()
        };
        let mut parts = vec![first];
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            if token_is_identifier_or_keyword(self.current_token) {
                parts.push(self.take_identifier());
            } else {
                parts.push(self.parse_identifier());
                break;
            }
        }
        EntityName {
            span: self.span_from(start),
            parts,
        }
    }

    /// Parse `<A, B>` if present.
    pub(crate) fn parse_type_arguments(&mut self) -> Vec<TypeNode> {
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return Vec::new();
        }
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            arguments.push(self.parse_type_allowing_conditionals());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        arguments
    }

    /// Parse `<T extends C = D, U>` if present.
    pub(crate) fn parse_type_parameters(&mut self) -> Vec<TypeParameter> {
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return Vec::new();
        }
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            // `const T`, `in T`, `out T` variance and const modifiers.
            while (matches!(
                self.current_token,
                SyntaxKind::ConstKeyword | SyntaxKind::InKeyword
            ) || (self.is_token(SyntaxKind::Identifier) && self.token_value() == "out"))
                && self.next_token_is_identifier_on_same_line()
            {
                self.next_token();
            }
            let name = self.parse_identifier();
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                Some(self.parse_type())
            } else {
                None
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_type())
            } else {
                None
            };
            let missing = name.is_missing();
            parameters.push(TypeParameter {
                span: self.span_from(start),
                name,
                constraint,
                default,
            });
            if missing && !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        parameters
    }

    // =========================================================================
    // Function types
    // =========================================================================

    /// `<T>(...) =>` or `(...) =>`, as opposed to a parenthesized type.
    fn is_start_of_function_type(&mut self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        self.is_token(SyntaxKind::OpenParenToken)
            && self.look_ahead(|p| p.is_unambiguously_start_of_function_type())
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if self.is_token(SyntaxKind::CloseParenToken) || self.is_token(SyntaxKind::DotDotDotToken)
        {
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.current_token,
                SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.is_token(SyntaxKind::CloseParenToken) {
                self.next_token();
                return self.is_token(SyntaxKind::EqualsGreaterThanToken);
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if token_is_identifier_or_keyword(self.current_token) {
            self.next_token();
            return true;
        }
        if self.is_token(SyntaxKind::OpenBracketToken) || self.is_token(SyntaxKind::OpenBraceToken)
        {
            self.skip_balanced();
            return true;
        }
        false
    }

    fn parse_function_type(&mut self, start: u32, is_constructor: bool) -> TypeNode {
        let signature_start = self.token_pos();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_return_type();
        TypeNode::new(
            self.span_from(start),
            TypeKind::Function {
                is_constructor,
                signature: SignatureDeclaration {
                    span: self.span_from(signature_start),
                    type_parameters,
                    parameters,
                    return_type: Some(Box::new(return_type)),
                },
            },
        )
    }

    /// A return type, which may be a type predicate.
    fn parse_return_type(&mut self) -> TypeNode {
        let start = self.token_pos();
        let asserts = self.is_token(SyntaxKind::AssertsKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword))
            });
        if asserts {
            self.next_token();
        }
        let is_predicate = (self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::IsKeyword) && !p.has_preceding_line_break()
            });

        if asserts || is_predicate {
            let parameter = self.take_identifier();
            let ty = if self.parse_optional(SyntaxKind::IsKeyword) {
                Some(Box::new(self.parse_type()))
            } else {
                None
            };
            return TypeNode::new(
                self.span_from(start),
                TypeKind::Predicate {
                    asserts,
                    parameter,
                    ty,
                },
            );
        }
        self.parse_type()
    }

    pub(crate) fn parse_parameters(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return parameters;
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name_start = self.token_pos();
            if !self.skip_parameter_start() {
                self.error_at_current(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                break;
            }
            let name = self
                .scanner
                .source_text()
                .get(name_start as usize..self.prev_token_end as usize)
                .unwrap_or("")
                .to_string();
            let question = self.parse_optional(SyntaxKind::QuestionToken);
            let ty = if self.parse_optional(SyntaxKind::ColonToken) {
                Some(self.parse_type())
            } else {
                None
            };
            parameters.push(Parameter {
                span: self.span_from(start),
                name,
                rest,
                question,
                ty,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    fn parse_signature(&mut self, start: u32) -> SignatureDeclaration {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_return_type()))
        } else {
            None
        };
        SignatureDeclaration {
            span: self.span_from(start),
            type_parameters,
            parameters,
            return_type,
        }
    }

    // =========================================================================
    // Object types
    // =========================================================================

    /// Parse `{ member; member, member }` for interfaces and type literals.
    pub(crate) fn parse_object_type_members(&mut self) -> Vec<TypeElement> {
        let mut members = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            match self.parse_type_member() {
                Some(member) => members.push(member),
                None => {
                    self.error_at_current(
                        diagnostic_messages::PROPERTY_OR_SIGNATURE_EXPECTED,
                        diagnostic_codes::PROPERTY_OR_SIGNATURE_EXPECTED,
                    );
                    self.next_token();
                    continue;
                }
            }
            if !self.parse_optional(SyntaxKind::SemicolonToken)
                && !self.parse_optional(SyntaxKind::CommaToken)
                && !self.can_parse_semicolon()
            {
                self.parse_expected(SyntaxKind::SemicolonToken);
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    fn parse_type_member(&mut self) -> Option<TypeElement> {
        let start = self.token_pos();
        let jsdoc = self.leading_jsdoc();

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            return Some(TypeElement::CallSignature(self.parse_signature(start)));
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead(|p| {
                matches!(
                    p.next_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            })
        {
            self.next_token();
            return Some(TypeElement::ConstructSignature(self.parse_signature(start)));
        }

        let readonly = self.is_token(SyntaxKind::ReadonlyKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_property_name()
            });
        if readonly {
            self.next_token();
        }

        if self.is_token(SyntaxKind::OpenBracketToken) && self.look_ahead_is_index_signature() {
            return Some(TypeElement::Index(self.parse_index_signature(start, readonly)));
        }

        // `get name(): T` / `set name(v: T)` accessors read like methods.
        if self.is_token(SyntaxKind::Identifier)
            && matches!(self.token_value(), "get" | "set")
            && self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_property_name()
            })
        {
            self.next_token();
        }

        let name = self.parse_property_name()?;
        let question = self.parse_optional(SyntaxKind::QuestionToken);

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            let signature_start = self.token_pos();
            let signature = self.parse_signature(signature_start);
            return Some(TypeElement::Method(MethodSignature {
                span: self.span_from(start),
                name,
                question,
                signature,
            }));
        }

        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type())
        } else {
            None
        };
        Some(TypeElement::Property(PropertySignature {
            span: self.span_from(start),
            readonly,
            name,
            question,
            ty,
            jsdoc,
        }))
    }

    fn is_start_of_property_name(&self) -> bool {
        token_is_identifier_or_keyword(self.current_token)
            || matches!(
                self.current_token,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// `[name: K]` as opposed to a computed property name `[expr]`.
    fn look_ahead_is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !token_is_identifier_or_keyword(p.current_token) {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    fn parse_index_signature(&mut self, start: u32, readonly: bool) -> IndexSignature {
        self.next_token();
        let parameter = self.take_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let key_type = self.parse_type();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()))
        } else {
            None
        };
        IndexSignature {
            span: self.span_from(start),
            readonly,
            parameter,
            key_type: Box::new(key_type),
            ty,
        }
    }

    /// `{ [K in C]: T }`, optionally with `readonly`/`+readonly`/`-readonly`.
    fn look_ahead_is_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::PlusToken) || p.is_token(SyntaxKind::MinusToken) {
                return p.next_token() == SyntaxKind::ReadonlyKeyword;
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            if !p.is_token(SyntaxKind::OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !token_is_identifier_or_keyword(p.current_token) {
                return false;
            }
            p.next_token() == SyntaxKind::InKeyword
        })
    }

    fn parse_mapped_type(&mut self, start: u32) -> TypeNode {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut readonly = false;
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            readonly = self.is_token(SyntaxKind::PlusToken);
            self.next_token();
            self.parse_expected(SyntaxKind::ReadonlyKeyword);
        } else if self.parse_optional(SyntaxKind::ReadonlyKeyword) {
            readonly = true;
        }

        self.parse_expected(SyntaxKind::OpenBracketToken);
        let type_parameter = self.take_identifier();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(Box::new(self.parse_type()))
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let mut question = false;
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            question = self.is_token(SyntaxKind::PlusToken);
            self.next_token();
            self.parse_expected(SyntaxKind::QuestionToken);
        } else if self.parse_optional(SyntaxKind::QuestionToken) {
            question = true;
        }

        let ty = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()))
        } else {
            None
        };
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.parse_optional(SyntaxKind::CommaToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);

        TypeNode::new(
            self.span_from(start),
            TypeKind::Mapped(MappedType {
                readonly,
                type_parameter,
                constraint: Box::new(constraint),
                name_type,
                question,
                ty,
            }),
        )
    }

    fn parse_tuple_type(&mut self, start: u32) -> TypeNode {
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let is_named = token_is_identifier_or_keyword(self.current_token)
                && self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(SyntaxKind::ColonToken)
                        || (p.is_token(SyntaxKind::QuestionToken)
                            && p.next_token() == SyntaxKind::ColonToken)
                });

            let mut optional = false;
            let name = if is_named {
                let name = self.take_identifier();
                optional = self.parse_optional(SyntaxKind::QuestionToken);
                self.parse_expected(SyntaxKind::ColonToken);
                Some(name)
            } else {
                None
            };
            let ty = self.parse_type_allowing_conditionals();
            if !is_named {
                optional = self.parse_optional(SyntaxKind::QuestionToken);
            }
            elements.push(TupleElement {
                span: Span::new(element_start, self.prev_token_end),
                name,
                optional,
                rest,
                ty,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        TypeNode::new(self.span_from(start), TypeKind::Tuple(elements))
    }
}
