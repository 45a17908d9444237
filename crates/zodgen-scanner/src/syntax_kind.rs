use serde::Serialize;

/// Token kinds produced by the scanner.
///
/// Only the tokens the declaration parser distinguishes get their own kind.
/// Operators it never inspects (`%`, `^`, `~`, compound assignments, ...)
/// come back as [`SyntaxKind::OtherPunctuation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    /// A template literal containing `${...}` substitutions, scanned whole.
    TemplateLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    AmpersandToken,
    BarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    HashToken,
    ExclamationToken,
    OtherPunctuation,

    // Identifiers
    Identifier,

    // Reserved words
    ClassKeyword,
    ConstKeyword,
    DefaultKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FunctionKeyword,
    ImportKeyword,
    InKeyword,
    NewKeyword,
    NullKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,

    // Strict mode reserved words
    InterfaceKeyword,
    LetKeyword,

    // Contextual keywords
    AbstractKeyword,
    AnyKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    BigIntKeyword,
    BooleanKeyword,
    DeclareKeyword,
    FromKeyword,
    GlobalKeyword,
    InferKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    ReadonlyKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ClassKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::UnknownKeyword;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::ClassKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::VoidKeyword;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::OtherPunctuation;
    pub const FIRST_LITERAL: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL: SyntaxKind = SyntaxKind::TemplateLiteral;
}

#[must_use]
pub fn token_is_keyword(token: SyntaxKind) -> bool {
    (SyntaxKind::FIRST_KEYWORD as u16..=SyntaxKind::LAST_KEYWORD as u16).contains(&(token as u16))
}

/// Reserved words cannot be used as type or binding names.
#[must_use]
pub fn token_is_reserved_word(token: SyntaxKind) -> bool {
    (SyntaxKind::FIRST_RESERVED_WORD as u16..=SyntaxKind::LAST_RESERVED_WORD as u16)
        .contains(&(token as u16))
}

/// Identifiers and contextual keywords can name a type or binding.
#[must_use]
pub fn token_is_identifier(token: SyntaxKind) -> bool {
    token == SyntaxKind::Identifier || (token_is_keyword(token) && !token_is_reserved_word(token))
}

#[must_use]
pub fn token_is_identifier_or_keyword(token: SyntaxKind) -> bool {
    token == SyntaxKind::Identifier || token_is_keyword(token)
}

#[must_use]
pub fn token_is_punctuation(token: SyntaxKind) -> bool {
    (SyntaxKind::FIRST_PUNCTUATION as u16..=SyntaxKind::LAST_PUNCTUATION as u16)
        .contains(&(token as u16))
}

#[must_use]
pub fn token_is_literal(token: SyntaxKind) -> bool {
    (SyntaxKind::FIRST_LITERAL as u16..=SyntaxKind::LAST_LITERAL as u16).contains(&(token as u16))
}

/// Look up the keyword kind for identifier text.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "export" => SyntaxKind::ExportKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "in" => SyntaxKind::InKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "let" => SyntaxKind::LetKeyword,
        "abstract" => SyntaxKind::AbstractKeyword,
        "any" => SyntaxKind::AnyKeyword,
        "as" => SyntaxKind::AsKeyword,
        "asserts" => SyntaxKind::AssertsKeyword,
        "async" => SyntaxKind::AsyncKeyword,
        "bigint" => SyntaxKind::BigIntKeyword,
        "boolean" => SyntaxKind::BooleanKeyword,
        "declare" => SyntaxKind::DeclareKeyword,
        "from" => SyntaxKind::FromKeyword,
        "global" => SyntaxKind::GlobalKeyword,
        "infer" => SyntaxKind::InferKeyword,
        "is" => SyntaxKind::IsKeyword,
        "keyof" => SyntaxKind::KeyOfKeyword,
        "module" => SyntaxKind::ModuleKeyword,
        "namespace" => SyntaxKind::NamespaceKeyword,
        "never" => SyntaxKind::NeverKeyword,
        "number" => SyntaxKind::NumberKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "string" => SyntaxKind::StringKeyword,
        "symbol" => SyntaxKind::SymbolKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "undefined" => SyntaxKind::UndefinedKeyword,
        "unique" => SyntaxKind::UniqueKeyword,
        "unknown" => SyntaxKind::UnknownKeyword,
        _ => return None,
    };
    Some(kind)
}

#[must_use]
pub fn keyword_to_text(token: SyntaxKind) -> Option<&'static str> {
    let text = match token {
        SyntaxKind::ClassKeyword => "class",
        SyntaxKind::ConstKeyword => "const",
        SyntaxKind::DefaultKeyword => "default",
        SyntaxKind::EnumKeyword => "enum",
        SyntaxKind::ExportKeyword => "export",
        SyntaxKind::ExtendsKeyword => "extends",
        SyntaxKind::FalseKeyword => "false",
        SyntaxKind::FunctionKeyword => "function",
        SyntaxKind::ImportKeyword => "import",
        SyntaxKind::InKeyword => "in",
        SyntaxKind::NewKeyword => "new",
        SyntaxKind::NullKeyword => "null",
        SyntaxKind::ThisKeyword => "this",
        SyntaxKind::TrueKeyword => "true",
        SyntaxKind::TypeOfKeyword => "typeof",
        SyntaxKind::VarKeyword => "var",
        SyntaxKind::VoidKeyword => "void",
        SyntaxKind::InterfaceKeyword => "interface",
        SyntaxKind::LetKeyword => "let",
        SyntaxKind::AbstractKeyword => "abstract",
        SyntaxKind::AnyKeyword => "any",
        SyntaxKind::AsKeyword => "as",
        SyntaxKind::AssertsKeyword => "asserts",
        SyntaxKind::AsyncKeyword => "async",
        SyntaxKind::BigIntKeyword => "bigint",
        SyntaxKind::BooleanKeyword => "boolean",
        SyntaxKind::DeclareKeyword => "declare",
        SyntaxKind::FromKeyword => "from",
        SyntaxKind::GlobalKeyword => "global",
        SyntaxKind::InferKeyword => "infer",
        SyntaxKind::IsKeyword => "is",
        SyntaxKind::KeyOfKeyword => "keyof",
        SyntaxKind::ModuleKeyword => "module",
        SyntaxKind::NamespaceKeyword => "namespace",
        SyntaxKind::NeverKeyword => "never",
        SyntaxKind::NumberKeyword => "number",
        SyntaxKind::ObjectKeyword => "object",
        SyntaxKind::ReadonlyKeyword => "readonly",
        SyntaxKind::StringKeyword => "string",
        SyntaxKind::SymbolKeyword => "symbol",
        SyntaxKind::TypeKeyword => "type",
        SyntaxKind::UndefinedKeyword => "undefined",
        SyntaxKind::UniqueKeyword => "unique",
        SyntaxKind::UnknownKeyword => "unknown",
        _ => return None,
    };
    Some(text)
}

#[must_use]
pub fn punctuation_to_text(token: SyntaxKind) -> Option<&'static str> {
    let text = match token {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::DotToken => ".",
        SyntaxKind::DotDotDotToken => "...",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::EqualsGreaterThanToken => "=>",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::AtToken => "@",
        SyntaxKind::HashToken => "#",
        SyntaxKind::ExclamationToken => "!",
        _ => return None,
    };
    Some(text)
}

/// Text to show for a token kind in "'{0}' expected." diagnostics.
#[must_use]
pub fn token_to_text(token: SyntaxKind) -> &'static str {
    punctuation_to_text(token)
        .or_else(|| keyword_to_text(token))
        .unwrap_or(match token {
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            _ => "token",
        })
}
