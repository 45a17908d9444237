use crate::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string());
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::InterfaceKeyword));
    assert!(token_is_keyword(SyntaxKind::StringKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_contextual_keywords_are_identifiers() {
    assert!(token_is_identifier(SyntaxKind::TypeKeyword));
    assert!(token_is_identifier(SyntaxKind::FromKeyword));
    assert!(!token_is_identifier(SyntaxKind::ClassKeyword));
    assert!(token_is_identifier_or_keyword(SyntaxKind::ClassKeyword));
}

#[test]
fn test_keyword_to_text() {
    assert_eq!(keyword_to_text(SyntaxKind::ImportKeyword), Some("import"));
    assert_eq!(keyword_to_text(SyntaxKind::KeyOfKeyword), Some("keyof"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
    for kind in [
        SyntaxKind::ReadonlyKeyword,
        SyntaxKind::UndefinedKeyword,
        SyntaxKind::BigIntKeyword,
    ] {
        let text = keyword_to_text(kind).unwrap();
        assert_eq!(text_to_keyword(text), Some(kind));
    }
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::OpenBraceToken), Some("{"));
    assert_eq!(punctuation_to_text(SyntaxKind::DotDotDotToken), Some("..."));
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
    assert_eq!(token_to_text(SyntaxKind::SemicolonToken), ";");
}

#[test]
fn test_text_to_keyword_is_case_sensitive() {
    assert_eq!(text_to_keyword("type"), Some(SyntaxKind::TypeKeyword));
    assert_eq!(text_to_keyword("Type"), None);
    assert_eq!(text_to_keyword("foo"), None);
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new());
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_punctuation() {
    assert_eq!(
        scan_all("{}()[];,:?"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CommaToken,
            SyntaxKind::ColonToken,
            SyntaxKind::QuestionToken,
        ]
    );
}

#[test]
fn test_scan_nested_type_arguments_split_greater_than() {
    assert_eq!(
        scan_all("Map<K, Array<V>>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::CommaToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
}

#[test]
fn test_scan_operators() {
    assert_eq!(
        scan_all("=> = | & ... . - && || === ??"),
        vec![
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::BarToken,
            SyntaxKind::AmpersandToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::DotToken,
            SyntaxKind::MinusToken,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::OtherPunctuation,
        ]
    );
}

#[test]
fn test_scan_identifier_and_keywords() {
    let mut scanner = ScannerState::new("export interface User".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::ExportKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::InterfaceKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "User");
    assert_eq!(scanner.get_token_pos(), 17);
    assert_eq!(scanner.get_token_end(), 21);
    assert_eq!(scanner.get_token_full_start(), 16);
}

#[test]
fn test_scan_unicode_identifier() {
    let mut scanner = ScannerState::new("  caf\u{e9}Name".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "caf\u{e9}Name");
}

#[test]
fn test_scan_string_literal() {
    let mut scanner = ScannerState::new("'hello' \"wor\\\"ld\"".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "hello");
    assert_eq!(scanner.get_token_text(), "'hello'");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "wor\"ld");
}

#[test]
fn test_scan_string_escapes() {
    let mut scanner = ScannerState::new(r#""a\nb\x41B\u{43}\q""#.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\nbABCq");
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("'abc\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.get_token_value(), "abc");
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1002);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_scan_templates() {
    let mut scanner = ScannerState::new("`plain` `id-${string}-${`x${1}`}`".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "plain");
    assert_eq!(scanner.scan(), SyntaxKind::TemplateLiteral);
    assert_eq!(scanner.get_token_value(), "id-${string}-${`x${1}`}");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_unterminated_template_does_not_panic() {
    for source in ["`${", "`${}`", "`foo ${ a", "`"] {
        let mut scanner = ScannerState::new(source.to_string());
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken, "{source}");
    }
}

#[test]
fn test_scan_numbers() {
    let cases = [
        ("42", SyntaxKind::NumericLiteral, "42"),
        ("1_000", SyntaxKind::NumericLiteral, "1000"),
        ("1.50", SyntaxKind::NumericLiteral, "1.5"),
        (".5", SyntaxKind::NumericLiteral, "0.5"),
        ("1e3", SyntaxKind::NumericLiteral, "1000"),
        ("0x1F", SyntaxKind::NumericLiteral, "31"),
        ("0b101", SyntaxKind::NumericLiteral, "5"),
        ("0o17", SyntaxKind::NumericLiteral, "15"),
        ("10n", SyntaxKind::BigIntLiteral, "10"),
    ];
    for (source, kind, value) in cases {
        let mut scanner = ScannerState::new(source.to_string());
        assert_eq!(scanner.scan(), kind, "{source}");
        assert_eq!(scanner.get_token_value(), value, "{source}");
        assert_eq!(scanner.get_token_end() as usize, source.len(), "{source}");
    }
}

#[test]
fn test_comments_are_skipped() {
    let source = "// line\n/* block */ a /* x */ b";
    assert_eq!(
        scan_all(source),
        vec![SyntaxKind::Identifier, SyntaxKind::Identifier]
    );
}

#[test]
fn test_preceding_jsdoc() {
    let source = "/** first */\n/* plain */\n/** second */ name: string";
    let mut scanner = ScannerState::new(source.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    let docs = scanner.get_preceding_jsdoc();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].get_text(source), "/** first */");
    assert_eq!(docs[1].get_text(source), "/** second */");
    assert!(scanner.get_token_flags().contains(TokenFlags::PRECEDING_JSDOC_COMMENT));

    assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
    assert!(scanner.get_preceding_jsdoc().is_empty());
}

#[test]
fn test_unterminated_block_comment() {
    let mut scanner = ScannerState::new("a /* never closed".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1010);
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new("a \u{2603} b".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.take_diagnostics()[0].code, 1127);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("a 'x b".to_string());
    scanner.scan();
    let snapshot = scanner.save_state();
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.diagnostic_count(), 1);

    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.diagnostic_count(), 0);
}

#[test]
fn test_shebang_is_skipped() {
    let mut scanner = ScannerState::new("#!/usr/bin/env node\ntype".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::TypeKeyword);
    assert!(scanner.has_preceding_line_break());
}
