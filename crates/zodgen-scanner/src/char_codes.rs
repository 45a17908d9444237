//! Character classification used by the scanner.

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}'
    ) || ('\u{2000}'..='\u{200B}').contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$' || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch == '$'
        || (!ch.is_ascii() && (ch.is_alphanumeric() || ch == '\u{200C}' || ch == '\u{200D}'))
}

/// Whether `text` is a valid JavaScript identifier name.
///
/// Used by printers to decide whether an object key needs quoting.
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

#[cfg(test)]
mod char_codes_tests {
    use super::*;

    #[test]
    fn test_identifier_text() {
        assert!(is_identifier_text("userName"));
        assert!(is_identifier_text("_private$"));
        assert!(is_identifier_text("caf\u{e9}"));
        assert!(!is_identifier_text("first-name"));
        assert!(!is_identifier_text("1st"));
        assert!(!is_identifier_text(""));
    }

    #[test]
    fn test_whitespace() {
        assert!(is_white_space_single_line(' '));
        assert!(is_white_space_single_line('\u{2003}'));
        assert!(!is_white_space_single_line('\n'));
        assert!(is_line_break('\r'));
    }
}
