use super::*;

#[test]
fn test_is_jsdoc_text() {
    assert!(is_jsdoc_text("/** doc */"));
    assert!(!is_jsdoc_text("/* plain */"));
    assert!(!is_jsdoc_text("/*** banner ***/"));
    assert!(!is_jsdoc_text("/**/"));
}

#[test]
fn test_single_line_body() {
    let doc = JsDoc::parse("/** The user's display name */");
    assert_eq!(doc.comment.as_deref(), Some("The user's display name"));
    assert!(doc.tags.is_empty());
}

#[test]
fn test_single_line_tag() {
    let doc = JsDoc::parse("/** @error Name is required */");
    assert_eq!(doc.comment, None);
    assert_eq!(doc.tags.len(), 1);
    assert_eq!(doc.tags[0].name, "error");
    assert_eq!(doc.tags[0].comment.as_deref(), Some("Name is required"));
}

#[test]
fn test_multi_line_body_and_tags() {
    let source = r#"/**
     * Age in whole years.
     * Must be positive.
     *
     * @error Age must be a number
     * @deprecated
     * @message Please enter
     *   a valid age
     */"#;
    let doc = JsDoc::parse(source);

    assert_eq!(
        doc.comment.as_deref(),
        Some("Age in whole years.\nMust be positive.")
    );
    assert_eq!(doc.tags.len(), 3);
    assert_eq!(
        doc.tag("error").and_then(|t| t.comment.as_deref()),
        Some("Age must be a number")
    );
    assert_eq!(doc.tag("deprecated").and_then(|t| t.comment.clone()), None);
    assert_eq!(
        doc.tag("message").and_then(|t| t.comment.as_deref()),
        Some("Please enter\na valid age")
    );
}

#[test]
fn test_at_sign_in_prose_is_not_a_tag() {
    let doc = JsDoc::parse("/** contact admin@example.com for help */");
    assert_eq!(
        doc.comment.as_deref(),
        Some("contact admin@example.com for help")
    );
    assert!(doc.tags.is_empty());
}

#[test]
fn test_from_range() {
    let source = "  /** @error bad */\n  name: string;";
    let range = CommentRange::new(2, 19, true);
    assert!(is_jsdoc_comment(&range, source));
    let doc = JsDoc::from_range(&range, source);
    assert_eq!(doc.tags[0].comment.as_deref(), Some("bad"));
}
