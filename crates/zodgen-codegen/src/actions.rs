//! Code actions offered for a cursor position.

use serde::Serialize;
use zodgen_binder::{FileId, TypeResolver};
use zodgen_common::Span;

use crate::convert::ConvertAction;
use crate::locator::DeclarationTarget;

pub const CONVERT_TITLE: &str = "Convert to Zod Schema";
pub const REPLACE_TITLE: &str = "Replace With Zod Schema";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: &'static str,
    pub action: ConvertAction,
    pub declaration_name: String,
    pub span: Span,
}

/// The conversions available for the declaration at `offset`; empty when
/// no convertible declaration encloses it.
pub fn code_actions<R: TypeResolver + ?Sized>(
    resolver: &R,
    file: FileId,
    offset: u32,
) -> Vec<CodeAction> {
    let Some(target) = resolver
        .declaration_at(file, offset)
        .and_then(DeclarationTarget::from_statement)
    else {
        return Vec::new();
    };

    [
        (CONVERT_TITLE, ConvertAction::Generate),
        (REPLACE_TITLE, ConvertAction::Replace),
    ]
    .into_iter()
    .map(|(title, action)| CodeAction {
        title,
        action,
        declaration_name: target.name().to_string(),
        span: target.span(),
    })
    .collect()
}
