//! Utility functions shared by the RingCentral rules

use oxc_ast::ast::{CallExpression, Expression};
use oxc_span::Span;

/// Get the body of a comment, without its `//` or `/* */` delimiters
pub fn comment_body(source: &str, span: Span) -> &str {
    let text = source.get(span.start as usize..span.end as usize).unwrap_or("");
    if let Some(line) = text.strip_prefix("//") {
        return line;
    }
    match text.strip_prefix("/*") {
        Some(block) => block.strip_suffix("*/").unwrap_or(block),
        None => text,
    }
}

/// Get the callee name of a call whose callee is a plain identifier, e.g. `isTablet()`
pub fn callee_identifier_name<'a>(call: &CallExpression<'a>) -> Option<&'a str> {
    match call.callee.without_parentheses() {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        _ => None,
    }
}

/// Convert a byte offset into a 1-based (line, column) pair
pub fn offset_to_line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
