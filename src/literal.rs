//! Literal coercion: turning literal leaves into [`LiteralValue`]s.
//!
//! Handlers call these on the raw operand nodes they receive; the walker
//! itself never coerces anything.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::{
    ast::{Node, Tag},
    error::QueryError,
    observability::log_debug,
    value::LiteralValue,
};

/// Parse the date-time part of a timestamp literal.
///
/// Accepts RFC 3339 date-times such as `2024-01-01T00:00:00.000Z` or
/// `2024-01-01T10:30:00+02:00`.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, QueryError> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|e| {
        log_debug!(event = "timestamp_rejected", text = %text, error = %e);
        QueryError::MalformedTimestampLiteral {
            text: text.to_string(),
        }
    })
}

/// Convert a literal node into a typed value.
///
/// - `BOOL_LIT`: `true` in any case is `true`, anything else is `false`
/// - `NUM_LIT`: `.`, `e` or `E` in the text makes a float, otherwise an integer;
///   values outside the `i64` or finite `f64` range are rejected
/// - `STRING_LIT`: the first and last character (the quotes) are dropped
/// - `TIME_LIT`: the text between the first and last `'` is parsed with
///   [`parse_timestamp`]
///
/// Any other tag fails with [`QueryError::UnexpectedLiteralKind`].
///
/// # Examples
///
/// ```
/// use query_walker::{LiteralValue, coerce_literal};
/// use query_walker::ast::TreeNode;
///
/// assert_eq!(coerce_literal(&TreeNode::number("42")).unwrap(), LiteralValue::Integer(42));
/// assert_eq!(coerce_literal(&TreeNode::number("4e2")).unwrap(), LiteralValue::Float(400.0));
/// assert_eq!(
///     coerce_literal(&TreeNode::string("'abc'")).unwrap(),
///     LiteralValue::String("abc".to_string())
/// );
/// ```
pub fn coerce_literal<N: Node>(node: &N) -> Result<LiteralValue, QueryError> {
    let text = node.text();
    match node.tag() {
        Tag::BoolLit => Ok(LiteralValue::Boolean(text.eq_ignore_ascii_case("true"))),
        Tag::NumLit => coerce_number(text),
        Tag::StringLit => Ok(LiteralValue::String(strip_delimiters(text).to_string())),
        Tag::TimeLit => {
            let inner = quoted_section(text).ok_or_else(|| QueryError::MalformedTimestampLiteral {
                text: text.to_string(),
            })?;
            parse_timestamp(inner).map(LiteralValue::Timestamp)
        }
        tag => Err(QueryError::UnexpectedLiteralKind { tag }),
    }
}

/// Coerce every child of a literal-list node, keeping source order and
/// duplicates. The first failing child aborts the whole list.
pub fn coerce_literal_list<N: Node>(node: &N) -> Result<Vec<LiteralValue>, QueryError> {
    node.children().map(coerce_literal).collect()
}

fn coerce_number(text: &str) -> Result<LiteralValue, QueryError> {
    let malformed = || QueryError::MalformedNumericLiteral {
        text: text.to_string(),
    };

    if text.contains(['.', 'e', 'E']) {
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(LiteralValue::Float(n)),
            _ => Err(malformed()),
        }
    } else {
        text.parse::<i64>()
            .map(LiteralValue::Integer)
            .map_err(|_| malformed())
    }
}

/// Drop exactly one character from each end.
fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Text between the first and the last single quote.
fn quoted_section(text: &str) -> Option<&str> {
    let start = text.find('\'')?;
    let end = text.rfind('\'')?;
    if end <= start {
        return None;
    }
    Some(&text[start + 1..end])
}
