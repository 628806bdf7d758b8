use thiserror::Error;

use crate::ast::Tag;

/// Errors that abort a walk or a literal coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A non-literal node was handed to literal coercion. The parser and the
    /// handler disagree about the tree shape.
    #[error("unexpected literal kind: {tag} is not a literal")]
    UnexpectedLiteralKind { tag: Tag },

    /// Timestamp literal text is not a valid date-time.
    #[error("malformed timestamp literal: {text}")]
    MalformedTimestampLiteral { text: String },

    /// Numeric literal text does not fit the number kind it was classified as.
    #[error("malformed numeric literal: {text}")]
    MalformedNumericLiteral { text: String },

    /// The clause nests deeper than the configured limit.
    #[error("query too complex: nesting exceeds {limit} levels")]
    QueryTooComplex { limit: usize },

    /// A handler rejected the clause.
    #[error("{0}")]
    Handler(String),
}

/// Outcome of a single handler callback.
pub type HandlerResult = Result<(), QueryError>;
