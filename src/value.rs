use std::fmt;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A typed literal taken from a WHERE-clause tree.
///
/// Produced only by [`coerce_literal`](crate::literal::coerce_literal) from
/// the four literal tags.
///
/// # Examples
///
/// ```
/// use query_walker::LiteralValue;
///
/// let flag = LiteralValue::Boolean(true);
/// let count = LiteralValue::Integer(42);
/// let ratio = LiteralValue::Float(0.5);
/// let name = LiteralValue::String("abc".to_string());
///
/// assert_eq!(count.as_float(), Some(42.0));
/// assert_eq!(name.to_string(), "'abc'");
/// assert!(flag.as_bool().unwrap());
/// assert!(ratio.as_int().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `TRUE` / `FALSE`
    Boolean(bool),

    /// Numeric literal without a decimal point or exponent
    Integer(i64),

    /// Numeric literal with a decimal point or exponent
    Float(f64),

    /// String literal with its quotes removed
    String(String),

    /// `TIMESTAMP '...'` literal
    Timestamp(OffsetDateTime),
}

impl LiteralValue {
    /// Name of the literal kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Integer(_) => "integer",
            LiteralValue::Float(_) => "float",
            LiteralValue::String(_) => "string",
            LiteralValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LiteralValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            LiteralValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            LiteralValue::Integer(n) => Some(*n as f64),
            LiteralValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            LiteralValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

/// Renders the value back as a query-language literal.
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(true) => f.write_str("TRUE"),
            LiteralValue::Boolean(false) => f.write_str("FALSE"),
            LiteralValue::Integer(n) => write!(f, "{}", n),
            LiteralValue::Float(n) => write!(f, "{:?}", n),
            LiteralValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            LiteralValue::Timestamp(ts) => {
                let text = ts.format(&Rfc3339).map_err(|_| fmt::Error)?;
                write!(f, "TIMESTAMP '{}'", text)
            }
        }
    }
}
