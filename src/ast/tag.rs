use std::fmt;
use std::str::FromStr;

/// Syntactic category of a WHERE-clause tree node.
///
/// The set is closed: the walker matches on it exhaustively, so adding a
/// variant forces every dispatch site to decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Root marker of the clause. Carries no callback of its own.
    Where,

    // Comparison
    /// Equal (`=`)
    Eq,
    /// Not equal (`<>`)
    Neq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gteq,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lteq,

    // Boolean
    /// Logical negation (`NOT`)
    Not,
    /// Logical conjunction (`AND`)
    And,
    /// Logical disjunction (`OR`)
    Or,

    // Multi-value
    /// `col IN (...)`
    In,
    /// `col NOT IN (...)`
    NotIn,
    /// `ANY col IN (...)`
    InAny,
    /// `ANY col NOT IN (...)`
    NotInAny,
    /// `literal = ANY col`
    EqAny,

    // Null tests
    /// `col IS NULL`
    IsNull,
    /// `col IS NOT NULL`
    IsNotNull,

    // String matching
    /// `col LIKE 'pattern'`
    Like,
    /// `col NOT LIKE 'pattern'`
    NotLike,

    // Functions
    /// `CONTAINS([qualifier,] 'text')`
    Contains,
    /// `IN_FOLDER([qualifier,] 'folder-id')`
    InFolder,
    /// `IN_TREE([qualifier,] 'folder-id')`
    InTree,
    /// `SCORE()`
    Score,

    // Literals
    /// `TRUE` / `FALSE`
    BoolLit,
    /// Integral or fractional number
    NumLit,
    /// Quoted string, delimiters included in the raw text
    StringLit,
    /// `TIMESTAMP '...'`
    TimeLit,

    // Structural
    /// Parenthesised list of literals, the right operand of `IN` and friends
    InList,
    /// Column reference
    Column,
    /// Bare identifier (qualifier, alias)
    Identifier,
}

impl Tag {
    /// Every tag, in declaration order.
    pub const ALL: [Tag; 30] = [
        Tag::Where,
        Tag::Eq,
        Tag::Neq,
        Tag::Gt,
        Tag::Gteq,
        Tag::Lt,
        Tag::Lteq,
        Tag::Not,
        Tag::And,
        Tag::Or,
        Tag::In,
        Tag::NotIn,
        Tag::InAny,
        Tag::NotInAny,
        Tag::EqAny,
        Tag::IsNull,
        Tag::IsNotNull,
        Tag::Like,
        Tag::NotLike,
        Tag::Contains,
        Tag::InFolder,
        Tag::InTree,
        Tag::Score,
        Tag::BoolLit,
        Tag::NumLit,
        Tag::StringLit,
        Tag::TimeLit,
        Tag::InList,
        Tag::Column,
        Tag::Identifier,
    ];

    /// Grammar name of the tag, as used in the JSON tree format.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Where => "WHERE",
            Tag::Eq => "EQ",
            Tag::Neq => "NEQ",
            Tag::Gt => "GT",
            Tag::Gteq => "GTEQ",
            Tag::Lt => "LT",
            Tag::Lteq => "LTEQ",
            Tag::Not => "NOT",
            Tag::And => "AND",
            Tag::Or => "OR",
            Tag::In => "IN",
            Tag::NotIn => "NOT_IN",
            Tag::InAny => "IN_ANY",
            Tag::NotInAny => "NOT_IN_ANY",
            Tag::EqAny => "EQ_ANY",
            Tag::IsNull => "IS_NULL",
            Tag::IsNotNull => "IS_NOT_NULL",
            Tag::Like => "LIKE",
            Tag::NotLike => "NOT_LIKE",
            Tag::Contains => "CONTAINS",
            Tag::InFolder => "IN_FOLDER",
            Tag::InTree => "IN_TREE",
            Tag::Score => "SCORE",
            Tag::BoolLit => "BOOL_LIT",
            Tag::NumLit => "NUM_LIT",
            Tag::StringLit => "STRING_LIT",
            Tag::TimeLit => "TIME_LIT",
            Tag::InList => "IN_LIST",
            Tag::Column => "COL",
            Tag::Identifier => "ID",
        }
    }

    /// Child counts the grammar allows for this tag, as `(min, max)`.
    /// `None` for tags whose children are not constrained (`WHERE`,
    /// literal lists, leaves that carry qualifiers).
    pub fn arity(self) -> Option<(usize, usize)> {
        match self {
            Tag::Eq
            | Tag::Neq
            | Tag::Gt
            | Tag::Gteq
            | Tag::Lt
            | Tag::Lteq
            | Tag::And
            | Tag::Or
            | Tag::In
            | Tag::NotIn
            | Tag::InAny
            | Tag::NotInAny
            | Tag::EqAny
            | Tag::Like
            | Tag::NotLike => Some((2, 2)),
            Tag::Not | Tag::IsNull | Tag::IsNotNull => Some((1, 1)),
            Tag::Contains | Tag::InFolder | Tag::InTree => Some((1, 2)),
            Tag::Score | Tag::BoolLit | Tag::NumLit | Tag::StringLit | Tag::TimeLit => {
                Some((0, 0))
            }
            Tag::Where | Tag::InList | Tag::Column | Tag::Identifier => None,
        }
    }

    /// True for the four tags [`coerce_literal`](crate::literal::coerce_literal) accepts.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Tag::BoolLit | Tag::NumLit | Tag::StringLit | Tag::TimeLit
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}
