pub mod ast;
pub mod cli;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod literal;
mod observability;
pub mod value;
pub mod walker;

pub use ast::{Node, Tag, TreeNode};
pub use error::{HandlerResult, QueryError};
pub use handler::ConditionHandler;
pub use literal::{coerce_literal, coerce_literal_list, parse_timestamp};
pub use value::LiteralValue;
pub use walker::{DEFAULT_MAX_DEPTH, WalkOptions, Walker, walk};
