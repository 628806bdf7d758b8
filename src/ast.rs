//! # WHERE-clause tree model
//!
//! The walker never builds trees of its own. An external parser hands over a
//! tagged tree and the walker reads it through the [`Node`] trait, so any tree
//! representation works as long as it can report a [`Tag`], its raw text and
//! its ordered children.
//!
//! ## Submodules
//!
//! - **[tag]** - The closed set of syntactic categories
//! - **[node]** - The read-only [`Node`] contract the walker consumes
//! - **[tree]** - [`TreeNode`], an owned tree with JSON interchange
//!
//! ## Shape of a clause
//!
//! ```text
//! WHERE a = 1 AND NOT b IN ('x', 'y')
//!
//! AND
//! ├── EQ
//! │   ├── COL "a"
//! │   └── NUM_LIT "1"
//! └── NOT
//!     └── IN
//!         ├── COL "b"
//!         └── IN_LIST
//!             ├── STRING_LIT "'x'"
//!             └── STRING_LIT "'y'"
//! ```
//!
//! ## Parser invariants
//!
//! The walker assumes, and never re-checks, the child counts the grammar
//! guarantees ([`Tag::arity`] lists them):
//!
//! - comparison, membership and `LIKE` operators have exactly two children
//! - `NOT`, `IS_NULL` and `IS_NOT_NULL` have exactly one child
//! - `CONTAINS`, `IN_FOLDER` and `IN_TREE` have one child (argument) or two
//!   (column, argument)
//! - `SCORE` has no children
//!
//! A tree that breaks these is a parser bug. [`tree_from_json`] rejects such
//! trees with [`TreeError::Arity`]; trees built in code are not checked, and
//! [`TreeNode::child`] panics on an out-of-range index.
pub mod node;
pub mod tag;
pub mod tree;

pub use node::Node;
pub use tag::Tag;
pub use tree::{TreeError, TreeNode, tree_from_json, tree_to_json};
