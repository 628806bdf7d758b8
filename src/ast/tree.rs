//! Owned WHERE-clause trees and their JSON form.
//!
//! [`TreeNode`] is the tree the CLI and the test-suite build. Parsers living
//! in other processes can hand trees over as JSON:
//!
//! ```text
//! {"tag": "EQ", "children": [
//!     {"tag": "COL", "text": "name"},
//!     {"tag": "STRING_LIT", "text": "'abc'"}
//! ]}
//! ```
//!
//! `text` defaults to the empty string and `children` to an empty list.
//! Child counts are checked against [`Tag::arity`] while reading, so a tree
//! read from JSON always satisfies the walker's child-count invariants.

use serde_json::{Map, Value as Json};
use thiserror::Error;

use crate::ast::{Node, Tag};

/// Errors produced while reading a tree from JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// A tree node was not a JSON object
    #[error("expected a JSON object for a tree node, found {found}")]
    NotAnObject { found: &'static str },

    /// The `tag` field is absent
    #[error("tree node is missing the \"tag\" field")]
    MissingTag,

    /// The `tag` field names no known tag
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    /// A field holds a value of the wrong JSON type
    #[error("field \"{field}\" must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A node has a child count its tag does not allow
    #[error("{tag} expects {expected}, found {found}")]
    Arity {
        tag: Tag,
        expected: &'static str,
        found: usize,
    },
}

/// An owned tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    tag: Tag,
    text: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(tag: Tag, text: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode {
            tag,
            text: text.into(),
            children,
        }
    }

    /// Node without children, such as a literal or a column.
    pub fn leaf(tag: Tag, text: impl Into<String>) -> Self {
        Self::new(tag, text, Vec::new())
    }

    /// Operator node with empty text.
    pub fn branch(tag: Tag, children: Vec<TreeNode>) -> Self {
        Self::new(tag, String::new(), children)
    }

    pub fn binary(tag: Tag, left: TreeNode, right: TreeNode) -> Self {
        Self::branch(tag, vec![left, right])
    }

    pub fn unary(tag: Tag, operand: TreeNode) -> Self {
        Self::branch(tag, vec![operand])
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::leaf(Tag::Column, name)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::leaf(Tag::NumLit, text)
    }

    /// String literal. `raw` keeps its quote delimiters, e.g. `"'abc'"`.
    pub fn string(raw: impl Into<String>) -> Self {
        Self::leaf(Tag::StringLit, raw)
    }

    pub fn boolean(text: impl Into<String>) -> Self {
        Self::leaf(Tag::BoolLit, text)
    }

    /// Timestamp literal. `raw` is the full lexeme, e.g.
    /// `"TIMESTAMP '2024-01-01T00:00:00.000Z'"`.
    pub fn timestamp(raw: impl Into<String>) -> Self {
        Self::leaf(Tag::TimeLit, raw)
    }

    pub fn list(items: Vec<TreeNode>) -> Self {
        Self::branch(Tag::InList, items)
    }

    /// Nesting depth of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

impl Node for TreeNode {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &Self {
        &self.children[index]
    }
}

fn json_kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// Read a tree from its JSON form.
pub fn tree_from_json(v: &Json) -> Result<TreeNode, TreeError> {
    let obj = v.as_object().ok_or(TreeError::NotAnObject {
        found: json_kind(v),
    })?;

    let tag = match obj.get("tag") {
        None => return Err(TreeError::MissingTag),
        Some(Json::String(name)) => name
            .parse::<Tag>()
            .map_err(TreeError::UnknownTag)?,
        Some(_) => {
            return Err(TreeError::InvalidField {
                field: "tag",
                expected: "a string",
            });
        }
    };

    let text = match obj.get("text") {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(s)) => s.clone(),
        Some(_) => {
            return Err(TreeError::InvalidField {
                field: "text",
                expected: "a string",
            });
        }
    };

    let children = match obj.get("children") {
        None | Some(Json::Null) => Vec::new(),
        Some(Json::Array(items)) => items
            .iter()
            .map(tree_from_json)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(TreeError::InvalidField {
                field: "children",
                expected: "an array",
            });
        }
    };

    check_arity(tag, children.len())?;
    Ok(TreeNode::new(tag, text, children))
}

fn check_arity(tag: Tag, found: usize) -> Result<(), TreeError> {
    let Some((min, max)) = tag.arity() else {
        return Ok(());
    };
    if (min..=max).contains(&found) {
        return Ok(());
    }
    let expected = match (min, max) {
        (0, 0) => "no children",
        (1, 1) => "exactly 1 child",
        (2, 2) => "exactly 2 children",
        _ => "1 or 2 children",
    };
    Err(TreeError::Arity {
        tag,
        expected,
        found,
    })
}

/// Write a tree in its JSON form. Empty `text` and `children` are omitted.
pub fn tree_to_json(node: &TreeNode) -> Json {
    let mut obj = Map::new();
    obj.insert("tag".to_string(), Json::String(node.tag.name().to_string()));
    if !node.text.is_empty() {
        obj.insert("text".to_string(), Json::String(node.text.clone()));
    }
    if !node.children.is_empty() {
        obj.insert(
            "children".to_string(),
            Json::Array(node.children.iter().map(tree_to_json).collect()),
        );
    }
    Json::Object(obj)
}
