//! CLI support for query-walker
//!
//! Programmatic access to the `qwalk` commands, so other tools can embed
//! them without spawning the binary.

mod tags;
mod trace;
mod translate;

pub use tags::list_tags;
pub use trace::execute_trace;
pub use translate::execute_sql;

use std::io;

use thiserror::Error;

use crate::{
    QueryError, WalkOptions,
    ast::{TreeError, TreeNode, tree_from_json},
};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The input is not JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not describe a tree
    #[error("Invalid tree: {0}")]
    Tree(#[from] TreeError),

    /// The walk was rejected
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Reading input failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe a JSON tree to stdin.")]
    NoInput,
}

/// Options shared by the walking commands
#[derive(Debug, Clone, Default)]
pub struct WalkCommandOptions {
    /// JSON tree. `null` means an empty WHERE clause.
    pub input: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Nesting limit; falls back to the walker default
    pub max_depth: Option<usize>,
}

impl WalkCommandOptions {
    pub fn walk_options(&self) -> WalkOptions {
        match self.max_depth {
            Some(limit) => WalkOptions::new().with_max_depth(limit),
            None => WalkOptions::new(),
        }
    }

    /// Parse the input into a tree. `Ok(None)` for a JSON `null`.
    pub fn load_tree(&self) -> Result<Option<TreeNode>, CliError> {
        let input = self.input.as_ref().ok_or(CliError::NoInput)?;
        let json: serde_json::Value = serde_json::from_str(input)?;
        if json.is_null() {
            return Ok(None);
        }
        Ok(Some(tree_from_json(&json)?))
    }
}
