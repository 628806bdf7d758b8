//! The traversal engine.
//!
//! [`Walker`] turns a WHERE-clause tree into an ordered stream of
//! [`ConditionHandler`] callbacks. It holds no per-walk state: one walker can
//! serve any number of threads as long as each walk gets its own handler.

use crate::{
    ast::{Node, Tag},
    error::QueryError,
    handler::ConditionHandler,
    observability::{log_debug, log_trace},
};

/// Nesting limit used by [`Walker::default`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Walker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest node level the walker will visit (the root is level 1).
    /// `None` disables the check.
    pub max_depth: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// No nesting limit. Only for trusted input: a deep enough tree will
    /// overflow the stack.
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }
}

/// Recursive-descent walker over WHERE-clause trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Walker {
    options: WalkOptions,
}

impl Walker {
    pub fn new(options: WalkOptions) -> Self {
        Walker { options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walk `root`, reporting every predicate to `handler`.
    ///
    /// An absent root produces no callbacks at all. Otherwise the stream is
    /// bracketed by `on_start_processing(root)` and `on_stop_processing()`, and
    /// each node is dispatched on its tag:
    ///
    /// | Tag | Order |
    /// |-----|-------|
    /// | comparisons, `LIKE`, `NOT_LIKE`, `IN`, `NOT_IN`, `IN_ANY`, `NOT_IN_ANY`, `EQ_ANY` | left, callback, right |
    /// | `NOT` | `on_pre_not`, `on_not`, operand, `on_post_not` |
    /// | `AND` / `OR` | pre hook, left, callback, right, post hook |
    /// | `IS_NULL`, `IS_NOT_NULL` | callback, operand |
    /// | `CONTAINS`, `IN_FOLDER`, `IN_TREE` with 1 child | callback(`None`, arg), arg |
    /// | `CONTAINS`, `IN_FOLDER`, `IN_TREE` with 2 children | column, callback(column, arg), arg |
    /// | `SCORE` | callback |
    /// | `WHERE`, literals, columns, lists | nothing |
    ///
    /// Callbacks receive the raw operand nodes; "left" and "right" above mean
    /// recursively walking that operand. The in-order placement of each
    /// callback lets a text-emitting handler write `<left> <op> <right>`
    /// without buffering.
    ///
    /// The tree must satisfy the parser's child-count invariants (see
    /// [`ast`](crate::ast)); a malformed tree may panic inside
    /// [`Node::child`].
    ///
    /// # Errors
    ///
    /// The first error returned by a callback aborts the walk and is returned
    /// as is; `on_stop_processing` is not called. A tree nested deeper than
    /// [`WalkOptions::max_depth`] fails with [`QueryError::QueryTooComplex`]
    /// before its too-deep node is dispatched.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_walker::ast::{Tag, TreeNode};
    /// use query_walker::handlers::WhereTranslator;
    /// use query_walker::Walker;
    ///
    /// let clause = TreeNode::binary(
    ///     Tag::Or,
    ///     TreeNode::binary(Tag::Eq, TreeNode::column("a"), TreeNode::number("1")),
    ///     TreeNode::unary(Tag::IsNull, TreeNode::column("b")),
    /// );
    ///
    /// let mut translator = WhereTranslator::new();
    /// Walker::default().walk(Some(&clause), &mut translator).unwrap();
    /// assert_eq!(translator.finish(), "(a = 1 OR b IS NULL)");
    /// ```
    pub fn walk<N, H>(&self, root: Option<&N>, handler: &mut H) -> Result<(), QueryError>
    where
        N: Node,
        H: ConditionHandler<N> + ?Sized,
    {
        let Some(root) = root else {
            log_trace!(event = "walk_skipped", reason = "empty where clause");
            return Ok(());
        };

        log_debug!(event = "walk_started", root = %root.tag(), max_depth = ?self.options.max_depth);
        handler.on_start_processing(root)?;
        self.eval_node(root, handler, 1)?;
        handler.on_stop_processing()?;
        log_debug!(event = "walk_finished");
        Ok(())
    }

    fn eval_node<N, H>(&self, node: &N, handler: &mut H, depth: usize) -> Result<(), QueryError>
    where
        N: Node,
        H: ConditionHandler<N> + ?Sized,
    {
        if let Some(limit) = self.options.max_depth
            && depth > limit
        {
            log_debug!(event = "walk_rejected", reason = "nesting limit", limit);
            return Err(QueryError::QueryTooComplex { limit });
        }

        log_trace!(event = "eval_node", tag = %node.tag(), depth);
        let next = depth + 1;

        match node.tag() {
            Tag::Where => {}

            // Comparison
            Tag::Eq => self.eval_infix(node, handler, next, H::on_equals)?,
            Tag::Neq => self.eval_infix(node, handler, next, H::on_not_equals)?,
            Tag::Gt => self.eval_infix(node, handler, next, H::on_greater_than)?,
            Tag::Gteq => self.eval_infix(node, handler, next, H::on_greater_or_equals)?,
            Tag::Lt => self.eval_infix(node, handler, next, H::on_less_than)?,
            Tag::Lteq => self.eval_infix(node, handler, next, H::on_less_or_equals)?,

            // Boolean
            Tag::Not => {
                let operand = node.child(0);
                handler.on_pre_not(node, operand)?;
                handler.on_not(node, operand)?;
                self.eval_node(operand, handler, next)?;
                handler.on_post_not(node, operand)?;
            }
            Tag::And => {
                let (left, right) = (node.child(0), node.child(1));
                handler.on_pre_and(node, left, right)?;
                self.eval_infix(node, handler, next, H::on_and)?;
                handler.on_post_and(node, left, right)?;
            }
            Tag::Or => {
                let (left, right) = (node.child(0), node.child(1));
                handler.on_pre_or(node, left, right)?;
                self.eval_infix(node, handler, next, H::on_or)?;
                handler.on_post_or(node, left, right)?;
            }

            // Multi-value
            Tag::In => self.eval_infix(node, handler, next, H::on_in)?,
            Tag::NotIn => self.eval_infix(node, handler, next, H::on_not_in)?,
            Tag::InAny => self.eval_infix(node, handler, next, H::on_in_any)?,
            Tag::NotInAny => self.eval_infix(node, handler, next, H::on_not_in_any)?,
            Tag::EqAny => self.eval_infix(node, handler, next, H::on_eq_any)?,

            // Null tests
            Tag::IsNull => self.eval_prefix(node, handler, next, H::on_is_null)?,
            Tag::IsNotNull => self.eval_prefix(node, handler, next, H::on_is_not_null)?,

            // String matching
            Tag::Like => self.eval_infix(node, handler, next, H::on_is_like)?,
            Tag::NotLike => self.eval_infix(node, handler, next, H::on_is_not_like)?,

            // Functions
            Tag::Contains => self.eval_function(node, handler, next, H::on_contains)?,
            Tag::InFolder => self.eval_function(node, handler, next, H::on_in_folder)?,
            Tag::InTree => self.eval_function(node, handler, next, H::on_in_tree)?,
            Tag::Score => handler.on_score(node)?,

            // Leaves and structural nodes are read by whichever callback got
            // them as an operand.
            Tag::BoolLit
            | Tag::NumLit
            | Tag::StringLit
            | Tag::TimeLit
            | Tag::InList
            | Tag::Column
            | Tag::Identifier => {
                log_trace!(event = "node_ignored", tag = %node.tag(), depth);
            }
        }

        Ok(())
    }

    /// left, callback, right
    fn eval_infix<N, H>(
        &self,
        node: &N,
        handler: &mut H,
        depth: usize,
        callback: fn(&mut H, &N, &N, &N) -> Result<(), QueryError>,
    ) -> Result<(), QueryError>
    where
        N: Node,
        H: ConditionHandler<N> + ?Sized,
    {
        let (left, right) = (node.child(0), node.child(1));
        self.eval_node(left, handler, depth)?;
        callback(handler, node, left, right)?;
        self.eval_node(right, handler, depth)
    }

    /// callback, operand
    fn eval_prefix<N, H>(
        &self,
        node: &N,
        handler: &mut H,
        depth: usize,
        callback: fn(&mut H, &N, &N) -> Result<(), QueryError>,
    ) -> Result<(), QueryError>
    where
        N: Node,
        H: ConditionHandler<N> + ?Sized,
    {
        let operand = node.child(0);
        callback(handler, node, operand)?;
        self.eval_node(operand, handler, depth)
    }

    /// Functions with an optional qualifying column.
    fn eval_function<N, H>(
        &self,
        node: &N,
        handler: &mut H,
        depth: usize,
        callback: fn(&mut H, &N, Option<&N>, &N) -> Result<(), QueryError>,
    ) -> Result<(), QueryError>
    where
        N: Node,
        H: ConditionHandler<N> + ?Sized,
    {
        if node.child_count() == 1 {
            let argument = node.child(0);
            callback(handler, node, None, argument)?;
            self.eval_node(argument, handler, depth)
        } else {
            let (column, argument) = (node.child(0), node.child(1));
            self.eval_node(column, handler, depth)?;
            callback(handler, node, Some(column), argument)?;
            self.eval_node(argument, handler, depth)
        }
    }
}

/// Walk `root` with the default [`WalkOptions`].
pub fn walk<N, H>(root: Option<&N>, handler: &mut H) -> Result<(), QueryError>
where
    N: Node,
    H: ConditionHandler<N> + ?Sized,
{
    Walker::default().walk(root, handler)
}
