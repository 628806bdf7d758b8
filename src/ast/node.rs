use crate::ast::Tag;

/// Read-only view of a WHERE-clause tree node.
///
/// This is the only thing the walker and the literal coercion functions know
/// about a tree. Parsers expose their own node type through it; nothing here
/// assumes how children are stored.
///
/// # Examples
///
/// ```
/// use query_walker::ast::{Node, Tag, TreeNode};
///
/// let eq = TreeNode::binary(Tag::Eq, TreeNode::column("a"), TreeNode::number("1"));
/// assert_eq!(eq.tag(), Tag::Eq);
/// assert_eq!(eq.child_count(), 2);
/// assert_eq!(eq.child(0).text(), "a");
/// ```
pub trait Node {
    /// Syntactic category of this node.
    fn tag(&self) -> Tag;

    /// Raw lexical payload. Empty for operator nodes.
    fn text(&self) -> &str;

    /// Number of direct children.
    fn child_count(&self) -> usize;

    /// Child at `index` (zero-based, left to right).
    ///
    /// Callers stay within `0..child_count()`; implementations may panic
    /// otherwise.
    fn child(&self, index: usize) -> &Self;

    /// Children in source order.
    fn children(&self) -> impl Iterator<Item = &Self>
    where
        Self: Sized,
    {
        (0..self.child_count()).map(move |i| self.child(i))
    }
}
