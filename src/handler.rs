//! The callback interface backends implement to receive a walk.
//!
//! The walker calls these in the order documented on
//! [`Walker::walk`](crate::walker::Walker::walk). Every callback gets the
//! operator node itself plus its raw, unevaluated operand nodes; what a
//! handler does with them (render them, coerce them with
//! [`coerce_literal`](crate::literal::coerce_literal), walk into them on its
//! own) is up to the handler. Handlers must not mutate the tree.
//!
//! Only the bracketing hooks (`on_pre_*` / `on_post_*`) have defaults. Every
//! operator callback has to be written out, so a backend that forgets one does
//! not compile.

use crate::{ast::Node, error::HandlerResult};

/// A backend receiving typed callbacks from a WHERE-clause walk.
///
/// A handler typically owns an accumulator (an output buffer, a predicate
/// under construction) for the length of one walk. Set it up in
/// [`on_start_processing`](Self::on_start_processing) and finish it in
/// [`on_stop_processing`](Self::on_stop_processing).
pub trait ConditionHandler<N: Node> {
    /// First callback of every non-empty walk.
    fn on_start_processing(&mut self, where_node: &N) -> HandlerResult;

    /// Last callback of every successful non-empty walk.
    fn on_stop_processing(&mut self) -> HandlerResult;

    // Comparison
    fn on_equals(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_not_equals(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_greater_than(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_greater_or_equals(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_less_than(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_less_or_equals(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;

    // Boolean
    fn on_pre_not(&mut self, _node: &N, _operand: &N) -> HandlerResult {
        Ok(())
    }
    fn on_not(&mut self, node: &N, operand: &N) -> HandlerResult;
    fn on_post_not(&mut self, _node: &N, _operand: &N) -> HandlerResult {
        Ok(())
    }

    fn on_pre_and(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        Ok(())
    }
    fn on_and(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_post_and(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        Ok(())
    }

    fn on_pre_or(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        Ok(())
    }
    fn on_or(&mut self, node: &N, left: &N, right: &N) -> HandlerResult;
    fn on_post_or(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        Ok(())
    }

    // Multi-value
    fn on_in(&mut self, node: &N, column: &N, list: &N) -> HandlerResult;
    fn on_not_in(&mut self, node: &N, column: &N, list: &N) -> HandlerResult;
    fn on_in_any(&mut self, node: &N, column: &N, list: &N) -> HandlerResult;
    fn on_not_in_any(&mut self, node: &N, column: &N, list: &N) -> HandlerResult;
    /// `literal = ANY column`: the literal is the left operand.
    fn on_eq_any(&mut self, node: &N, literal: &N, column: &N) -> HandlerResult;

    // Null tests
    fn on_is_null(&mut self, node: &N, column: &N) -> HandlerResult;
    fn on_is_not_null(&mut self, node: &N, column: &N) -> HandlerResult;

    // String matching
    fn on_is_like(&mut self, node: &N, column: &N, pattern: &N) -> HandlerResult;
    fn on_is_not_like(&mut self, node: &N, column: &N, pattern: &N) -> HandlerResult;

    // Functions. `column` is `None` when the call has no qualifying column.
    fn on_contains(&mut self, node: &N, column: Option<&N>, search: &N) -> HandlerResult;
    fn on_in_folder(&mut self, node: &N, column: Option<&N>, folder: &N) -> HandlerResult;
    fn on_in_tree(&mut self, node: &N, column: Option<&N>, folder: &N) -> HandlerResult;
    fn on_score(&mut self, node: &N) -> HandlerResult;
}
