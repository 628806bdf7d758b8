use std::fmt;

use serde_json::{Value as Json, json};

use crate::{
    ast::Node,
    error::{HandlerResult, QueryError},
    handler::ConditionHandler,
};

/// Identifies a [`ConditionHandler`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    StartProcessing,
    StopProcessing,
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEquals,
    LessThan,
    LessOrEquals,
    PreNot,
    Not,
    PostNot,
    PreAnd,
    And,
    PostAnd,
    PreOr,
    Or,
    PostOr,
    In,
    NotIn,
    InAny,
    NotInAny,
    EqAny,
    IsNull,
    IsNotNull,
    IsLike,
    IsNotLike,
    Contains,
    InFolder,
    InTree,
    Score,
}

impl Hook {
    /// Name of the trait method.
    pub fn name(self) -> &'static str {
        match self {
            Hook::StartProcessing => "on_start_processing",
            Hook::StopProcessing => "on_stop_processing",
            Hook::Equals => "on_equals",
            Hook::NotEquals => "on_not_equals",
            Hook::GreaterThan => "on_greater_than",
            Hook::GreaterOrEquals => "on_greater_or_equals",
            Hook::LessThan => "on_less_than",
            Hook::LessOrEquals => "on_less_or_equals",
            Hook::PreNot => "on_pre_not",
            Hook::Not => "on_not",
            Hook::PostNot => "on_post_not",
            Hook::PreAnd => "on_pre_and",
            Hook::And => "on_and",
            Hook::PostAnd => "on_post_and",
            Hook::PreOr => "on_pre_or",
            Hook::Or => "on_or",
            Hook::PostOr => "on_post_or",
            Hook::In => "on_in",
            Hook::NotIn => "on_not_in",
            Hook::InAny => "on_in_any",
            Hook::NotInAny => "on_not_in_any",
            Hook::EqAny => "on_eq_any",
            Hook::IsNull => "on_is_null",
            Hook::IsNotNull => "on_is_not_null",
            Hook::IsLike => "on_is_like",
            Hook::IsNotLike => "on_is_not_like",
            Hook::Contains => "on_contains",
            Hook::InFolder => "on_in_folder",
            Hook::InTree => "on_in_tree",
            Hook::Score => "on_score",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded callback.
///
/// `operands` describes the node arguments after the operator node itself:
/// a node's text, or its tag name when the text is empty. `None` stands for
/// the absent column of a single-argument function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub hook: Hook,
    pub operands: Vec<Option<String>>,
}

impl Event {
    pub fn to_json(&self) -> Json {
        json!({
            "hook": self.hook.name(),
            "operands": self.operands,
        })
    }
}

/// Records every callback it receives, in order.
///
/// # Examples
///
/// ```
/// use query_walker::ast::{Tag, TreeNode};
/// use query_walker::handlers::{EventRecorder, Hook};
/// use query_walker::walk;
///
/// let clause = TreeNode::unary(Tag::IsNull, TreeNode::column("a"));
/// let mut recorder = EventRecorder::new();
/// walk(Some(&clause), &mut recorder).unwrap();
///
/// assert_eq!(
///     recorder.hooks(),
///     vec![Hook::StartProcessing, Hook::IsNull, Hook::StopProcessing]
/// );
/// ```
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
    fail_at: Option<Hook>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that rejects the walk the first time `hook` fires. The
    /// failing callback is still recorded.
    pub fn failing_at(hook: Hook) -> Self {
        EventRecorder {
            events: Vec::new(),
            fail_at: Some(hook),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn hooks(&self) -> Vec<Hook> {
        self.events.iter().map(|e| e.hook).collect()
    }

    pub fn to_json(&self) -> Json {
        Json::Array(self.events.iter().map(Event::to_json).collect())
    }

    fn record(&mut self, hook: Hook, operands: Vec<Option<String>>) -> HandlerResult {
        self.events.push(Event { hook, operands });
        if self.fail_at == Some(hook) {
            return Err(QueryError::Handler(format!("{} rejected by recorder", hook)));
        }
        Ok(())
    }

    fn binary<N: Node>(&mut self, hook: Hook, left: &N, right: &N) -> HandlerResult {
        self.record(hook, vec![Some(describe(left)), Some(describe(right))])
    }

    fn unary<N: Node>(&mut self, hook: Hook, operand: &N) -> HandlerResult {
        self.record(hook, vec![Some(describe(operand))])
    }

    fn function<N: Node>(&mut self, hook: Hook, column: Option<&N>, argument: &N) -> HandlerResult {
        self.record(hook, vec![column.map(describe), Some(describe(argument))])
    }
}

fn describe<N: Node>(node: &N) -> String {
    if node.text().is_empty() {
        node.tag().name().to_string()
    } else {
        node.text().to_string()
    }
}

impl<N: Node> ConditionHandler<N> for EventRecorder {
    fn on_start_processing(&mut self, where_node: &N) -> HandlerResult {
        self.unary(Hook::StartProcessing, where_node)
    }

    fn on_stop_processing(&mut self) -> HandlerResult {
        self.record(Hook::StopProcessing, Vec::new())
    }

    fn on_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::Equals, left, right)
    }

    fn on_not_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::NotEquals, left, right)
    }

    fn on_greater_than(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::GreaterThan, left, right)
    }

    fn on_greater_or_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::GreaterOrEquals, left, right)
    }

    fn on_less_than(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::LessThan, left, right)
    }

    fn on_less_or_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::LessOrEquals, left, right)
    }

    fn on_pre_not(&mut self, _node: &N, operand: &N) -> HandlerResult {
        self.unary(Hook::PreNot, operand)
    }

    fn on_not(&mut self, _node: &N, operand: &N) -> HandlerResult {
        self.unary(Hook::Not, operand)
    }

    fn on_post_not(&mut self, _node: &N, operand: &N) -> HandlerResult {
        self.unary(Hook::PostNot, operand)
    }

    fn on_pre_and(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::PreAnd, left, right)
    }

    fn on_and(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::And, left, right)
    }

    fn on_post_and(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::PostAnd, left, right)
    }

    fn on_pre_or(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::PreOr, left, right)
    }

    fn on_or(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::Or, left, right)
    }

    fn on_post_or(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.binary(Hook::PostOr, left, right)
    }

    fn on_in(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.binary(Hook::In, column, list)
    }

    fn on_not_in(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.binary(Hook::NotIn, column, list)
    }

    fn on_in_any(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.binary(Hook::InAny, column, list)
    }

    fn on_not_in_any(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.binary(Hook::NotInAny, column, list)
    }

    fn on_eq_any(&mut self, _node: &N, literal: &N, column: &N) -> HandlerResult {
        self.binary(Hook::EqAny, literal, column)
    }

    fn on_is_null(&mut self, _node: &N, column: &N) -> HandlerResult {
        self.unary(Hook::IsNull, column)
    }

    fn on_is_not_null(&mut self, _node: &N, column: &N) -> HandlerResult {
        self.unary(Hook::IsNotNull, column)
    }

    fn on_is_like(&mut self, _node: &N, column: &N, pattern: &N) -> HandlerResult {
        self.binary(Hook::IsLike, column, pattern)
    }

    fn on_is_not_like(&mut self, _node: &N, column: &N, pattern: &N) -> HandlerResult {
        self.binary(Hook::IsNotLike, column, pattern)
    }

    fn on_contains(&mut self, _node: &N, column: Option<&N>, search: &N) -> HandlerResult {
        self.function(Hook::Contains, column, search)
    }

    fn on_in_folder(&mut self, _node: &N, column: Option<&N>, folder: &N) -> HandlerResult {
        self.function(Hook::InFolder, column, folder)
    }

    fn on_in_tree(&mut self, _node: &N, column: Option<&N>, folder: &N) -> HandlerResult {
        self.function(Hook::InTree, column, folder)
    }

    fn on_score(&mut self, _node: &N) -> HandlerResult {
        self.record(Hook::Score, Vec::new())
    }
}
