use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{Node, Tag},
    error::{HandlerResult, QueryError},
    handler::ConditionHandler,
    literal::coerce_literal,
    observability::log_debug,
    value::LiteralValue,
};

/// Identifiers that can be written without quoting, including namespaced
/// property names such as `cmis:name` and qualified ones such as `d.title`.
static PLAIN_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_:.]*$").expect("identifier pattern is valid")
});

/// Renders a WHERE clause back to query text.
///
/// Comparisons come out as `<left> <op> <right>`. Each `AND` and `OR` is
/// wrapped in parentheses through its pre/post hooks, so the text keeps the
/// tree's grouping whatever the precedence rules of the target dialect.
/// Literals are checked by coercion first. Strings keep their source text,
/// and other literals are re-rendered from their coerced values.
///
/// Operands must be columns, identifiers, literals or literal lists; anything
/// else is rejected with [`QueryError::Handler`].
#[derive(Debug, Default)]
pub struct WhereTranslator {
    out: String,
}

impl WhereTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text produced so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn operand<N: Node>(&self, node: &N) -> Result<String, QueryError> {
        match node.tag() {
            Tag::Column | Tag::Identifier => Ok(quote_identifier(node.text())),
            Tag::BoolLit | Tag::NumLit | Tag::StringLit | Tag::TimeLit => self.literal(node),
            Tag::InList => {
                let items = node
                    .children()
                    .map(|item| self.literal(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("({})", items.join(", ")))
            }
            tag => Err(QueryError::Handler(format!(
                "cannot translate {} as an operand",
                tag
            ))),
        }
    }

    /// String literals are copied from the source text: coercion keeps lexer
    /// escapes such as `''`, so re-rendering the value would escape twice.
    fn literal<N: Node>(&self, node: &N) -> Result<String, QueryError> {
        match coerce_literal(node)? {
            LiteralValue::String(_) => Ok(node.text().to_string()),
            value => Ok(value.to_string()),
        }
    }

    fn infix<N: Node>(&mut self, left: &N, op: &str, right: &N) -> HandlerResult {
        let text = format!("{} {} {}", self.operand(left)?, op, self.operand(right)?);
        self.out.push_str(&text);
        Ok(())
    }

    fn function<N: Node>(&mut self, name: &str, column: Option<&N>, argument: &N) -> HandlerResult {
        let argument = self.operand(argument)?;
        let text = match column {
            Some(column) => format!("{}({}, {})", name, self.operand(column)?, argument),
            None => format!("{}({})", name, argument),
        };
        self.out.push_str(&text);
        Ok(())
    }
}

fn quote_identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// `AND` and `OR` bring their own parentheses.
fn is_grouped<N: Node>(node: &N) -> bool {
    matches!(node.tag(), Tag::And | Tag::Or)
}

impl<N: Node> ConditionHandler<N> for WhereTranslator {
    fn on_start_processing(&mut self, where_node: &N) -> HandlerResult {
        log_debug!(event = "translation_started", root = %where_node.tag());
        self.out.clear();
        Ok(())
    }

    fn on_stop_processing(&mut self) -> HandlerResult {
        log_debug!(event = "translation_finished", length = self.out.len());
        Ok(())
    }

    fn on_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, "=", right)
    }

    fn on_not_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, "<>", right)
    }

    fn on_greater_than(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, ">", right)
    }

    fn on_greater_or_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, ">=", right)
    }

    fn on_less_than(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, "<", right)
    }

    fn on_less_or_equals(&mut self, _node: &N, left: &N, right: &N) -> HandlerResult {
        self.infix(left, "<=", right)
    }

    fn on_not(&mut self, _node: &N, operand: &N) -> HandlerResult {
        self.out.push_str(if is_grouped(operand) { "NOT " } else { "NOT (" });
        Ok(())
    }

    fn on_post_not(&mut self, _node: &N, operand: &N) -> HandlerResult {
        if !is_grouped(operand) {
            self.out.push(')');
        }
        Ok(())
    }

    fn on_pre_and(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push('(');
        Ok(())
    }

    fn on_and(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push_str(" AND ");
        Ok(())
    }

    fn on_post_and(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push(')');
        Ok(())
    }

    fn on_pre_or(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push('(');
        Ok(())
    }

    fn on_or(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push_str(" OR ");
        Ok(())
    }

    fn on_post_or(&mut self, _node: &N, _left: &N, _right: &N) -> HandlerResult {
        self.out.push(')');
        Ok(())
    }

    fn on_in(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.infix(column, "IN", list)
    }

    fn on_not_in(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.infix(column, "NOT IN", list)
    }

    fn on_in_any(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.out.push_str("ANY ");
        self.infix(column, "IN", list)
    }

    fn on_not_in_any(&mut self, _node: &N, column: &N, list: &N) -> HandlerResult {
        self.out.push_str("ANY ");
        self.infix(column, "NOT IN", list)
    }

    fn on_eq_any(&mut self, _node: &N, literal: &N, column: &N) -> HandlerResult {
        let text = format!("{} = ANY {}", self.operand(literal)?, self.operand(column)?);
        self.out.push_str(&text);
        Ok(())
    }

    fn on_is_null(&mut self, _node: &N, column: &N) -> HandlerResult {
        let text = format!("{} IS NULL", self.operand(column)?);
        self.out.push_str(&text);
        Ok(())
    }

    fn on_is_not_null(&mut self, _node: &N, column: &N) -> HandlerResult {
        let text = format!("{} IS NOT NULL", self.operand(column)?);
        self.out.push_str(&text);
        Ok(())
    }

    fn on_is_like(&mut self, _node: &N, column: &N, pattern: &N) -> HandlerResult {
        self.infix(column, "LIKE", pattern)
    }

    fn on_is_not_like(&mut self, _node: &N, column: &N, pattern: &N) -> HandlerResult {
        self.infix(column, "NOT LIKE", pattern)
    }

    fn on_contains(&mut self, _node: &N, column: Option<&N>, search: &N) -> HandlerResult {
        self.function("CONTAINS", column, search)
    }

    fn on_in_folder(&mut self, _node: &N, column: Option<&N>, folder: &N) -> HandlerResult {
        self.function("IN_FOLDER", column, folder)
    }

    fn on_in_tree(&mut self, _node: &N, column: Option<&N>, folder: &N) -> HandlerResult {
        self.function("IN_TREE", column, folder)
    }

    fn on_score(&mut self, _node: &N) -> HandlerResult {
        self.out.push_str("SCORE()");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_stay_bare() {
        assert_eq!(quote_identifier("cmis:name"), "cmis:name");
        assert_eq!(quote_identifier("d.title"), "d.title");
        assert_eq!(quote_identifier("_x1"), "_x1");
    }

    #[test]
    fn other_identifiers_are_quoted() {
        assert_eq!(quote_identifier("my col"), "\"my col\"");
        assert_eq!(quote_identifier("1st"), "\"1st\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
