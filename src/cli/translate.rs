//! Render the input tree as WHERE-clause text

use super::{CliError, WalkCommandOptions};
use crate::{Walker, handlers::WhereTranslator};

/// Walk the input tree with a [`WhereTranslator`]. An empty clause yields an
/// empty string.
pub fn execute_sql(options: &WalkCommandOptions) -> Result<String, CliError> {
    let tree = options.load_tree()?;
    let mut translator = WhereTranslator::new();
    Walker::new(options.walk_options()).walk(tree.as_ref(), &mut translator)?;
    Ok(translator.finish())
}
