//! Dump the callback stream of a walk

use super::{CliError, WalkCommandOptions};
use crate::{Walker, handlers::EventRecorder};

/// Walk the input tree with an [`EventRecorder`] and return the recorded
/// events as a JSON array.
pub fn execute_trace(options: &WalkCommandOptions) -> Result<serde_json::Value, CliError> {
    let tree = options.load_tree()?;
    let mut recorder = EventRecorder::new();
    Walker::new(options.walk_options()).walk(tree.as_ref(), &mut recorder)?;
    Ok(recorder.to_json())
}
