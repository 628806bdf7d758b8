//! Ready-made [`ConditionHandler`](crate::handler::ConditionHandler)
//! implementations.
//!
//! - **[recorder]** - [`EventRecorder`] keeps the raw callback stream, for
//!   tests and for the `qwalk trace` command
//! - **[translator]** - [`WhereTranslator`] renders the clause back to text
pub mod recorder;
pub mod translator;

pub use recorder::{Event, EventRecorder, Hook};
pub use translator::WhereTranslator;
