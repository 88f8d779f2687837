//! Crew definition and per-run context.
//!
//! - [`builder`]: `CrewBuilder` and the validated `Crew`
//! - [`context`]: the `ExecutionContext` accumulated during a run
//! - [`prompt`]: prompt assembly from agent, task and context

pub mod builder;
pub mod context;
pub mod prompt;

pub use builder::{Crew, CrewBuilder};
pub use context::ExecutionContext;
pub use prompt::build_prompt;
