//! Agent abstraction and execution.
//!
//! This module provides the collaborator traits (`ModelClient`,
//! `ToolInvoker`), the `AgentExecutor` that drives an agent through a task,
//! the `AgentRegistry` that owns a crew's agent definitions, and the
//! implementations of the collaborators.

pub mod adapters;
pub mod base;
pub mod cli_executor;
pub mod executor;
pub mod factory;
pub mod registry;

pub use adapters::{ScriptedModelClient, StaticToolInvoker};
pub use base::{AgentError, AgentEvent, ModelClient, ModelError, ModelResponse, ToolError, ToolInvoker};
pub use executor::AgentExecutor;
pub use factory::ClientFactory;
pub use registry::AgentRegistry;
