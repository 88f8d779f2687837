//! Collaborator implementations.

mod command_client;
mod command_tools;
pub mod scripted;

pub use command_client::CommandModelClient;
pub use command_tools::CommandToolInvoker;
pub use scripted::{ScriptedModelClient, StaticToolInvoker};
