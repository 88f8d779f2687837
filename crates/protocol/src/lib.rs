//! # ck-protocol
//!
//! Data models shared by every crew-kit crate.
//!
//! This crate defines the structures used for:
//! - Configuration file parsing (TOML config, Markdown agents, YAML crews)
//! - Run results and run state
//! - Progress events emitted by the engine
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent definitions and tool references
//! - [`task_models`]: Task definitions and task outputs
//! - [`crew_models`]: Crew files and process modes
//! - [`config_models`]: Global configuration from config.toml
//! - [`run_models`]: Runtime run state and status
//! - [`events`]: Progress events

pub mod agent_models;
pub mod config_models;
pub mod crew_models;
pub mod events;
pub mod run_models;
pub mod task_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use crew_models::*;
pub use events::*;
pub use run_models::*;
pub use task_models::*;
