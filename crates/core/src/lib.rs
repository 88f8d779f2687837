//! # ck-core
//!
//! Core crew engine and agent execution for crew-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.crew-kit/` directory
//! - Crew construction with build-time validation
//! - The agent executor driving model and tool collaborators
//! - The sequential crew engine and run state
//! - Project scaffolding from embedded templates
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and credentials
//! - [`crew`]: `CrewBuilder`, `Crew`, execution context and prompts
//! - [`agents`]: Collaborator traits, executor and adapters
//! - [`engine`]: Crew execution engine
//! - [`state`]: Run state machine
//! - [`init`]: `.crew-kit/` scaffolding

pub mod agents;
pub mod config;
pub mod crew;
pub mod engine;
pub mod init;
pub mod state;
