//! Configuration loading and management.
//!
//! Loads the `.crew-kit/` directory structure and the model API key.

pub mod credentials;
pub mod error;
pub mod loader;
pub mod models;
