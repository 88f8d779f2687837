//! Common test utilities shared by the integration tests.
//!
//! - Test fixtures (project directories, crews)
//! - Event assertions

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
