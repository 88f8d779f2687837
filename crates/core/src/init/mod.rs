//! `crew init`: scaffold a `.crew-kit/` project from the templates compiled
//! into the binary.
//!
//! The full scaffold has three agents and two crews (`research-report`,
//! `quick-research`). Minimal mode writes only the researcher and
//! `quick-research`.
//!
//! ```no_run
//! # async fn example() -> ck_core::init::InitResult<()> {
//! use ck_core::init::{generate_crew_kit_structure, InitOptions};
//!
//! let written = generate_crew_kit_structure(InitOptions {
//!     minimal: true,
//!     ..InitOptions::default()
//! })
//! .await?;
//! assert_eq!(written.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_crew_kit_structure, InitOptions};
pub use templates::{get_template, list_templates};
