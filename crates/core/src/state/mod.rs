//! State management for crew runs.

pub mod run;
