//! Fracture assistant CLI library - exposes modules for testing.

pub mod analyze;
pub mod cli;
pub mod client;
pub mod commands;
pub mod display;
