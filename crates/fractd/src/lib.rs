//! Fracture analysis daemon library - exposes modules for testing.

pub mod chatbot;
pub mod config;
pub mod engine;
pub mod routes;
pub mod server;
pub mod state;
