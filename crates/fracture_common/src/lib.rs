//! Shared types and logic for the fracture analysis assistant.
//!
//! Used by both the analysis daemon (`fractd`) and the CLI client
//! (`fractctl`). The deterministic fallback classifier lives here so the
//! client can produce a result without the daemon.

pub mod api;
pub mod chat;
pub mod classifier;
pub mod error;
pub mod report;
pub mod state;
pub mod types;
pub mod validate;

pub use error::FractureError;
pub use types::{AnalysisRecord, BoneType, ClassificationResult, EngineKind, ReferenceCase};

/// Crate version shared across binaries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
