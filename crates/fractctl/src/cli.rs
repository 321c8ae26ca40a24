//! CLI - command-line argument parsing.
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fracture assistant CLI
#[derive(Parser)]
#[command(name = "fractctl")]
#[command(about = "Fracture assistant - X-ray analysis client", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Analysis daemon base URL (overrides the default)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload an X-ray image and analyze it
    Analyze {
        /// Path to the image file
        image: PathBuf,

        /// User name attached to the analysis
        #[arg(long, default_value = "Unknown")]
        user: String,

        /// User type (doctor, radiologist, patient, admin)
        #[arg(long, default_value = "doctor")]
        user_type: String,

        /// Write a report file after the analysis
        #[arg(long)]
        report: Option<PathBuf>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show recent analyses stored by the daemon
    History {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Ask the assistant a question
    Chat {
        /// The question to ask
        message: String,
    },

    /// Show daemon health
    Status,
}
