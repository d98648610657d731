//! Command-line interface definition for Planforge
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot planning,
//! diagram rendering, and template listing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Planforge - project planning assistant
///
/// Turn a project idea into a structured plan and, optionally,
/// a UML diagram description rendered by an external tool.
#[derive(Parser, Debug, Clone)]
#[command(name = "planforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the provider from config (groq, ollama)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Override the root directory for generated diagrams
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Planforge
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive planning session
    Chat {
        /// Plan mode: basic or advanced
        #[arg(short, long, default_value = "basic")]
        mode: Option<String>,
    },

    /// Generate a single plan and optionally a diagram
    Plan {
        /// Project name or description
        text: String,

        /// Plan mode: basic or advanced
        #[arg(short, long, default_value = "basic")]
        mode: String,

        /// Also generate a diagram (Class, Sequence, UseCase, Activity, Component)
        #[arg(long)]
        uml: Option<String>,

        /// Render the generated diagram with the external renderer
        #[arg(long, requires = "uml")]
        render: bool,
    },

    /// Render an existing diagram file with the external renderer
    Render {
        /// Path to a generated `*_diagram.txt` file
        file: PathBuf,
    },

    /// List the prompt templates and the models they use
    Templates,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
