//! Planforge - project planning assistant library
//!
//! This library turns a short project description into a structured plan
//! through a chat-completion service, derives PlantUML diagrams from the
//! latest plan, stores them on disk and renders them with an external tool.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `prompts`: Prompt catalog (basic plan, advanced plan, UML)
//! - `providers`: Completion service abstraction (Groq, Ollama) and client
//! - `session`: Conversation history and the latest plan artifact
//! - `workflow`: Plan, UML and clear actions over a session
//! - `renderer`: Diagram persistence and external rendering
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and its handlers
//!
//! # Example
//!
//! ```no_run
//! use planforge::{Config, PlanMode, Session, WorkflowController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let controller = WorkflowController::from_config(&config)?;
//!     let mut session = Session::new();
//!     let outcome = controller
//!         .plan(&mut session, PlanMode::Basic, "Build a todo app")
//!         .await;
//!     println!("{:?}", outcome.reply);
//!     Ok(())
//! }
//! ```

pub mod chat_mode;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diagram;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod renderer;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use chat_mode::PlanMode;
pub use config::Config;
pub use diagram::{DiagramType, DisplayFormat};
pub use error::{PlanforgeError, Result, ServiceError};
pub use prompts::{PromptCatalog, TemplateKey};
pub use renderer::ArtifactRenderer;
pub use session::{ChatMessage, Role, Session};
pub use workflow::{ActionOutcome, Notice, WorkflowController};
