//! Planforge - project planning assistant CLI
//!
//! Main entry point for the Planforge application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use planforge::cli::{Cli, Commands};
use planforge::commands;
use planforge::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GROQ_API_KEY and PLANFORGE_* from a local .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { mode } => {
            if let Some(m) = &mode {
                tracing::debug!("Using mode override: {}", m);
            }
            commands::chat::run_chat(config, mode).await?;
            Ok(())
        }
        Commands::Plan {
            text,
            mode,
            uml,
            render,
        } => {
            tracing::info!("Starting one-shot plan");
            if let Some(diagram) = &uml {
                tracing::debug!("Diagram requested: {} (render: {})", diagram, render);
            }
            commands::plan::run_plan(config, text, mode, uml, render).await?;
            Ok(())
        }
        Commands::Render { file } => {
            tracing::info!("Rendering {}", file.display());
            commands::render::run_render(config, file).await?;
            Ok(())
        }
        Commands::Templates => {
            commands::templates::run_templates(config)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "planforge=debug"
    } else {
        "planforge=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
