/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`      - Interactive planning session
- `plan`      - One-shot plan, with an optional diagram and rendering
- `render`    - Render an existing diagram file
- `templates` - List the prompt catalog

The handlers only deal with presentation; the workflow itself lives in
[`crate::workflow`].
*/

use crate::chat_mode::PlanMode;
use crate::commands::special_commands::SaveTarget;
use crate::config::Config;
use crate::diagram::DisplayFormat;
use crate::error::{PlanforgeError, Result};
use crate::session::{Role, Session};
use crate::workflow::{ActionOutcome, Notice, WorkflowController};
use colored::Colorize;
use std::path::{Path, PathBuf};

// Special commands parser for the interactive session
pub mod special_commands;

/// Print the reply, saved path and notices of one action
fn print_outcome(outcome: &ActionOutcome) {
    if let Some(reply) = &outcome.reply {
        println!();
        match outcome.format {
            DisplayFormat::Diagram => {
                println!("{}", "Planner AI:".green().bold());
                println!("```plantuml\n{}\n```", reply.trim());
            }
            DisplayFormat::PlainText => {
                println!("{} {}", "Planner AI:".green().bold(), reply);
            }
        }
        println!();
    }

    if let Some(path) = &outcome.saved_to {
        println!("{}", format!("Diagram saved to {}", path.display()).cyan());
    }

    for notice in &outcome.notices {
        match notice {
            Notice::Warning(message) => println!("{}", message.yellow()),
            Notice::Error(message) => eprintln!("{}", message.red()),
        }
    }
}

/// Write the latest artifact or the whole transcript to `path`
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns `PlanforgeError::EmptyInput` if there is nothing to save, or an IO
/// error if the file cannot be written
pub async fn save_session(session: &Session, target: SaveTarget, path: &Path) -> Result<PathBuf> {
    let contents = match target {
        SaveTarget::Artifact => session
            .latest_artifact()
            .map(str::to_owned)
            .ok_or_else(|| PlanforgeError::EmptyInput("no plan to save yet".to_string()))?,
        SaveTarget::Transcript => {
            if session.is_empty() {
                return Err(
                    PlanforgeError::EmptyInput("the conversation is empty".to_string()).into(),
                );
            }
            session.transcript()
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(PlanforgeError::Io)?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(PlanforgeError::Io)?;

    tracing::info!("Saved {:?} to {}", target, path.display());
    Ok(path.to_path_buf())
}

// Chat command handler
pub mod chat {
    //! Interactive planning session.
    //!
    //! Builds a [`WorkflowController`] for the configured provider and runs a
    //! readline loop. Special commands are handled locally; anything else is a
    //! plan request in the current mode.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::diagram::DiagramType;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// State of the interactive loop besides the session itself
    struct ChatState {
        mode: PlanMode,
        session: Session,
        last_diagram: Option<PathBuf>,
    }

    /// Start the interactive planning session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `mode` - Optional initial plan mode ("basic" or "advanced")
    ///
    /// # Examples
    ///
    /// ```
    /// use planforge::commands::chat;
    /// use planforge::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), None).await?;
    /// ```
    pub async fn run_chat(config: Config, mode: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive planning session");

        let initial_mode = mode
            .as_deref()
            .and_then(|m| PlanMode::parse_str(m).ok())
            .unwrap_or_default();

        let controller = WorkflowController::from_config(&config)?;
        let mut state = ChatState {
            mode: initial_mode,
            session: Session::new(),
            last_diagram: None,
        };

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&state.mode, controller.provider_name());

        loop {
            let prompt = state.mode.format_colored_prompt();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", e.to_string().yellow());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::SwitchMode(new_mode) => {
                            let old_mode = std::mem::replace(&mut state.mode, new_mode);
                            println!("Switched from {} to {} mode\n", old_mode, new_mode);
                        }
                        SpecialCommand::Uml(diagram) => {
                            handle_uml(&controller, &mut state, diagram).await;
                        }
                        SpecialCommand::Render => {
                            handle_render(&controller, &state).await;
                        }
                        SpecialCommand::ShowHistory => print_history(&state.session),
                        SpecialCommand::Clear => {
                            controller.clear(&mut state.session);
                            state.last_diagram = None;
                            println!("{}", "Session cleared".cyan());
                        }
                        SpecialCommand::Save { target, path } => {
                            match save_session(&state.session, target, &path).await {
                                Ok(path) => println!(
                                    "{}",
                                    format!("Saved to {}", path.display()).cyan()
                                ),
                                Err(e) => println!("{}", e.to_string().yellow()),
                            }
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&controller, &state);
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            let outcome =
                                controller.plan(&mut state.session, state.mode, trimmed).await;
                            print_outcome(&outcome);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn handle_uml(controller: &WorkflowController, state: &mut ChatState, diagram: DiagramType) {
        println!("{}", format!("Generating {} diagram...", diagram).cyan());
        let outcome = controller.uml(&mut state.session, diagram).await;
        if let Some(path) = &outcome.saved_to {
            state.last_diagram = Some(path.clone());
        }
        print_outcome(&outcome);
        if outcome.saved_to.is_some() {
            println!("Type '/render' to produce an image\n");
        }
    }

    async fn handle_render(controller: &WorkflowController, state: &ChatState) {
        let Some(file) = &state.last_diagram else {
            println!(
                "{}",
                "No diagram saved yet. Use '/uml <type>' first.".yellow()
            );
            return;
        };

        match controller.render(file).await {
            Ok(image) => println!("{}", format!("Rendered {}", image.display()).green()),
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    fn print_history(session: &Session) {
        if session.is_empty() {
            println!("{}", "No messages yet".yellow());
            return;
        }

        println!();
        for message in session.messages() {
            let label = format!("{}:", message.role().display_label());
            let label = match message.role() {
                Role::User => label.blue().bold(),
                Role::Assistant => label.green().bold(),
            };
            println!("{} {}\n", label, message.content());
        }
    }

    fn print_welcome_banner(mode: &PlanMode, provider: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║          Planforge Interactive Planner - Welcome!            ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Mode:     {} ({})", mode.colored_tag(), mode.description());
        println!("Provider: {}\n", provider);
        println!("Describe a project to get a plan. Type '/help' for commands, 'exit' to quit\n");
    }

    fn print_status_display(controller: &WorkflowController, state: &ChatState) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Planforge Session Status                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Plan Mode:         {} ({})",
            state.mode.colored_tag(),
            state.mode.description()
        );
        println!("Provider:          {}", controller.provider_name());
        println!(
            "Output Directory:  {}",
            controller.renderer().output_root().display()
        );
        println!("Conversation Size: {} messages", state.session.len());
        println!(
            "Latest Plan:       {}",
            if state.session.latest_artifact().is_some() {
                "available"
            } else {
                "none"
            }
        );
        if let Some(path) = &state.last_diagram {
            println!("Last Diagram:      {}", path.display());
        }
        println!();
    }
}

// One-shot plan handler
pub mod plan {
    //! Non-interactive plan, diagram and render in one invocation.

    use super::*;
    use crate::diagram::DiagramType;

    /// Generate a plan for `text`, then optionally a diagram and an image
    ///
    /// # Errors
    ///
    /// Returns error for an invalid mode or diagram type, if the provider
    /// cannot be created, or if rendering fails
    pub async fn run_plan(
        config: Config,
        text: String,
        mode: String,
        uml: Option<String>,
        render: bool,
    ) -> Result<()> {
        let mode = PlanMode::parse_str(&mode).map_err(anyhow::Error::msg)?;
        let diagram = uml.as_deref().map(DiagramType::parse_str).transpose()?;

        let controller = WorkflowController::from_config(&config)?;
        let mut session = Session::new();

        tracing::info!("Running one-shot plan in {} mode", mode);
        let outcome = controller.plan(&mut session, mode, &text).await;
        print_outcome(&outcome);

        let Some(diagram) = diagram else {
            return Ok(());
        };

        if session.latest_artifact().is_none() {
            tracing::warn!("Skipping diagram, no plan was produced");
            return Ok(());
        }

        let outcome = controller.uml(&mut session, diagram).await;
        print_outcome(&outcome);

        if render {
            if let Some(file) = &outcome.saved_to {
                let image = controller.render(file).await?;
                println!("{}", format!("Rendered {}", image.display()).green());
            }
        }

        Ok(())
    }
}

// Render handler
pub mod render {
    //! Run the external renderer on an existing diagram file.

    use super::*;
    use crate::renderer::ArtifactRenderer;

    /// Render `file` with the configured renderer
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::RenderingFailed` if the file is missing or the
    /// renderer fails
    pub async fn run_render(config: Config, file: PathBuf) -> Result<()> {
        let renderer = ArtifactRenderer::new(&config.output, &config.renderer);
        let image = renderer.render(&file).await?;
        println!("{}", format!("Rendered {}", image.display()).green());
        Ok(())
    }
}

// Template listing handler
pub mod templates {
    //! Print the prompt catalog as a table.

    use super::*;
    use crate::prompts::{PromptCatalog, TemplateKey};
    use prettytable::{row, Table};

    fn purpose(key: TemplateKey) -> &'static str {
        match key {
            TemplateKey::BasicPlan => "Plan requests in basic mode",
            TemplateKey::AdvancedPlan => "Plan requests in advanced mode",
            TemplateKey::Uml => "Diagram requests (/uml, --uml)",
        }
    }

    /// Build the catalog table: one header row plus one row per template
    pub fn build_templates_table(catalog: &PromptCatalog) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Template", "Model", "Used For"]);

        for template in catalog.templates() {
            let name = template.name();
            let model = template.model();
            let used_for = purpose(template.key());
            table.add_row(row![name, model, used_for]);
        }

        table
    }

    /// List the templates with the models configured for them
    pub fn run_templates(config: Config) -> Result<()> {
        let catalog = PromptCatalog::new(&config.models);
        println!("\nPrompt templates:\n");
        build_templates_table(&catalog).printstd();
        println!();
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::ModelsConfig;

        #[test]
        fn test_templates_table_has_row_per_template() {
            let catalog = PromptCatalog::new(&ModelsConfig::default());
            let table = build_templates_table(&catalog);
            assert_eq!(table.len(), 1 + TemplateKey::ALL.len());
        }

        #[test]
        fn test_templates_table_shows_configured_model() {
            let models = ModelsConfig {
                uml: "custom-uml-model".to_string(),
                ..ModelsConfig::default()
            };
            let table = build_templates_table(&PromptCatalog::new(&models));
            let rendered = table.to_string();
            assert!(rendered.contains("custom-uml-model"));
            assert!(rendered.contains("advanced-plan"));
        }
    }
}
