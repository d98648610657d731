//! Special commands parser for interactive chat mode
//!
//! Special commands control the planning session instead of being sent to
//! the completion service:
//! - Switch between Basic and Advanced plan modes
//! - Request a UML diagram of the latest plan and render it
//! - Show, clear or save the session history
//! - Display status and help, and exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. Arguments that
//! name files keep their original case.

use crate::chat_mode::PlanMode;
use crate::diagram::DiagramType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// What `/save` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// The latest plan artifact
    Artifact,
    /// The whole labelled history
    Transcript,
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Switch the plan mode used for subsequent plan requests
    SwitchMode(PlanMode),

    /// Generate a diagram of the latest plan
    Uml(DiagramType),

    /// Render the most recently saved diagram
    Render,

    /// Print the session history
    ShowHistory,

    /// Reset the session
    Clear,

    /// Write the latest artifact or the transcript to a file
    Save { target: SaveTarget, path: PathBuf },

    /// Display current mode, provider and output location
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input is a plan request in the current mode.
    None,
}

fn mode_usage() -> CommandError {
    CommandError::MissingArgument {
        command: "/mode".to_string(),
        usage: "/mode <basic|advanced>".to_string(),
    }
}

fn uml_usage() -> CommandError {
    CommandError::MissingArgument {
        command: "/uml".to_string(),
        usage: "/uml <class|sequence|usecase|activity|component>".to_string(),
    }
}

fn save_usage() -> CommandError {
    CommandError::MissingArgument {
        command: "/save".to_string(),
        usage: "/save [--transcript] <path>".to_string(),
    }
}

/// Parse a user input string into a special command
///
/// Returns `SpecialCommand::None` for input that is not a command.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not
/// a valid command, `CommandError::UnsupportedArgument` for an invalid
/// argument, and `CommandError::MissingArgument` when an argument is required.
///
/// # Examples
///
/// ```
/// use planforge::chat_mode::PlanMode;
/// use planforge::commands::special_commands::{parse_special_command, SpecialCommand};
/// use planforge::diagram::DiagramType;
///
/// let cmd = parse_special_command("/mode advanced").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchMode(PlanMode::Advanced));
///
/// let cmd = parse_special_command("/uml sequence").unwrap();
/// assert_eq!(cmd, SpecialCommand::Uml(DiagramType::Sequence));
///
/// let cmd = parse_special_command("Build a todo app").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // Plain text is a plan request, except exit/quit
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/basic" if rest.is_empty() => Ok(SpecialCommand::SwitchMode(PlanMode::Basic)),
        "/advanced" if rest.is_empty() => Ok(SpecialCommand::SwitchMode(PlanMode::Advanced)),

        "/mode" if rest.is_empty() => Err(mode_usage()),
        "/mode" => PlanMode::parse_str(rest)
            .map(SpecialCommand::SwitchMode)
            .map_err(|_| CommandError::UnsupportedArgument {
                command: "/mode".to_string(),
                arg: rest.to_lowercase(),
            }),

        "/uml" if rest.is_empty() => Err(uml_usage()),
        "/uml" => DiagramType::parse_str(rest)
            .map(SpecialCommand::Uml)
            .map_err(|_| CommandError::UnsupportedArgument {
                command: "/uml".to_string(),
                arg: rest.to_string(),
            }),

        "/save" => {
            let (target, path) = match rest.split_once(char::is_whitespace) {
                Some((flag, path)) if flag.eq_ignore_ascii_case("--transcript") => {
                    (SaveTarget::Transcript, path.trim())
                }
                _ if rest.eq_ignore_ascii_case("--transcript") => {
                    (SaveTarget::Transcript, "")
                }
                _ => (SaveTarget::Artifact, rest),
            };
            if path.is_empty() {
                return Err(save_usage());
            }
            Ok(SpecialCommand::Save {
                target,
                path: PathBuf::from(path),
            })
        }

        "/render" if rest.is_empty() => Ok(SpecialCommand::Render),
        "/history" if rest.is_empty() => Ok(SpecialCommand::ShowHistory),
        "/clear" if rest.is_empty() => Ok(SpecialCommand::Clear),
        "/status" if rest.is_empty() => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" if rest.is_empty() => Ok(SpecialCommand::Help),
        "exit" | "quit" | "/exit" | "/quit" if rest.is_empty() => Ok(SpecialCommand::Exit),

        "/basic" | "/advanced" | "/render" | "/history" | "/clear" | "/status" | "/help"
        | "/?" | "/exit" | "/quit" => Err(CommandError::UnsupportedArgument {
            command: command.clone(),
            arg: rest.to_string(),
        }),

        _ => Err(CommandError::UnknownCommand(command.clone())),
    }
}

/// Display help text for special commands
///
/// # Examples
///
/// ```
/// use planforge::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Planning
=========================================

PLAN MODE SWITCHING:
  /basic              - Switch to Basic mode (five-section plan)
  /advanced           - Switch to Advanced mode (architecture, risks, costs)
  /mode <basic|advanced> - Same as the shorthands above

DIAGRAMS:
  /uml <type>         - Generate a PlantUML diagram of the latest plan
                        Types: class, sequence, usecase, activity, component
  /render             - Render the most recently saved diagram to an image

SESSION:
  /history            - Show the conversation so far
  /clear              - Clear history and the latest plan (no undo)
  /save <path>        - Save the latest plan or diagram to a file
  /save --transcript <path> - Save the whole conversation
  /status             - Show mode, provider and output directory
  /help               - Show this help message
  /?                  - Same as /help

SESSION CONTROL:
  exit                - Exit interactive mode
  quit                - Same as exit

NOTES:
  - Commands are case-insensitive
  - Any other text is sent as a plan request in the current mode
  - Diagrams are saved under <output>/<YYYY-MM-DD>/<HHMMSS>_<Type>_diagram.txt
"#
    );
}
