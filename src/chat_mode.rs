//! Plan mode types and utilities
//!
//! This module defines the two plan modes offered by the chat session:
//! - Basic mode: the structured five-section project plan
//! - Advanced mode: a deeper plan with architecture, risks and estimates

use crate::prompts::TemplateKey;
use colored::Colorize;
use std::fmt;

/// Plan mode for interactive sessions
///
/// Determines which prompt template a plan request is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanMode {
    /// Basic five-section plan
    #[default]
    Basic,

    /// Extended plan with architecture and risk analysis
    Advanced,
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "BASIC"),
            Self::Advanced => write!(f, "ADVANCED"),
        }
    }
}

impl PlanMode {
    /// Parse a plan mode from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use planforge::chat_mode::PlanMode;
    ///
    /// assert_eq!(PlanMode::parse_str("Advanced").unwrap(), PlanMode::Advanced);
    /// assert!(PlanMode::parse_str("expert").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown plan mode: {}", other)),
        }
    }

    /// Prompt template used for plan requests in this mode
    pub fn template_key(&self) -> TemplateKey {
        match self {
            Self::Basic => TemplateKey::BasicPlan,
            Self::Advanced => TemplateKey::AdvancedPlan,
        }
    }

    /// Get a user-friendly description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "Structured plan: requirements, workflow, team, timeline, tasks",
            Self::Advanced => "Detailed plan with architecture, risks and cost breakdown",
        }
    }

    /// Get a colored tag representation of this mode
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Basic => format!("[{}]", "BASIC".cyan()),
            Self::Advanced => format!("[{}]", "ADVANCED".purple()),
        }
    }

    /// Readline prompt showing the active mode
    pub fn format_colored_prompt(&self) -> String {
        format!("{} >> ", self.colored_tag())
    }
}
