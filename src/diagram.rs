//! Diagram types and diagram-markup detection
//!
//! Marker detection only decides how a reply is displayed. A reply that does
//! not start with `@startuml` is still kept and shown, as plain text.

use crate::error::PlanforgeError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Literal token that opens a PlantUML diagram
pub const DIAGRAM_START_MARKER: &str = "@startuml";

/// Kind of UML diagram a user can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramType {
    /// Class diagram
    Class,
    /// Sequence diagram
    Sequence,
    /// Use case diagram
    UseCase,
    /// Activity diagram
    Activity,
    /// Component diagram
    Component,
}

impl DiagramType {
    /// Every supported diagram type, in menu order
    pub const ALL: [DiagramType; 5] = [
        Self::Class,
        Self::Sequence,
        Self::UseCase,
        Self::Activity,
        Self::Component,
    ];

    /// Label embedded in prompts and file names
    pub fn label(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Sequence => "Sequence",
            Self::UseCase => "UseCase",
            Self::Activity => "Activity",
            Self::Component => "Component",
        }
    }

    /// Parse a diagram type, ignoring case, spaces, dashes and underscores
    ///
    /// # Examples
    ///
    /// ```
    /// use planforge::diagram::DiagramType;
    ///
    /// assert_eq!(DiagramType::parse_str("use case").unwrap(), DiagramType::UseCase);
    /// assert_eq!(DiagramType::parse_str("SEQUENCE").unwrap(), DiagramType::Sequence);
    /// assert!(DiagramType::parse_str("gantt").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, PlanforgeError> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "class" => Ok(Self::Class),
            "sequence" => Ok(Self::Sequence),
            "usecase" => Ok(Self::UseCase),
            "activity" => Ok(Self::Activity),
            "component" => Ok(Self::Component),
            _ => Err(PlanforgeError::UnknownDiagramType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a reply should be shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// Reply starts with the diagram marker; show as a code block
    Diagram,
    /// Anything else
    PlainText,
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    // Leading whitespace and an optional opening code fence are tolerated.
    MARKER.get_or_init(|| {
        Regex::new(r"^\s*(?:```[A-Za-z0-9_-]*\s*)?@startuml").expect("marker regex is valid")
    })
}

/// Decide how to display a model reply
///
/// # Examples
///
/// ```
/// use planforge::diagram::{display_format, DisplayFormat};
///
/// assert_eq!(display_format("@startuml\nA -> B\n@enduml"), DisplayFormat::Diagram);
/// assert_eq!(display_format("Here is your diagram"), DisplayFormat::PlainText);
/// ```
pub fn display_format(text: &str) -> DisplayFormat {
    if marker_regex().is_match(text) {
        DisplayFormat::Diagram
    } else {
        DisplayFormat::PlainText
    }
}
