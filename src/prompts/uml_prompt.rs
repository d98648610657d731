//! UML generation prompts
//!
//! The system prompt asks for raw PlantUML. The user-side request embeds the
//! diagram type label and the latest plan verbatim.

use crate::diagram::{DiagramType, DIAGRAM_START_MARKER};

/// Generates the system prompt for UML generation
pub fn generate_uml_prompt() -> String {
    format!(
        r#"You are a software architect who converts project plans into UML diagrams written in PlantUML.

RULES:
- Output ONLY PlantUML source. Start with {start} and end with @enduml.
- Do not wrap the diagram in code fences and do not add any explanation before or after it.
- Use only elements that appear in the plan; name them exactly as the plan does.
- Keep the diagram readable: group related elements, at most about 25 elements.
- The diagram must be valid PlantUML syntax for the requested diagram type.
"#,
        start = DIAGRAM_START_MARKER,
    )
}

/// Builds the synthetic user request for a diagram
///
/// The plan text is embedded unchanged.
///
/// # Examples
///
/// ```
/// use planforge::diagram::DiagramType;
/// use planforge::prompts::uml_request;
///
/// let request = uml_request(DiagramType::Sequence, "some plan text");
/// assert!(request.contains("Sequence"));
/// assert!(request.contains("some plan text"));
/// ```
pub fn uml_request(diagram: DiagramType, artifact: &str) -> String {
    format!(
        "Generate a {label} diagram in PlantUML for the following project plan.\n\n\
         PROJECT PLAN:\n{artifact}\n\n\
         Return only the {label} diagram source.",
        label = diagram.label(),
        artifact = artifact,
    )
}
