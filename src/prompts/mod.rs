//! Prompt templates for plan and diagram generation
//!
//! The catalog is built once at startup from the configured model
//! identifiers and is read-only afterwards.

pub mod advanced_plan_prompt;
pub mod basic_plan_prompt;
pub mod uml_prompt;

pub use uml_prompt::uml_request;

use crate::config::ModelsConfig;
use crate::error::PlanforgeError;
use std::fmt;

/// Key of one of the fixed prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    /// Five-section project plan
    BasicPlan,
    /// In-depth project plan
    AdvancedPlan,
    /// Plan to PlantUML conversion
    Uml,
}

impl TemplateKey {
    /// All template keys, in catalog order
    pub const ALL: [TemplateKey; 3] = [Self::BasicPlan, Self::AdvancedPlan, Self::Uml];

    /// Catalog name of the template
    pub fn name(&self) -> &'static str {
        match self {
            Self::BasicPlan => "basic-plan",
            Self::AdvancedPlan => "advanced-plan",
            Self::Uml => "uml",
        }
    }

    /// Resolve a catalog name
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::UnknownTemplate` for names outside the fixed set
    pub fn parse_str(name: &str) -> Result<Self, PlanforgeError> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| PlanforgeError::UnknownTemplate(name.to_string()))
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named instruction plus the model it is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    key: TemplateKey,
    instruction: String,
    model: String,
}

impl PromptTemplate {
    /// Template key
    pub fn key(&self) -> TemplateKey {
        self.key
    }

    /// Catalog name
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// System prompt text
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Target model identifier
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Registry of the fixed prompt templates
///
/// # Examples
///
/// ```
/// use planforge::config::ModelsConfig;
/// use planforge::prompts::{PromptCatalog, TemplateKey};
///
/// let catalog = PromptCatalog::new(&ModelsConfig::default());
/// let template = catalog.get("basic-plan").unwrap();
/// assert_eq!(template.key(), TemplateKey::BasicPlan);
/// assert!(catalog.get("summary").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    templates: Vec<PromptTemplate>,
}

impl PromptCatalog {
    /// Build the catalog with the configured models
    pub fn new(models: &ModelsConfig) -> Self {
        let templates = TemplateKey::ALL
            .into_iter()
            .map(|key| {
                let (instruction, model) = match key {
                    TemplateKey::BasicPlan => (
                        basic_plan_prompt::generate_basic_plan_prompt(),
                        models.plan.clone(),
                    ),
                    TemplateKey::AdvancedPlan => (
                        advanced_plan_prompt::generate_advanced_plan_prompt(),
                        models.advanced_plan.clone(),
                    ),
                    TemplateKey::Uml => (uml_prompt::generate_uml_prompt(), models.uml.clone()),
                };
                PromptTemplate {
                    key,
                    instruction,
                    model,
                }
            })
            .collect();

        Self { templates }
    }

    /// Look up a template by catalog name
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::UnknownTemplate` if the name is not one of
    /// `basic-plan`, `advanced-plan` or `uml`
    pub fn get(&self, name: &str) -> Result<&PromptTemplate, PlanforgeError> {
        TemplateKey::parse_str(name).map(|key| self.template(key))
    }

    /// Look up a template by key
    pub fn template(&self, key: TemplateKey) -> &PromptTemplate {
        // `new` builds exactly one template per key in `TemplateKey::ALL` order.
        let index = TemplateKey::ALL
            .iter()
            .position(|k| *k == key)
            .unwrap_or_default();
        &self.templates[index]
    }

    /// All templates in catalog order
    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::new(&ModelsConfig::default())
    }
}
