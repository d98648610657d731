//! Configuration management for Planforge
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, PlanforgeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Planforge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion service configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Model identifiers per prompt template
    #[serde(default)]
    pub models: ModelsConfig,
    /// Where generated diagrams are written
    #[serde(default)]
    pub output: OutputConfig,
    /// External diagram renderer invocation
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// Provider configuration
///
/// Specifies which completion service to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use ("groq" or "ollama")
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Groq (OpenAI-compatible) configuration
    #[serde(default)]
    pub groq: GroqConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_provider_type() -> String {
    "groq".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            groq: GroqConfig::default(),
            ollama: OllamaConfig::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Groq provider configuration
///
/// Any OpenAI-compatible `/chat/completions` endpoint works here; point
/// `api_base` at a mock server in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API base URL (without the `/chat/completions` suffix)
    #[serde(default = "default_groq_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_groq_api_key_env")]
    pub api_key_env: String,
}

fn default_groq_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_base: default_groq_api_base(),
            api_key_env: default_groq_api_key_env(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
        }
    }
}

/// Model identifier used by each prompt template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model for basic plans
    #[serde(default = "default_plan_model")]
    pub plan: String,

    /// Model for advanced plans
    #[serde(default = "default_advanced_model")]
    pub advanced_plan: String,

    /// Model for UML generation
    #[serde(default = "default_uml_model")]
    pub uml: String,
}

fn default_plan_model() -> String {
    "llama-3.2-3b-preview".to_string()
}

fn default_advanced_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_uml_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            plan: default_plan_model(),
            advanced_plan: default_advanced_model(),
            uml: default_uml_model(),
        }
    }
}

/// Output location for generated diagram files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory; files land in `<root_dir>/<YYYY-MM-DD>/`
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Extension of the image produced by the renderer
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("generated_diagrams")
}

fn default_image_extension() -> String {
    "png".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            image_extension: default_image_extension(),
        }
    }
}

/// External renderer invocation
///
/// The diagram file path is appended as the final argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Executable to run
    #[serde(default = "default_render_command")]
    pub command: String,

    /// Arguments placed before the diagram file path
    #[serde(default = "default_render_args")]
    pub args: Vec<String>,
}

fn default_render_command() -> String {
    "java".to_string()
}

fn default_render_args() -> Vec<String> {
    vec!["-jar".to_string(), "plantuml.jar".to_string()]
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: default_render_command(),
            args: default_render_args(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. Environment variables override the file, and CLI flags
    /// override both.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PlanforgeError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| PlanforgeError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("PLANFORGE_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_base) = std::env::var("PLANFORGE_GROQ_API_BASE") {
            self.provider.groq.api_base = api_base;
        }

        if let Ok(host) = std::env::var("PLANFORGE_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(timeout) = std::env::var("PLANFORGE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid PLANFORGE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(model) = std::env::var("PLANFORGE_PLAN_MODEL") {
            self.models.plan = model;
        }

        if let Ok(model) = std::env::var("PLANFORGE_ADVANCED_MODEL") {
            self.models.advanced_plan = model;
        }

        if let Ok(model) = std::env::var("PLANFORGE_UML_MODEL") {
            self.models.uml = model;
        }

        if let Ok(dir) = std::env::var("PLANFORGE_OUTPUT_DIR") {
            self.output.root_dir = PathBuf::from(dir);
        }

        if let Ok(command) = std::env::var("PLANFORGE_RENDER_COMMAND") {
            self.renderer.command = command;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(provider) = &cli.provider {
            tracing::debug!("Provider override from CLI: {}", provider);
            self.provider.provider_type = provider.clone();
        }

        if let Some(dir) = &cli.output_dir {
            tracing::debug!("Output directory override from CLI: {}", dir.display());
            self.output.root_dir = dir.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["groq", "ollama"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(PlanforgeError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(PlanforgeError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        for (field, model) in [
            ("models.plan", &self.models.plan),
            ("models.advanced_plan", &self.models.advanced_plan),
            ("models.uml", &self.models.uml),
        ] {
            if model.trim().is_empty() {
                return Err(PlanforgeError::Config(format!("{} cannot be empty", field)).into());
            }
        }

        if self.renderer.command.trim().is_empty() {
            return Err(
                PlanforgeError::Config("renderer.command cannot be empty".to_string()).into(),
            );
        }

        let extension = self.output.image_extension.trim_start_matches('.');
        if extension.is_empty() || extension == "txt" {
            return Err(PlanforgeError::Config(format!(
                "output.image_extension must be a non-empty image extension, got '{}'",
                self.output.image_extension
            ))
            .into());
        }

        Ok(())
    }
}
