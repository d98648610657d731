//! Workflow controller
//!
//! Drives the three user actions (plan, UML, clear) against a [`Session`].
//! Every action runs to completion before returning and reports what the
//! caller should show through an [`ActionOutcome`].

use crate::chat_mode::PlanMode;
use crate::config::Config;
use crate::diagram::{display_format, DiagramType, DisplayFormat};
use crate::error::{PlanforgeError, Result};
use crate::prompts::{uml_request, PromptCatalog, TemplateKey};
use crate::providers::{create_provider, CompletionClient, FALLBACK_REPLY};
use crate::renderer::ArtifactRenderer;
use crate::session::{ChatMessage, Session};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};

/// Something the user should be told about, apart from the reply itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing was done; the request was incomplete
    Warning(String),
    /// Part of the action failed
    Error(String),
}

impl Notice {
    /// Text of the notice
    pub fn message(&self) -> &str {
        match self {
            Self::Warning(m) | Self::Error(m) => m,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Assistant text appended to the history, if any
    pub reply: Option<String>,
    /// How `reply` should be displayed
    pub format: DisplayFormat,
    /// Diagram file written during the action
    pub saved_to: Option<PathBuf>,
    /// Warnings and errors raised along the way
    pub notices: Vec<Notice>,
}

impl ActionOutcome {
    fn warning(message: String) -> Self {
        Self {
            reply: None,
            format: DisplayFormat::PlainText,
            saved_to: None,
            notices: vec![Notice::Warning(message)],
        }
    }

    fn reply(text: String) -> Self {
        Self {
            format: display_format(&text),
            reply: Some(text),
            saved_to: None,
            notices: Vec::new(),
        }
    }

    /// True when the action did not touch the session
    pub fn is_noop(&self) -> bool {
        self.reply.is_none()
    }

    /// True when any error notice was raised
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Error(_)))
    }
}

/// Coordinates prompts, the completion client and the renderer
pub struct WorkflowController {
    client: CompletionClient,
    catalog: PromptCatalog,
    renderer: ArtifactRenderer,
}

impl WorkflowController {
    /// Create a controller from its parts
    pub fn new(client: CompletionClient, catalog: PromptCatalog, renderer: ArtifactRenderer) -> Self {
        Self {
            client,
            catalog,
            renderer,
        }
    }

    /// Build a controller for the configured provider
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        Ok(Self::new(
            CompletionClient::new(provider),
            PromptCatalog::new(&config.models),
            ArtifactRenderer::new(&config.output, &config.renderer),
        ))
    }

    /// Prompt catalog in use
    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    /// Renderer in use
    pub fn renderer(&self) -> &ArtifactRenderer {
        &self.renderer
    }

    /// Name of the completion provider
    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    /// Handle a plan request in `mode`
    ///
    /// Blank text produces a warning and leaves the session untouched.
    /// Otherwise the text, exactly as typed, is sent and appended, followed by
    /// the reply.
    /// A failed completion appends the fallback reply and keeps the previous
    /// latest artifact.
    pub async fn plan(&self, session: &mut Session, mode: PlanMode, text: &str) -> ActionOutcome {
        if text.trim().is_empty() {
            tracing::warn!("Ignoring empty plan request");
            return ActionOutcome::warning(
                PlanforgeError::EmptyInput("please describe the project to plan".to_string())
                    .to_string(),
            );
        }

        let template = self.catalog.template(mode.template_key());
        tracing::info!("Plan request: mode={}, template={}", mode, template.name());

        session.append(ChatMessage::user(text));

        match self
            .client
            .complete(template.instruction(), text, template.model())
            .await
        {
            Ok(reply) => {
                session.append(ChatMessage::assistant(reply.clone()));
                session.set_latest_artifact(reply.clone());
                ActionOutcome::reply(reply)
            }
            Err(e) => fallback(session, e.to_string()),
        }
    }

    /// Handle a UML request for `diagram`, stamping any saved file with the
    /// current local time
    pub async fn uml(&self, session: &mut Session, diagram: DiagramType) -> ActionOutcome {
        self.uml_at(session, diagram, Local::now().naive_local())
            .await
    }

    /// Handle a UML request for `diagram` at `timestamp`
    ///
    /// Requires a latest artifact; without one a warning is returned and no
    /// call is made. The reply is persisted only when the call succeeds, and a
    /// persistence failure is reported without failing the action.
    pub async fn uml_at(
        &self,
        session: &mut Session,
        diagram: DiagramType,
        timestamp: NaiveDateTime,
    ) -> ActionOutcome {
        let Some(artifact) = session.latest_artifact().map(str::to_owned) else {
            tracing::warn!("UML request without a plan");
            return ActionOutcome::warning(
                PlanforgeError::EmptyInput(
                    "no plan yet, generate a plan before requesting a diagram".to_string(),
                )
                .to_string(),
            );
        };

        let template = self.catalog.template(TemplateKey::Uml);
        let request = uml_request(diagram, &artifact);
        tracing::info!("UML request: diagram={}", diagram);

        session.append(ChatMessage::user(request.clone()));

        let reply = match self
            .client
            .complete(template.instruction(), &request, template.model())
            .await
        {
            Ok(reply) => reply,
            Err(e) => return fallback(session, e.to_string()),
        };

        session.append(ChatMessage::assistant(reply.clone()));

        let mut outcome = ActionOutcome::reply(reply);
        if outcome.format == DisplayFormat::PlainText {
            tracing::warn!("UML reply has no {} marker", crate::diagram::DIAGRAM_START_MARKER);
        }

        let text = outcome.reply.as_deref().unwrap_or_default();
        match self.renderer.persist(text, diagram, timestamp).await {
            Ok(path) => outcome.saved_to = Some(path),
            Err(e) => {
                tracing::error!("Failed to save diagram: {:#}", e);
                outcome
                    .notices
                    .push(Notice::Error(format!("Failed to save diagram: {}", e)));
            }
        }

        outcome
    }

    /// Reset the session
    pub fn clear(&self, session: &mut Session) {
        session.clear();
        tracing::info!("Session cleared");
    }

    /// Render a saved diagram file to an image
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::RenderingFailed` from the renderer
    pub async fn render(&self, file: &Path) -> Result<PathBuf> {
        self.renderer.render(file).await
    }
}

fn fallback(session: &mut Session, cause: String) -> ActionOutcome {
    session.append(ChatMessage::assistant(FALLBACK_REPLY));
    ActionOutcome {
        reply: Some(FALLBACK_REPLY.to_string()),
        format: DisplayFormat::PlainText,
        saved_to: None,
        notices: vec![Notice::Error(format!(
            "Error while contacting the completion service: {}",
            cause
        ))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelsConfig, OutputConfig, RendererConfig};
    use crate::providers::{CompletionResponse, Message, MockProvider};
    use crate::session::Role;
    use chrono::NaiveDate;
    use regex::Regex;
    use tempfile::TempDir;

    const UML_REPLY: &str = "@startuml\nactor User\nUser -> App: add todo\n@enduml";

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn controller(provider: MockProvider, root: &Path) -> WorkflowController {
        let output = OutputConfig {
            root_dir: root.to_path_buf(),
            ..OutputConfig::default()
        };
        WorkflowController::new(
            CompletionClient::new(Box::new(provider)),
            PromptCatalog::new(&ModelsConfig::default()),
            ArtifactRenderer::new(&output, &RendererConfig::default()),
        )
    }

    fn replying(reply: &'static str) -> MockProvider {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(move |_, _| Ok(CompletionResponse::new(Message::assistant(reply))));
        provider.expect_name().return_const("mock");
        provider
    }

    fn failing() -> MockProvider {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("401 Unauthorized")));
        provider.expect_name().return_const("mock");
        provider
    }

    fn never_called() -> MockProvider {
        let mut provider = MockProvider::new();
        provider.expect_complete().times(0);
        provider.expect_name().return_const("mock");
        provider
    }

    #[tokio::test]
    async fn test_basic_plan_sends_basic_template_and_text() {
        let dir = TempDir::new().unwrap();
        let catalog = PromptCatalog::new(&ModelsConfig::default());
        let expected = catalog.template(TemplateKey::BasicPlan).instruction().to_string();
        let expected_model = catalog.template(TemplateKey::BasicPlan).model().to_string();

        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(move |messages, model| {
                messages.len() == 2
                    && messages[0] == Message::system(expected.as_str())
                    && messages[1] == Message::user("Build a todo app")
                    && *model == expected_model
            })
            .times(1)
            .returning(|_, _| Ok(CompletionResponse::new(Message::assistant("1. REQUIREMENTS"))));
        provider.expect_name().return_const("mock");

        let controller = controller(provider, dir.path());
        let mut session = Session::new();
        let outcome = controller
            .plan(&mut session, PlanMode::Basic, "Build a todo app")
            .await;

        assert_eq!(outcome.reply.as_deref(), Some("1. REQUIREMENTS"));
        assert!(outcome.notices.is_empty());
        let roles: Vec<Role> = session.messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(session.messages()[0].content(), "Build a todo app");
        assert_eq!(session.latest_artifact(), Some("1. REQUIREMENTS"));
    }

    #[tokio::test]
    async fn test_plan_keeps_text_as_typed() {
        let dir = TempDir::new().unwrap();
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|messages, _| messages[1] == Message::user("  Build a todo app\n"))
            .times(1)
            .returning(|_, _| Ok(CompletionResponse::new(Message::assistant("plan"))));
        provider.expect_name().return_const("mock");

        let controller = controller(provider, dir.path());
        let mut session = Session::new();
        controller
            .plan(&mut session, PlanMode::Basic, "  Build a todo app\n")
            .await;

        assert_eq!(session.messages()[0].content(), "  Build a todo app\n");
    }

    #[tokio::test]
    async fn test_advanced_plan_uses_advanced_model() {
        let dir = TempDir::new().unwrap();
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|_, model| model == "llama-3.3-70b-versatile")
            .times(1)
            .returning(|_, _| Ok(CompletionResponse::new(Message::assistant("deep plan"))));
        provider.expect_name().return_const("mock");

        let controller = controller(provider, dir.path());
        let mut session = Session::new();
        controller
            .plan(&mut session, PlanMode::Advanced, "Payments platform")
            .await;
        assert_eq!(session.latest_artifact(), Some("deep plan"));
    }

    #[tokio::test]
    async fn test_plan_overwrites_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let controller = controller(replying("second"), dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("first");

        controller.plan(&mut session, PlanMode::Basic, "again").await;
        assert_eq!(session.latest_artifact(), Some("second"));
    }

    #[tokio::test]
    async fn test_empty_plan_makes_no_call() {
        let dir = TempDir::new().unwrap();
        let controller = controller(never_called(), dir.path());
        let mut session = Session::new();

        let outcome = controller.plan(&mut session, PlanMode::Basic, "   \n").await;

        assert!(outcome.is_noop());
        assert!(matches!(outcome.notices.as_slice(), [Notice::Warning(_)]));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_failed_plan_appends_fallback_and_keeps_artifact() {
        let dir = TempDir::new().unwrap();
        let controller = controller(failing(), dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("earlier plan");

        let outcome = controller.plan(&mut session, PlanMode::Basic, "Build a todo app").await;

        assert_eq!(outcome.reply.as_deref(), Some(FALLBACK_REPLY));
        assert!(outcome.has_errors());
        assert!(outcome.notices[0]
            .message()
            .starts_with("Error while contacting the completion service: "));
        assert!(outcome.notices[0].message().contains("401 Unauthorized"));
        assert_eq!(session.len(), 2);
        assert_eq!(session.last().unwrap().content(), FALLBACK_REPLY);
        assert_eq!(session.latest_artifact(), Some("earlier plan"));
    }

    #[tokio::test]
    async fn test_uml_without_artifact_makes_no_call() {
        let dir = TempDir::new().unwrap();
        let controller = controller(never_called(), dir.path());
        let mut session = Session::new();

        let outcome = controller
            .uml_at(&mut session, DiagramType::Class, timestamp())
            .await;

        assert!(outcome.is_noop());
        assert!(matches!(outcome.notices.as_slice(), [Notice::Warning(_)]));
        assert!(session.is_empty());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_uml_request_embeds_type_and_artifact() {
        let dir = TempDir::new().unwrap();
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|messages, model| {
                messages[1].content.contains("Sequence")
                    && messages[1].content.contains("some plan text")
                    && model == "llama-3.3-70b-versatile"
            })
            .times(1)
            .returning(|_, _| Ok(CompletionResponse::new(Message::assistant(UML_REPLY))));
        provider.expect_name().return_const("mock");

        let controller = controller(provider, dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("some plan text");

        let outcome = controller
            .uml_at(&mut session, DiagramType::Sequence, timestamp())
            .await;

        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[0].role(), Role::User);
        assert!(session.messages()[0].content().contains("some plan text"));
        assert_eq!(session.messages()[1].content(), UML_REPLY);
        assert_eq!(outcome.format, DisplayFormat::Diagram);

        let saved = outcome.saved_to.unwrap();
        assert_eq!(
            saved,
            dir.path().join("2026-10-19").join("083000_Sequence_diagram.txt")
        );
        assert_eq!(std::fs::read_to_string(saved).unwrap(), UML_REPLY);
    }

    #[tokio::test]
    async fn test_uml_saves_exactly_one_file_with_dated_name() {
        let dir = TempDir::new().unwrap();
        let controller = controller(replying(UML_REPLY), dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("plan");

        let outcome = controller.uml(&mut session, DiagramType::UseCase).await;

        let saved = outcome.saved_to.unwrap();
        let relative = saved.strip_prefix(dir.path()).unwrap();
        let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}/\d{6}_UseCase_diagram\.txt$").unwrap();
        assert!(pattern.is_match(&relative.to_string_lossy()));

        let days: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(days.len(), 1);
        let files = std::fs::read_dir(saved.parent().unwrap()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[tokio::test]
    async fn test_uml_plain_text_reply_is_kept_and_saved() {
        let dir = TempDir::new().unwrap();
        let controller = controller(replying("I cannot draw that."), dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("plan");

        let outcome = controller
            .uml_at(&mut session, DiagramType::Activity, timestamp())
            .await;

        assert_eq!(outcome.format, DisplayFormat::PlainText);
        assert_eq!(session.last().unwrap().content(), "I cannot draw that.");
        assert!(outcome.saved_to.is_some());
        assert_eq!(session.latest_artifact(), Some("plan"));
    }

    #[tokio::test]
    async fn test_uml_failure_appends_fallback_without_saving() {
        let dir = TempDir::new().unwrap();
        let controller = controller(failing(), dir.path());
        let mut session = Session::new();
        session.set_latest_artifact("plan");

        let outcome = controller
            .uml_at(&mut session, DiagramType::Class, timestamp())
            .await;

        assert!(outcome.has_errors());
        assert!(outcome.saved_to.is_none());
        assert_eq!(session.len(), 2);
        assert_eq!(session.last().unwrap().content(), FALLBACK_REPLY);
        assert!(!dir.path().join("2026-10-19").exists());
    }

    #[tokio::test]
    async fn test_uml_persist_failure_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output root directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "not a directory").unwrap();

        let controller = controller(replying(UML_REPLY), &blocker);
        let mut session = Session::new();
        session.set_latest_artifact("plan");

        let outcome = controller
            .uml_at(&mut session, DiagramType::Component, timestamp())
            .await;

        assert_eq!(outcome.reply.as_deref(), Some(UML_REPLY));
        assert!(outcome.saved_to.is_none());
        assert!(outcome.has_errors());
        assert!(outcome.notices[0].message().starts_with("Failed to save diagram"));
        assert_eq!(session.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_empties_history_and_artifact() {
        let dir = TempDir::new().unwrap();
        let controller = controller(replying("plan"), dir.path());
        let mut session = Session::new();
        controller.plan(&mut session, PlanMode::Basic, "todo app").await;
        assert!(!session.is_empty());

        controller.clear(&mut session);

        assert!(session.is_empty());
        assert!(session.latest_artifact().is_none());
    }
}
