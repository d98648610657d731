//! Diagram persistence and external rendering
//!
//! Generated diagram text is written to
//! `<root>/<YYYY-MM-DD>/<HHMMSS>_<DiagramType>_diagram.txt`. Rendering runs an
//! external tool (PlantUML by default) against that file and expects an image
//! next to it with the same base name.

use crate::config::{OutputConfig, RendererConfig};
use crate::diagram::DiagramType;
use crate::error::{PlanforgeError, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Writes diagram files and invokes the external renderer
#[derive(Debug, Clone)]
pub struct ArtifactRenderer {
    output_root: PathBuf,
    image_extension: String,
    command: String,
    args: Vec<String>,
}

impl ArtifactRenderer {
    /// Create a renderer from configuration
    pub fn new(output: &OutputConfig, renderer: &RendererConfig) -> Self {
        Self {
            output_root: output.root_dir.clone(),
            image_extension: output.image_extension.trim_start_matches('.').to_string(),
            command: renderer.command.clone(),
            args: renderer.args.clone(),
        }
    }

    /// Root directory for generated files
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Path a diagram of `diagram` generated at `timestamp` is stored at
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use planforge::config::{OutputConfig, RendererConfig};
    /// use planforge::diagram::DiagramType;
    /// use planforge::renderer::ArtifactRenderer;
    /// use std::path::PathBuf;
    ///
    /// let renderer = ArtifactRenderer::new(&OutputConfig::default(), &RendererConfig::default());
    /// let at = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 5, 3).unwrap();
    /// assert_eq!(
    ///     renderer.artifact_path(DiagramType::Class, at),
    ///     PathBuf::from("generated_diagrams/2026-10-19/090503_Class_diagram.txt")
    /// );
    /// ```
    pub fn artifact_path(&self, diagram: DiagramType, timestamp: NaiveDateTime) -> PathBuf {
        self.output_root
            .join(timestamp.format("%Y-%m-%d").to_string())
            .join(format!(
                "{}_{}_diagram.txt",
                timestamp.format("%H%M%S"),
                diagram.label()
            ))
    }

    /// Image the renderer is expected to produce for `file`
    pub fn image_path(&self, file: &Path) -> PathBuf {
        file.with_extension(&self.image_extension)
    }

    /// Write diagram text to its timestamped path, creating directories
    ///
    /// Calling this twice with the same arguments overwrites the same file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory or file cannot be written
    pub async fn persist(
        &self,
        diagram_text: &str,
        diagram: DiagramType,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf> {
        let path = self.artifact_path(diagram, timestamp);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(PlanforgeError::Io)?;
        }

        tokio::fs::write(&path, diagram_text)
            .await
            .map_err(PlanforgeError::Io)?;

        tracing::info!("Saved {} diagram to {}", diagram, path.display());
        Ok(path)
    }

    /// Run the external renderer on a persisted diagram file
    ///
    /// The diagram file is kept whatever the outcome. An existing image with
    /// the expected name is removed first, so success always means the
    /// renderer wrote a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::RenderingFailed` if the file is missing, the
    /// renderer cannot be started or exits non-zero, or no image appears
    pub async fn render(&self, file: &Path) -> Result<PathBuf> {
        if !file.is_file() {
            return Err(PlanforgeError::RenderingFailed(format!(
                "diagram file not found: {}",
                file.display()
            ))
            .into());
        }

        // An image left from an earlier run must not count as output
        let image = self.image_path(file);
        if image.is_file() {
            tracing::debug!("Removing stale image {}", image.display());
            tokio::fs::remove_file(&image)
                .await
                .map_err(PlanforgeError::Io)?;
        }

        tracing::debug!(
            "Rendering {} with {} {:?}",
            file.display(),
            self.command,
            self.args
        );

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(file)
            .output()
            .await
            .map_err(|e| {
                PlanforgeError::RenderingFailed(format!(
                    "failed to start `{}`: {}",
                    self.command, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!("Renderer exited with {}: {}", output.status, stderr.trim());
            return Err(PlanforgeError::RenderingFailed(format!(
                "`{}` exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            ))
            .into());
        }

        if !image.is_file() {
            return Err(PlanforgeError::RenderingFailed(format!(
                "renderer finished but {} was not produced",
                image.display()
            ))
            .into());
        }

        tracing::info!("Rendered diagram image {}", image.display());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn renderer_in(dir: &TempDir, command: &str, args: &[&str]) -> ArtifactRenderer {
        let output = OutputConfig {
            root_dir: dir.path().to_path_buf(),
            image_extension: "png".to_string(),
        };
        let renderer = RendererConfig {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        };
        ArtifactRenderer::new(&output, &renderer)
    }

    #[test]
    fn test_artifact_path_layout() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "java", &[]);
        let path = renderer.artifact_path(DiagramType::UseCase, timestamp());
        assert_eq!(
            path,
            dir.path()
                .join("2026-10-19")
                .join("140509_UseCase_diagram.txt")
        );
    }

    #[test]
    fn test_image_path_replaces_txt() {
        let dir = TempDir::new().unwrap();
        let mut renderer = renderer_in(&dir, "java", &[]);
        renderer.image_extension = "svg".to_string();
        assert_eq!(
            renderer.image_path(Path::new("out/140509_Class_diagram.txt")),
            PathBuf::from("out/140509_Class_diagram.svg")
        );
    }

    #[tokio::test]
    async fn test_persist_creates_dirs_and_writes_raw_text() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "java", &[]);
        let text = "@startuml\nAlice -> Bob: hi\n@enduml\n";

        let path = renderer
            .persist(text, DiagramType::Sequence, timestamp())
            .await
            .unwrap();

        assert!(path.ends_with("2026-10-19/140509_Sequence_diagram.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[tokio::test]
    async fn test_persist_twice_overwrites_same_file() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "java", &[]);

        let first = renderer
            .persist("one", DiagramType::Class, timestamp())
            .await
            .unwrap();
        let second = renderer
            .persist("two", DiagramType::Class, timestamp())
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "two");
        let entries = std::fs::read_dir(dir.path().join("2026-10-19"))
            .unwrap()
            .count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_render_missing_file() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "java", &[]);
        let err = renderer
            .render(&dir.path().join("nope_diagram.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("diagram file not found"));
    }

    #[tokio::test]
    async fn test_render_unknown_command() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "planforge-no-such-renderer", &[]);
        let file = renderer
            .persist("@startuml\n@enduml", DiagramType::Class, timestamp())
            .await
            .unwrap();

        let err = renderer.render(&file).await.unwrap_err();
        assert!(err.to_string().contains("failed to start"));
        assert!(file.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_success_returns_sibling_image() {
        let dir = TempDir::new().unwrap();
        // sh -c binds the appended file path to $0
        let renderer = renderer_in(&dir, "sh", &["-c", "touch \"${0%.txt}.png\""]);
        let file = renderer
            .persist("@startuml\n@enduml", DiagramType::Activity, timestamp())
            .await
            .unwrap();

        let image = renderer.render(&file).await.unwrap();
        assert_eq!(image, file.with_extension("png"));
        assert!(image.is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_nonzero_exit_keeps_text_file() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "sh", &["-c", "echo 'syntax error' >&2; exit 3"]);
        let file = renderer
            .persist("not uml", DiagramType::Component, timestamp())
            .await
            .unwrap();

        let err = renderer.render(&file).await.unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Rendering failed"));
        assert!(text.contains("syntax error"));
        assert!(file.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_without_image_fails() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "true", &[]);
        let file = renderer
            .persist("@startuml\n@enduml", DiagramType::Class, timestamp())
            .await
            .unwrap();

        let err = renderer.render(&file).await.unwrap_err();
        assert!(err.to_string().contains("was not produced"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_ignores_image_from_earlier_run() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_in(&dir, "true", &[]);
        let file = renderer
            .persist("@startuml\n@enduml", DiagramType::Sequence, timestamp())
            .await
            .unwrap();
        let stale = file.with_extension("png");
        std::fs::write(&stale, b"old image").unwrap();

        let err = renderer.render(&file).await.unwrap_err();

        assert!(err.to_string().contains("was not produced"));
        assert!(!stale.exists());
        assert!(file.exists());
    }
}
