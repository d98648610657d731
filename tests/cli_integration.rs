//! End-to-end tests for the `planforge` binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn planforge() -> Command {
    let mut cmd = Command::cargo_bin("planforge").unwrap();
    for var in common::PLANFORGE_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    planforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn test_templates_lists_catalog() {
    let (_temp_dir, config_path) =
        common::temp_config_file("provider:\n  type: ollama\nmodels:\n  uml: diagram-model\n");

    planforge()
        .arg("--config")
        .arg(config_path)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic-plan"))
        .stdout(predicate::str::contains("advanced-plan"))
        .stdout(predicate::str::contains("diagram-model"));
}

#[test]
fn test_invalid_provider_is_rejected_at_startup() {
    let (_temp_dir, config_path) = common::temp_config_file("provider:\n  type: copilot\n");

    planforge()
        .arg("--config")
        .arg(config_path)
        .arg("templates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider type: copilot"));
}

#[test]
fn test_render_missing_file_fails() {
    let (temp_dir, config_path) = common::temp_config_file("provider:\n  type: ollama\n");

    planforge()
        .arg("--config")
        .arg(config_path)
        .arg("render")
        .arg(temp_dir.path().join("missing_diagram.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rendering failed"));
}

#[test]
fn test_render_flag_requires_uml() {
    planforge()
        .args(["plan", "Build a todo app", "--render"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plan_with_uml_saves_diagram() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ollama_reply(
            "@startuml\nactor User\nUser -> TodoApp: add item\n@enduml",
        )))
        .expect(2)
        .mount(&server)
        .await;

    let (temp_dir, config_path) = common::temp_config_file(&format!(
        "provider:\n  type: ollama\n  ollama:\n    host: {}\n",
        server.uri()
    ));
    let output_dir = temp_dir.path().join("diagrams");

    planforge()
        .arg("--config")
        .arg(&config_path)
        .arg("--output-dir")
        .arg(&output_dir)
        .args(["plan", "Build a todo app", "--uml", "sequence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagram saved to"))
        .stdout(predicate::str::contains("_Sequence_diagram.txt"));

    let day_dirs: Vec<_> = std::fs::read_dir(&output_dir).unwrap().collect();
    assert_eq!(day_dirs.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plan_service_failure_prints_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let (_temp_dir, config_path) = common::temp_config_file(&format!(
        "provider:\n  type: ollama\n  ollama:\n    host: {}\n",
        server.uri()
    ));

    planforge()
        .arg("--config")
        .arg(&config_path)
        .args(["plan", "Build a todo app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorry, I couldn't process that request."))
        .stderr(predicate::str::contains(
            "Error while contacting the completion service",
        ));
}
