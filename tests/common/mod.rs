use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables that would otherwise leak into spawned binaries
#[allow(dead_code)]
pub const PLANFORGE_ENV_VARS: [&str; 9] = [
    "PLANFORGE_PROVIDER",
    "PLANFORGE_GROQ_API_BASE",
    "PLANFORGE_OLLAMA_HOST",
    "PLANFORGE_TIMEOUT_SECONDS",
    "PLANFORGE_PLAN_MODEL",
    "PLANFORGE_ADVANCED_MODEL",
    "PLANFORGE_UML_MODEL",
    "PLANFORGE_OUTPUT_DIR",
    "PLANFORGE_RENDER_COMMAND",
];

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Ollama `/api/chat` response body carrying `content`
#[allow(dead_code)]
pub fn ollama_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "test-model",
        "message": {"role": "assistant", "content": content},
        "done": true
    })
}

/// OpenAI-compatible chat completion body carrying `content`
#[allow(dead_code)]
pub fn groq_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46}
    })
}
