//! Integration tests for the command-backed model client and tool invoker.
//!
//! The backends are small `sh` scripts, so these tests only run on unix.

#![cfg(unix)]

mod common;

use ck_core::agents::{AgentError, ClientFactory, ModelError, ToolInvoker};
use ck_core::config::credentials::ApiKey;
use ck_core::engine::{CrewEngine, StepError};
use ck_protocol::agent_models::ToolRef;
use ck_protocol::config_models::{CommandSettings, GlobalConfig};
use std::time::Duration;
use common::*;

/// A model that makes one search when the agent holds tools, then answers.
const MODEL_SCRIPT: &str = r#"input=$(cat)
case "$input" in
  *returned:*) echo '{"text":"answer after search"}' ;;
  *"following tools"*) echo '{"tool":"search","query":"rust"}' ;;
  *) echo '{"text":"answer without tools"}' ;;
esac"#;

fn sh(script: &str) -> CommandSettings {
    CommandSettings::new("sh").with_args(vec!["-c".to_string(), script.to_string()])
}

fn config_with(model_script: &str) -> GlobalConfig {
    let mut config = GlobalConfig::default();
    config.llm.command = Some(sh(model_script));
    config
        .tools
        .insert("search".to_string(), sh(r#"echo "results for $0""#));
    config
}

#[tokio::test]
async fn test_command_backends_drive_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with(MODEL_SCRIPT);

    let model = ClientFactory::model_client(&config, ApiKey::new("test-key")).unwrap();
    let tools = ClientFactory::tool_invoker(&config);
    let engine = CrewEngine::new(ClientFactory::executor(&config, model, tools))
        .with_output_root(dir.path());

    let (result, events) = run_collecting_events(&engine, &create_research_crew()).await;
    let result = result.expect("run should succeed");

    let texts: Vec<_> = result.per_task_results.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["answer after search", "answer after search", "answer without tools"]
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("results/report.md")).unwrap(),
        "answer without tools"
    );
    assert!(events.iter().any(|e| matches!(
        e,
        ck_protocol::events::Event::ToolCalled { tool, query, .. } if tool == "search" && query == "rust"
    )));
}

#[tokio::test]
async fn test_api_key_reaches_the_model_command() {
    let config = config_with(
        r#"cat >/dev/null; printf '{"text":"%s"}\n' "$GEMINI_API_KEY""#,
    );
    let model = ClientFactory::model_client(&config, ApiKey::new("secret-123")).unwrap();
    let engine = CrewEngine::new(ClientFactory::executor(
        &config,
        model,
        ClientFactory::tool_invoker(&config),
    ));

    let (result, _) = run_collecting_events(&engine, &create_chain_crew("key", 1)).await;
    assert_eq!(result.unwrap().per_task_results[0].text, "secret-123");
}

#[tokio::test]
async fn test_quota_error_from_command() {
    let config = config_with(
        r#"cat >/dev/null; echo '{"error":{"code":429,"message":"Resource has been exhausted"}}'"#,
    );
    let model = ClientFactory::model_client(&config, ApiKey::new("k")).unwrap();
    let engine = CrewEngine::new(ClientFactory::executor(
        &config,
        model,
        ClientFactory::tool_invoker(&config),
    ));

    let (result, _) = run_collecting_events(&engine, &create_chain_crew("quota", 2)).await;
    let err = result.expect_err("quota error should fail the run");

    assert_eq!(err.task_id, "task-1");
    assert!(matches!(
        err.cause,
        StepError::Agent(AgentError::Model(ModelError::Quota(_)))
    ));
}

#[tokio::test]
async fn test_silent_command_is_malformed() {
    let config = config_with("cat >/dev/null");
    let model = ClientFactory::model_client(&config, ApiKey::new("k")).unwrap();
    let engine = CrewEngine::new(ClientFactory::executor(
        &config,
        model,
        ClientFactory::tool_invoker(&config),
    ));

    let (result, _) = run_collecting_events(&engine, &create_chain_crew("silent", 1)).await;
    assert!(matches!(
        result.unwrap_err().cause,
        StepError::Agent(AgentError::Model(ModelError::Malformed(_)))
    ));
}

#[tokio::test]
async fn test_model_command_crash_fails_the_task() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with(r#"cat >/dev/null; echo '{"text":"partial"}'; exit 3"#);
    let model = ClientFactory::model_client(&config, ApiKey::new("k")).unwrap();
    let engine = CrewEngine::new(ClientFactory::executor(
        &config,
        model,
        ClientFactory::tool_invoker(&config),
    ))
    .with_output_root(dir.path());

    let (result, _) = run_collecting_events(&engine, &create_research_crew()).await;
    let err = result.expect_err("a crashed model command must not count as an answer");

    assert_eq!(err.task_id, "research_task");
    assert!(err.completed.is_empty());
    match err.cause {
        StepError::Agent(AgentError::Model(ModelError::Api(message))) => {
            assert!(message.contains("status Some(3)"), "unexpected message: {message}");
        }
        other => panic!("expected a model API error, got {other:?}"),
    }
    assert!(!dir.path().join("results/report.md").exists());
}

#[tokio::test]
async fn test_tool_command_with_noisy_stderr_completes() {
    let mut config = GlobalConfig::default();
    config.tools.insert(
        "search".to_string(),
        sh(r#"head -c 300000 /dev/zero >&2; echo "results for $0""#),
    );
    let tools = ClientFactory::tool_invoker(&config);

    let output = tokio::time::timeout(
        Duration::from_secs(10),
        tools.tool_call(&ToolRef::search(), "rust"),
    )
    .await
    .expect("tool call should finish well before the timeout")
    .expect("tool call should succeed");

    assert_eq!(output, "results for rust");
}
