//! Test fixtures for sample projects and crews.

#![allow(dead_code)]

use ck_core::agents::{AgentExecutor, ScriptedModelClient, StaticToolInvoker};
use ck_core::crew::Crew;
use ck_core::engine::CrewEngine;
use ck_protocol::agent_models::ToolRef;
use ck_protocol::events::Event;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

const RESEARCHER_MD: &str = r#"---
id: researcher
role: Skeptical Researcher
goal: Verify the credibility of every source
tools:
  - search
  - scrape
---

You trust nothing you cannot trace.
"#;

const FACT_CHECKER_MD: &str = r#"---
id: fact_checker
role: Impartial Fact Checker
goal: Confirm every claim
tools:
  - search
---

You give every finding a verdict.
"#;

const ANALYST_MD: &str = r#"---
id: reporting_analyst
role: Strategic Analyst
goal: Produce decision-ready reports
---

You write for executives.
"#;

const RESEARCH_REPORT_YAML: &str = r#"name: research-report
tasks:
  - id: research_task
    agent: researcher
    description: Research the topic
    expected-output: Findings with sources
  - id: fact_check_task
    agent: fact_checker
    description: Check the findings
    expected-output: Verdicts
  - id: reporting_task
    agent: reporting_analyst
    description: Write the report
    expected-output: A markdown report
    output-file: results/report.md
"#;

const GHOST_YAML: &str = r#"name: ghost-crew
tasks:
  - id: research_task
    agent: researcher
    description: Research the topic
    expected-output: Findings
  - id: haunt_task
    agent: ghost
    description: Haunt the report
    expected-output: Nothing
"#;

/// Create a temporary project with a `.crew-kit/` directory holding the
/// researcher / fact_checker / reporting_analyst agents and the
/// `research-report` and `ghost-crew` crews.
///
/// Returns a TempDir that must be kept alive for the test duration.
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let ck_dir = temp_dir.path().join(".crew-kit");

    std::fs::create_dir_all(ck_dir.join("agents"))?;
    std::fs::create_dir_all(ck_dir.join("crews"))?;

    std::fs::write(ck_dir.join("config.toml"), "[engine]\nmax-tool-calls = 2\n")?;
    std::fs::write(ck_dir.join("agents/researcher.md"), RESEARCHER_MD)?;
    std::fs::write(ck_dir.join("agents/fact_checker.md"), FACT_CHECKER_MD)?;
    std::fs::write(ck_dir.join("agents/reporting_analyst.md"), ANALYST_MD)?;
    std::fs::write(ck_dir.join("crews/research-report.yaml"), RESEARCH_REPORT_YAML)?;
    std::fs::write(ck_dir.join("crews/ghost.yaml"), GHOST_YAML)?;

    Ok(temp_dir)
}

/// A crew of `n` tasks, each with its own tool-less agent `agent-<i>`.
pub fn create_chain_crew(name: &str, n: usize) -> Crew {
    let mut builder = Crew::builder(name);
    for i in 1..=n {
        builder
            .define_agent(
                format!("agent-{i}"),
                format!("Role {i}"),
                format!("Goal {i}"),
                format!("Backstory {i}"),
                vec![],
            )
            .expect("agent ids are unique");
        builder
            .define_task(
                format!("task-{i}"),
                format!("agent-{i}"),
                format!("Description {i}"),
                format!("Expected {i}"),
                None,
            )
            .expect("task ids are unique");
    }
    builder.build().expect("chain crew is valid")
}

/// The researcher / fact checker / analyst crew, built in code, with the last
/// task writing `results/report.md`.
pub fn create_research_crew() -> Crew {
    let mut builder = Crew::builder("research-report");
    builder
        .define_agent(
            "researcher",
            "Skeptical Researcher",
            "Verify sources",
            "Trusts nothing",
            vec![ToolRef::search(), ToolRef::scrape()],
        )
        .expect("researcher");
    builder
        .define_agent(
            "fact_checker",
            "Impartial Fact Checker",
            "Confirm claims",
            "Gives verdicts",
            vec![ToolRef::search()],
        )
        .expect("fact_checker");
    builder
        .define_agent(
            "reporting_analyst",
            "Strategic Analyst",
            "Write reports",
            "Writes for executives",
            vec![],
        )
        .expect("reporting_analyst");
    builder
        .define_task("research_task", "researcher", "Research", "Findings", None)
        .expect("research_task");
    builder
        .define_task("fact_check_task", "fact_checker", "Check", "Verdicts", None)
        .expect("fact_check_task");
    builder
        .define_task(
            "reporting_task",
            "reporting_analyst",
            "Report",
            "Markdown",
            Some(PathBuf::from("results/report.md")),
        )
        .expect("reporting_task");
    builder.build().expect("research crew is valid")
}

/// An engine over the given stubs.
pub fn create_engine(model: Arc<ScriptedModelClient>, tools: Arc<StaticToolInvoker>) -> CrewEngine {
    CrewEngine::new(AgentExecutor::new(model, tools))
}

/// Run `crew` on `engine` and collect every event it emitted.
pub async fn run_collecting_events(
    engine: &CrewEngine,
    crew: &Crew,
) -> (
    Result<ck_protocol::task_models::FinalResult, ck_core::engine::RunError>,
    Vec<Event>,
) {
    let (tx, mut rx) = mpsc::channel(256);
    let result = engine.run(crew, tx).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    (result, events)
}
