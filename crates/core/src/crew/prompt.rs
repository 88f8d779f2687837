//! Prompt assembly for a task.

use crate::crew::context::ExecutionContext;
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::task_models::TaskDefinition;

/// Build the prompt for `task` as executed by `agent`.
///
/// The prompt carries the agent's role, goal and backstory, the tools it may
/// call, the task description and acceptance criterion, and every answer in
/// `context` verbatim.
pub fn build_prompt(
    agent: &AgentDefinition,
    task: &TaskDefinition,
    context: &ExecutionContext,
) -> String {
    let mut prompt = format!("You are {}.\n", agent.role);
    if !agent.backstory.trim().is_empty() {
        prompt.push_str(agent.backstory.trim());
        prompt.push('\n');
    }
    prompt.push_str(&format!("\nYour personal goal is: {}\n", agent.goal));

    if !agent.tools.is_empty() {
        let tools: Vec<_> = agent.tools.iter().map(|t| t.kind.as_str()).collect();
        prompt.push_str(&format!(
            "\nYou have access to the following tools: {}\n",
            tools.join(", ")
        ));
    }

    prompt.push_str(&format!("\nCurrent Task: {}\n", task.description));
    prompt.push_str(&format!(
        "\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.\n",
        task.expected_output
    ));

    if !context.is_empty() {
        prompt.push_str("\nThis is the context you're working with:\n");
        prompt.push_str(&context.render());
        prompt.push('\n');
    }

    prompt
}
