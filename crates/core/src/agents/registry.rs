//! Agent registry for a crew.
//!
//! The `AgentRegistry` is responsible for:
//! - Holding agent definitions in registration order
//! - Rejecting duplicate ids
//! - Looking up agents by id

use ck_protocol::agent_models::AgentDefinition;
use std::collections::HashMap;
use std::sync::Arc;

/// Owns the agent definitions of a crew.
///
/// Definitions are shared as `Arc`s so an in-flight run can hold an agent
/// without borrowing the registry.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<AgentDefinition>>,
    order: Vec<String>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent.
    ///
    /// # Returns
    ///
    /// The shared definition, or `None` if an agent with the same id is
    /// already registered (the registry is left unchanged).
    pub fn register(&mut self, agent: AgentDefinition) -> Option<Arc<AgentDefinition>> {
        if self.agents.contains_key(&agent.id) {
            return None;
        }
        let agent = Arc::new(agent);
        self.order.push(agent.id.clone());
        self.agents.insert(agent.id.clone(), Arc::clone(&agent));
        Some(agent)
    }

    /// Get an agent by id.
    pub fn get_agent(&self, id: &str) -> Option<Arc<AgentDefinition>> {
        self.agents.get(id).cloned()
    }

    /// Check if an agent with the given id is registered.
    pub fn has_agent(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    /// List agent ids in registration order.
    pub fn list_agents(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Iterate definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentDefinition> {
        self.order
            .iter()
            .filter_map(|id| self.agents.get(id).map(|a| a.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
