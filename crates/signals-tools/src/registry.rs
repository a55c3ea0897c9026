//! Tool registry for managing available tools

use crate::{Error, Result, Tool};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry for managing tools
///
/// Tools are kept ordered by name so listings are stable.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool previously registered under the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(tool = tool.name(), "Registering tool");
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// List all registered tools, ordered by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.values().cloned().collect()
    }

    /// Names of all registered tools, ordered
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.keys().cloned().collect()
    }

    /// Look up a tool by name and execute it
    pub async fn execute(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        tracing::debug!(tool = name, "Dispatching tool call");
        tool.execute(params).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use serde_json::json;

    mock! {
        pub EchoTool {}

        #[async_trait]
        impl Tool for EchoTool {
            async fn execute(&self, params: Value) -> Result<Value>;
            fn name(&self) -> &str;
            fn description(&self) -> &str;
            fn input_schema(&self) -> Value;
        }
    }

    fn echo_tool(name: &'static str) -> MockEchoTool {
        let mut tool = MockEchoTool::new();
        tool.expect_name().return_const(name.to_string());
        tool.expect_execute()
            .returning(|params| Ok(json!({ "echo": params })));
        tool
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(echo_tool("b_tool")));
        registry.register(Arc::new(echo_tool("a_tool")));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("a_tool").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["a_tool", "b_tool"]);
    }

    #[test]
    fn test_execute_dispatches_by_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(echo_tool("echo")));

        let result = tokio_test::block_on(registry.execute("echo", json!({"company": "IBM"})));
        assert_eq!(result.unwrap()["echo"]["company"], "IBM");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(name) if name == "nope"));
    }
}
