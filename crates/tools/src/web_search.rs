//! Web search tool: returns simulated search results.
//!
//! The portfolio deployment has no search API behind it; results are
//! deterministic, built from the query, so the tool round-trip works
//! end-to-end without network access.

use async_trait::async_trait;
use arise_core::error::ToolError;
use arise_core::tool::{Tool, ToolResult};
use serde::Serialize;
use tracing::info;

pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Performs a web search to find recent or real-time information."
    }

    // Gemini accepts only an OpenAPI subset: no "default", no "additionalProperties".
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        info!(query, "Performing web search");

        let results = simulated_results(query);
        let data = serde_json::to_value(&results).map_err(|e| ToolError::ExecutionFailed {
            tool_name: "web_search".into(),
            reason: e.to_string(),
        })?;

        Ok(ToolResult::from_data(data))
    }
}

#[derive(Debug, Clone, Serialize)]
struct SearchResult {
    title: String,
    snippet: String,
}

fn simulated_results(query: &str) -> Vec<SearchResult> {
    vec![
        SearchResult {
            title: format!("What is {query}?"),
            snippet: format!("{query} is a topic of great interest."),
        },
        SearchResult {
            title: format!("Recent news about {query}"),
            snippet: format!("New developments concerning {query} have emerged recently."),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_two_results_for_query() {
        let result = WebSearchTool
            .execute(serde_json::json!({"query": "WebAssembly"}))
            .await
            .unwrap();
        let data = result.data.unwrap();
        let items = data.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "What is WebAssembly?");
        assert!(result.output.contains("Recent news about WebAssembly"));
    }

    #[tokio::test]
    async fn missing_query_rejected() {
        let err = WebSearchTool
            .execute(serde_json::json!({"q": "oops"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn blank_query_rejected() {
        let err = WebSearchTool
            .execute(serde_json::json!({"query": "   "}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn schema_avoids_unsupported_keywords() {
        let schema = WebSearchTool.parameters_schema().to_string();
        assert!(!schema.contains("default"));
        assert!(schema.contains("\"required\":[\"query\"]"));
    }
}
