//! Built-in tool implementations for A.R.I.S.E.
//!
//! Tools are functions the model may ask to run mid-turn; their JSON results
//! are handed back to the model to finish the answer.

pub mod web_search;

use arise_core::tool::ToolRegistry;

pub use web_search::WebSearchTool;

/// Create a tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(web_search::WebSearchTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_offers_web_search() {
        let registry = default_registry();
        assert_eq!(registry.names(), vec!["web_search"]);
        let defs = registry.definitions();
        assert_eq!(defs[0].parameters["required"][0], "query");
    }
}
