//! MCP tool handlers
//!
//! Each handler reads its arguments from the JSON object the client sent
//! and answers with a single JSON text block.

use super::protocol::{JsonRpcError, ToolDefinition, ToolResult};
use crate::catalog::RecordKind;
use crate::search::{SearchFilters, SearchType};
use crate::store::Store;
use serde_json::{json, Value};

/// Result cap applied by `baikal_search` when the client sends none
pub const DEFAULT_LIMIT: usize = 20;

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "baikal_search".to_string(),
            description: "Search content, portfolio projects and services. Combines a free-text query with category and tag filters; results are ranked by relevance.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Free-text query"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["all", "content", "portfolio", "services"],
                        "description": "Collections to search (default: all)",
                        "default": "all"
                    },
                    "category": {
                        "type": "string",
                        "description": "Exact category (content type for content blocks)"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Match records carrying any of these tags"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 20)",
                        "default": DEFAULT_LIMIT
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "baikal_facets".to_string(),
            description: "List every category and tag in the catalog, for building filters.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "baikal_get".to_string(),
            description: "Get one record by collection and id.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "kind": {
                        "type": "string",
                        "enum": ["content", "portfolio", "services"],
                        "description": "Collection holding the record"
                    },
                    "id": {
                        "type": "string",
                        "description": "Record id"
                    }
                },
                "required": ["kind", "id"]
            }),
        },
        ToolDefinition {
            name: "baikal_status".to_string(),
            description: "Record counts per collection and facet sizes.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
    ]
}

/// Handle tool call dispatch
pub fn handle_tool_call(
    store: &Store,
    tool_name: &str,
    arguments: &Value,
) -> Result<ToolResult, JsonRpcError> {
    match tool_name {
        "baikal_search" => tool_search(store, arguments),
        "baikal_facets" => ToolResult::json(&store.facets()),
        "baikal_get" => tool_get(store, arguments),
        "baikal_status" => tool_status(store),
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            tool_name
        ))),
    }
}

/// Build search filters from tool arguments
fn filters_from_args(args: &Value) -> Result<SearchFilters, JsonRpcError> {
    let search_type: SearchType = args
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("all")
        .parse()?;

    let tags = match args.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|t| {
                t.as_str()
                    .map(String::from)
                    .ok_or_else(|| JsonRpcError::invalid_params("tags must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(JsonRpcError::invalid_params("tags must be an array")),
    };

    Ok(SearchFilters {
        query: args
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        search_type,
        category: args
            .get("category")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        tags,
    })
}

/// Execute search tool (baikal_search)
fn tool_search(store: &Store, args: &Value) -> Result<ToolResult, JsonRpcError> {
    let filters = filters_from_args(args)?;
    let limit = args
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_LIMIT);

    let mut results = store.search(&filters);
    let total = results.len();
    results.truncate(limit);

    ToolResult::json(&json!({
        "total": total,
        "results": results
    }))
}

/// Execute get tool (baikal_get)
fn tool_get(store: &Store, args: &Value) -> Result<ToolResult, JsonRpcError> {
    let kind: RecordKind = args
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| JsonRpcError::invalid_params("Missing kind parameter"))?
        .parse()?;

    let id = args
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| JsonRpcError::invalid_params("Missing id parameter"))?;

    match kind {
        RecordKind::Content => ToolResult::json(store.get_content(id)?),
        RecordKind::Portfolio => ToolResult::json(store.get_portfolio(id)?),
        RecordKind::Service => ToolResult::json(store.get_service(id)?),
    }
}

/// Execute status tool (baikal_status)
fn tool_status(store: &Store) -> Result<ToolResult, JsonRpcError> {
    let facets = store.facets();

    ToolResult::json(&json!({
        "version": crate::VERSION,
        "revision": store.revision(),
        "totalRecords": store.count(None),
        "content": store.count(Some(RecordKind::Content)),
        "portfolio": store.count(Some(RecordKind::Portfolio)),
        "services": store.count(Some(RecordKind::Service)),
        "categories": facets.categories.len(),
        "tags": facets.tags.len()
    }))
}
