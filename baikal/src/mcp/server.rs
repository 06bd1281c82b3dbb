//! MCP server over line-delimited JSON-RPC

use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    MCP_PROTOCOL_VERSION,
};
use super::tools::{get_tool_definitions, handle_tool_call};
use crate::store::Store;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::Path;

/// MCP server answering catalog queries
pub struct McpServer {
    store: Store,
}

impl McpServer {
    /// Create a server over the catalog at `path` (file or directory)
    pub fn new<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let store = Store::open(path)?;
        Ok(Self { store })
    }

    /// Create a server over an existing store
    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// The store being served
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Serve on stdin/stdout until EOF
    pub fn run(&self) -> crate::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve one request per line from `reader`, writing responses to `writer`
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> crate::Result<()> {
        tracing::info!(
            "baikal MCP server started ({} records, protocol {})",
            self.store.count(None),
            MCP_PROTOCOL_VERSION
        );

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => match self.handle_request(request) {
                    Some(response) => response,
                    None => continue,
                },
                Err(e) => JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ),
            };

            let response_json = serde_json::to_string(&response)?;
            writeln!(writer, "{}", response_json)?;
            writer.flush()?;
            tracing::debug!("Sent: {}", response_json);
        }

        tracing::info!("EOF received, shutting down");
        Ok(())
    }

    /// Handle a single request; notifications yield no response
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "tools/list" => Ok(json!({ "tools": get_tool_definitions() })),
            "tools/call" => self.handle_tools_call(request.params.as_ref()),
            "ping" => Ok(json!({})),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(error) => {
                tracing::warn!("{} failed: {}", request.method, error);
                JsonRpcResponse::error(request.id, error)
            }
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default()
        })
    }

    fn handle_tools_call(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let result = handle_tool_call(&self.store, tool_name, &arguments)?;

        serde_json::to_value(result).map_err(|e| JsonRpcError::server_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }

    fn server() -> McpServer {
        McpServer::with_store(Store::sample())
    }

    #[test]
    fn test_initialize_response() {
        let response = server()
            .handle_request(request(Some(json!(1)), "initialize", None))
            .unwrap();
        let result = response.result.unwrap();

        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], "baikal");
    }

    #[test]
    fn test_tools_list() {
        let response = server()
            .handle_request(request(Some(json!(2)), "tools/list", None))
            .unwrap();
        let result = response.result.unwrap();

        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 4);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_tools_call_search() {
        let params = json!({
            "name": "baikal_search",
            "arguments": { "query": "automation", "limit": 3 }
        });
        let response = server()
            .handle_request(request(Some(json!(3)), "tools/call", Some(params)))
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
    }

    #[test]
    fn test_tools_call_missing_name() {
        let response = server()
            .handle_request(request(Some(json!(4)), "tools/call", Some(json!({}))))
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_unknown_method() {
        let response = server()
            .handle_request(request(Some(json!(5)), "resources/list", None))
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_notification_has_no_response() {
        let response = server().handle_request(request(None, "notifications/initialized", None));
        assert!(response.is_none());
    }

    #[test]
    fn test_serve_lines() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], -32700);
        assert_eq!(lines[2]["id"], 2);
        assert!(lines[3]["id"].is_null());
        assert!(lines[3]["result"].is_object());
    }
}
