//! MCP (Model Context Protocol) server for the catalog
//!
//! Serves catalog search to AI agents over stdio, one JSON-RPC message
//! per line.
//!
//! ## Tools Exposed
//!
//! - `baikal_search` - Ranked search with category and tag filters
//! - `baikal_facets` - Every category and tag in the catalog
//! - `baikal_get` - Retrieve one record by collection and id
//! - `baikal_status` - Record counts and facet sizes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use baikal::mcp::McpServer;
//!
//! let server = McpServer::new("catalog.yaml").unwrap();
//! server.run().unwrap();
//! ```

mod protocol;
mod server;
pub mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolDefinition, ToolResult};
pub use server::McpServer;
