//! # Baikal - catalog search for the Baikal Systems site
//!
//! Baikal keeps the site's three content collections (page content,
//! portfolio projects, services) and searches across them.
//!
//! Baikal provides:
//! - **Relevance search** over all collections with one ranked result list
//! - **Faceted filters** by category and tag, combined with the text query
//! - **Facet index** of every category and tag, for filter controls
//! - **Catalog store** with create/update/delete, loaded from JSON or YAML
//! - **MCP server** exposing search to AI agents over stdio
//!
//! ## Quick Start
//!
//! ```rust
//! use baikal::{SearchFilters, SearchType, Store};
//!
//! let store = Store::sample();
//!
//! let results = store.search(&SearchFilters::query("cloud migration"));
//! assert_eq!(results[0].title, "Enterprise Cloud Migration");
//!
//! let services = store.search(
//!     &SearchFilters::default()
//!         .with_type(SearchType::Services)
//!         .with_tag("24/7 Monitoring"),
//! );
//! assert_eq!(services.len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod loader;
pub mod mcp;
pub mod parser;
pub mod scanner;
pub mod search;
pub mod store;

// Re-exports for convenience
pub use catalog::{Catalog, ContentKind, ContentRecord, PortfolioRecord, RecordKind, ServiceRecord};
pub use error::{Error, Result};
pub use loader::{LoadStats, Loader};
pub use search::{Facets, SearchFilters, SearchResult, SearchType, Searcher};
pub use store::Store;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default catalog path
pub fn default_catalog_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("baikal")
        .join("catalog.yaml")
}
