//! Baikal CLI - search the Baikal Systems site catalog

use anyhow::{bail, Result};
use baikal::loader::{FileStatus, LoadProgress};
use baikal::{
    ContentKind, Loader, LoadStats, RecordKind, SearchFilters, SearchResult, Store,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "baikal")]
#[command(
    author,
    version,
    about = "Baikal - search across site content, portfolio and services"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog file or directory (default: ~/.config/baikal/catalog.yaml, else the built-in sample)
    #[arg(long, short = 'c', env = "BAIKAL_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Search query
        query: Option<String>,

        /// Collections to search (all, content, portfolio, services)
        #[arg(long, short = 't', default_value = "all")]
        r#type: String,

        /// Filter by exact category
        #[arg(long)]
        category: Option<String>,

        /// Filter by tag (repeatable, any of)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Maximum number of results
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List every category and tag
    Facets {
        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the records of one collection
    List {
        /// Collection (content, portfolio, services)
        kind: String,

        /// Category filter (content type for content)
        #[arg(long)]
        category: Option<String>,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show one record
    Get {
        /// Collection (content, portfolio, services)
        kind: String,

        /// Record id
        id: String,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Load the catalog and report problems
    Validate,

    /// Show catalog status
    Status,

    /// Start MCP server on stdio
    Serve,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries results and the MCP stream; logs go to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let catalog = resolve_catalog(cli.catalog);

    match cli.command {
        Commands::Search {
            query,
            r#type,
            category,
            tags,
            limit,
            format,
        } => {
            let filters = SearchFilters {
                query: query.unwrap_or_default(),
                search_type: r#type.parse()?,
                category: category.unwrap_or_default(),
                tags,
            };
            cmd_search(catalog.as_deref(), &filters, limit, &format)
        }
        Commands::Facets { format } => cmd_facets(catalog.as_deref(), &format),
        Commands::List {
            kind,
            category,
            format,
        } => cmd_list(catalog.as_deref(), kind.parse()?, category.as_deref(), &format),
        Commands::Get { kind, id, format } => {
            cmd_get(catalog.as_deref(), kind.parse()?, &id, &format)
        }
        Commands::Validate => cmd_validate(catalog.as_deref()),
        Commands::Status => cmd_status(catalog.as_deref()),
        Commands::Serve => cmd_serve(catalog.as_deref()),
    }
}

/// Explicit path wins; otherwise the default path if it exists
fn resolve_catalog(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = baikal::default_catalog_path();
        default.exists().then_some(default)
    })
}

/// Open the catalog, falling back to the built-in sample
fn load_store(catalog: Option<&Path>) -> Result<Store> {
    match catalog {
        Some(path) => {
            tracing::debug!("Opening catalog {}", path.display());
            Ok(Store::open(path)?)
        }
        None => {
            tracing::debug!("No catalog found, using built-in sample");
            Ok(Store::sample())
        }
    }
}

fn cmd_search(
    catalog: Option<&Path>,
    filters: &SearchFilters,
    limit: usize,
    format: &str,
) -> Result<()> {
    let store = load_store(catalog)?;

    let mut results = store.search(filters);
    let total = results.len();
    results.truncate(limit);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        if filters.is_active() {
            println!("No results found for '{}'", filters.query);
        } else {
            println!("Nothing to search for: give a query, --type, --category or --tag");
        }
        return Ok(());
    }

    println!("Found {} results:\n", total);
    for (i, result) in results.iter().enumerate() {
        print_result(i + 1, result);
    }
    if total > results.len() {
        println!("({} more, raise --limit to see them)", total - results.len());
    }

    Ok(())
}

fn print_result(rank: usize, result: &SearchResult) {
    println!(
        "{}. [{}] {} (score: {:.1})",
        rank,
        result.key(),
        result.title,
        result.relevance_score
    );
    println!("   {}", result.description);
    if let Some(ref category) = result.category {
        println!("   Category: {}", category);
    }
    if let Some(ref tags) = result.tags {
        if !tags.is_empty() {
            println!("   Tags: {}", tags.join(", "));
        }
    }
    if let Some(ref url) = result.url {
        println!("   {}", url);
    }
    println!();
}

fn cmd_facets(catalog: Option<&Path>, format: &str) -> Result<()> {
    let store = load_store(catalog)?;
    let facets = store.facets();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    println!("Categories ({}):", facets.categories.len());
    for category in &facets.categories {
        println!("  {}", category);
    }
    println!("\nTags ({}):", facets.tags.len());
    for tag in &facets.tags {
        println!("  {}", tag);
    }

    Ok(())
}

fn cmd_list(
    catalog: Option<&Path>,
    kind: RecordKind,
    category: Option<&str>,
    format: &str,
) -> Result<()> {
    let store = load_store(catalog)?;
    let records = list_records(&store, kind, category)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No {} records", kind);
        return Ok(());
    }

    for record in &records {
        println!("{}", summary_line(record));
    }

    Ok(())
}

/// Records of one collection as JSON values, filtered by category
fn list_records(
    store: &Store,
    kind: RecordKind,
    category: Option<&str>,
) -> Result<Vec<serde_json::Value>> {
    let catalog = store.catalog();
    let values = match (kind, category) {
        (RecordKind::Content, Some(c)) => {
            let content_kind: ContentKind = c.parse()?;
            to_values(store.content_by_kind(content_kind))?
        }
        (RecordKind::Content, None) => to_values(&catalog.content)?,
        (RecordKind::Portfolio, Some(c)) => to_values(store.portfolio_by_category(c))?,
        (RecordKind::Portfolio, None) => to_values(&catalog.portfolio)?,
        (RecordKind::Service, Some(c)) => to_values(store.services_by_category(c))?,
        (RecordKind::Service, None) => to_values(&catalog.services)?,
    };
    Ok(values)
}

fn to_values<T: serde::Serialize>(records: impl IntoIterator<Item = T>) -> Result<Vec<serde_json::Value>> {
    records
        .into_iter()
        .map(|r| serde_json::to_value(r).map_err(Into::into))
        .collect()
}

/// One-line text rendering of a serialized record
fn summary_line(record: &serde_json::Value) -> String {
    let id = record["id"].as_str().unwrap_or_default();
    let title = record["title"]
        .as_str()
        .or_else(|| record["name"].as_str())
        .unwrap_or_default();
    let category = record["category"]
        .as_str()
        .or_else(|| record["type"].as_str())
        .unwrap_or_default();
    format!("{:<6} {:<40} {}", id, title, category)
}

fn cmd_get(catalog: Option<&Path>, kind: RecordKind, id: &str, format: &str) -> Result<()> {
    let store = load_store(catalog)?;

    let record = match kind {
        RecordKind::Content => serde_json::to_value(store.get_content(id)?)?,
        RecordKind::Portfolio => serde_json::to_value(store.get_portfolio(id)?)?,
        RecordKind::Service => serde_json::to_value(store.get_service(id)?)?,
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_fields(&record, 0);
    Ok(())
}

/// Indented `key: value` rendering of a JSON object
fn print_fields(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    let Some(map) = value.as_object() else {
        return;
    };

    for (key, field) in map {
        match field {
            serde_json::Value::Object(_) => {
                println!("{}{}:", pad, key);
                print_fields(field, indent + 1);
            }
            serde_json::Value::Array(items) if items.iter().all(|i| i.is_string()) => {
                let items: Vec<&str> = items.iter().filter_map(|i| i.as_str()).collect();
                println!("{}{}: {}", pad, key, items.join(", "));
            }
            serde_json::Value::String(s) => println!("{}{}: {}", pad, key, s),
            other => println!("{}{}: {}", pad, key, other),
        }
    }
}

/// Prints one line per catalog file
struct PrintProgress;

impl LoadProgress for PrintProgress {
    fn on_file(&mut self, path: &Path, status: FileStatus) {
        match status {
            FileStatus::Loaded(records) => println!("  ok    {} ({} records)", path.display(), records),
            FileStatus::Error(e) => println!("  error {}: {}", path.display(), e),
        }
    }

    fn on_complete(&mut self, _stats: &LoadStats) {}
}

fn cmd_validate(catalog: Option<&Path>) -> Result<()> {
    let Some(path) = catalog else {
        let store = Store::sample();
        println!("Built-in sample catalog: {} records", store.count(None));
        return Ok(());
    };

    println!("Validating {}", path.display());

    let mut store = Store::new();
    let mut progress = PrintProgress;
    let stats = if path.is_dir() {
        Loader::new(&mut store).load_dir_with_progress(path, &[], &[], &mut progress)?
    } else {
        let mut stats = LoadStats {
            files_scanned: 1,
            ..Default::default()
        };
        match Loader::new(&mut store).load_file(path) {
            Ok(records) => {
                progress.on_file(path, FileStatus::Loaded(records));
                stats.files_loaded = 1;
                stats.records_loaded = records;
            }
            Err(e) => {
                progress.on_file(path, FileStatus::Error(e.to_string()));
                stats.errors = 1;
            }
        }
        stats
    };

    println!(
        "\nValidation complete:\n  Files scanned: {}\n  Files loaded: {}\n  Records: {}\n  Errors: {}\n  Duration: {:?}",
        stats.files_scanned, stats.files_loaded, stats.records_loaded, stats.errors, stats.duration
    );

    if stats.errors > 0 {
        bail!("{} catalog file(s) failed to load", stats.errors);
    }
    Ok(())
}

fn cmd_status(catalog: Option<&Path>) -> Result<()> {
    let store = load_store(catalog)?;
    let facets = store.facets();

    println!("Baikal Status");
    println!("=============");
    match catalog {
        Some(path) => println!("Catalog: {}", path.display()),
        None => println!("Catalog: built-in sample"),
    }
    println!("Total records: {}", store.count(None));
    for kind in RecordKind::ALL {
        println!("  {}: {}", kind.collection_name(), store.count(Some(kind)));
    }
    println!("Categories: {}", facets.categories.len());
    println!("Tags: {}", facets.tags.len());

    Ok(())
}

fn cmd_serve(catalog: Option<&Path>) -> Result<()> {
    let server = baikal::mcp::McpServer::with_store(load_store(catalog)?);
    Ok(server.run()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from([
            "baikal", "search", "cloud", "--type", "portfolio", "--tag", "AWS", "--tag", "Docker",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                query, r#type, tags, limit, ..
            } => {
                assert_eq!(query.as_deref(), Some("cloud"));
                assert_eq!(r#type, "portfolio");
                assert_eq!(tags, vec!["AWS", "Docker"]);
                assert_eq!(limit, 20);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_reject_unknown_format() {
        assert!(Cli::try_parse_from(["baikal", "facets", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_resolve_explicit_catalog() {
        let explicit = PathBuf::from("/tmp/catalog.json");
        assert_eq!(resolve_catalog(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn test_list_records_by_category() {
        let store = Store::sample();
        let records = list_records(&store, RecordKind::Portfolio, Some("RPA")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "RPA Workflow Automation System");

        let content = list_records(&store, RecordKind::Content, Some("hero")).unwrap();
        assert_eq!(content.len(), 1);

        assert!(list_records(&store, RecordKind::Content, Some("blog")).is_err());
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&serde_json::json!({
            "id": "2", "name": "AI Development", "category": "Artificial Intelligence"
        }));
        assert!(line.starts_with("2"));
        assert!(line.contains("AI Development"));
        assert!(line.ends_with("Artificial Intelligence"));
    }
}
