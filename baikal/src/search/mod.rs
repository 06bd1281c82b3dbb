//! Multi-collection relevance search
//!
//! A search scans the selected collections, scores every record against
//! the free-text query, keeps records that either score above zero or
//! pass the category/tag filters, and returns them merged in descending
//! score order. Ties keep scan order: content, then portfolio, then
//! services, each in its stored order.

mod facets;
mod filter;
mod scoring;

use crate::catalog::{Catalog, CatalogRecord, ContentRecord, PortfolioRecord, RecordKind, ServiceRecord};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub use facets::{build_facets, Facets};
pub use filter::matches_filters;
pub use scoring::score;

/// Number of body characters kept in a content result's description
pub const DESCRIPTION_CHARS: usize = 150;

/// Which collections a search covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// All three collections (default)
    #[default]
    All,
    Content,
    Portfolio,
    Services,
}

impl SearchType {
    /// Whether records of `kind` are scanned under this selector
    pub fn includes(&self, kind: RecordKind) -> bool {
        matches!(
            (self, kind),
            (SearchType::All, _)
                | (SearchType::Content, RecordKind::Content)
                | (SearchType::Portfolio, RecordKind::Portfolio)
                | (SearchType::Services, RecordKind::Service)
        )
    }
}

impl std::str::FromStr for SearchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "content" => Ok(SearchType::Content),
            "portfolio" => Ok(SearchType::Portfolio),
            "services" | "service" => Ok(SearchType::Services),
            _ => Err(Error::InvalidQuery(format!("Unknown search type: {}", s))),
        }
    }
}

/// Search input, owned by the caller and passed in on every search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Free-text query (may be empty)
    #[serde(default)]
    pub query: String,
    /// Collection selector
    #[serde(default, rename = "type")]
    pub search_type: SearchType,
    /// Exact category; empty means unconstrained
    #[serde(default)]
    pub category: String,
    /// Any-of tag set; empty means unconstrained
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchFilters {
    /// Filters with just a text query
    pub fn query(query: impl Into<String>) -> Self {
        SearchFilters {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// False when nothing is being asked for: blank query, every
    /// collection, no category and no tags. Such a search returns nothing
    /// rather than the whole catalog.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.search_type != SearchType::All
            || !self.category.is_empty()
            || !self.tags.is_empty()
    }
}

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Source record id (unique within its collection)
    pub id: String,
    /// Record title (service name for services)
    pub title: String,
    /// Short description
    pub description: String,
    /// Source collection
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Text relevance; 0 for filter-only matches
    pub relevance_score: f64,
}

impl SearchResult {
    /// Type-qualified key, unique across collections
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

/// A record the aggregator knows how to score and present
pub trait Searchable: CatalogRecord {
    /// Text the query is scored against
    fn searchable_text(&self) -> String;

    /// Build the result row for this record
    fn to_result(&self, relevance_score: f64) -> SearchResult;
}

impl Searchable for ContentRecord {
    fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    fn to_result(&self, relevance_score: f64) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            title: self.title.clone(),
            description: summarize(&self.body),
            kind: RecordKind::Content,
            category: Some(self.kind.as_str().to_string()),
            tags: Some(self.metadata.tags.clone()),
            url: None,
            relevance_score,
        }
    }
}

impl Searchable for PortfolioRecord {
    fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.technologies.join(" ")
        )
    }

    fn to_result(&self, relevance_score: f64) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            kind: RecordKind::Portfolio,
            category: Some(self.category.clone()),
            tags: Some(self.technologies.clone()),
            url: self.live_url.clone(),
            relevance_score,
        }
    }
}

impl Searchable for ServiceRecord {
    fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.features.join(" "))
    }

    fn to_result(&self, relevance_score: f64) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            title: self.name.clone(),
            description: self.description.clone(),
            kind: RecordKind::Service,
            category: Some(self.category.clone()),
            tags: Some(self.features.clone()),
            url: None,
            relevance_score,
        }
    }
}

/// First [`DESCRIPTION_CHARS`] characters of a body, always followed by an ellipsis
fn summarize(body: &str) -> String {
    let head: String = body.chars().take(DESCRIPTION_CHARS).collect();
    format!("{}...", head)
}

/// Searcher over a catalog snapshot
pub struct Searcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> Searcher<'a> {
    /// Create a new searcher
    pub fn new(catalog: &'a Catalog) -> Self {
        Searcher { catalog }
    }

    /// Run a search. Pure: identical input yields identical output.
    pub fn search(&self, filters: &SearchFilters) -> Vec<SearchResult> {
        if !filters.is_active() {
            return Vec::new();
        }

        let mut results = Vec::new();
        scan(&self.catalog.content, filters, &mut results);
        scan(&self.catalog.portfolio, filters, &mut results);
        scan(&self.catalog.services, filters, &mut results);

        // Vec::sort_by is stable, so equal scores keep scan order
        results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        tracing::debug!(
            query = %filters.query,
            search_type = ?filters.search_type,
            results = results.len(),
            "search complete"
        );

        results
    }

    /// Distinct categories and tags across the catalog
    pub fn facets(&self) -> Facets {
        build_facets(self.catalog)
    }
}

fn scan<R: Searchable>(records: &[R], filters: &SearchFilters, out: &mut Vec<SearchResult>) {
    if !filters.search_type.includes(R::KIND) {
        return;
    }

    for record in records {
        let relevance = score(&record.searchable_text(), &filters.query);
        if relevance > 0.0 || matches_filters(record, filters) {
            out.push(record.to_result(relevance));
        }
    }
}
