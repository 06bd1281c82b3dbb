//! In-memory catalog store
//!
//! The store owns one [`Catalog`] and is the only place records change.
//! It is an ordinary value: construct it, use it, drop it. Nothing is
//! written back to disk.
//!
//! Every mutation bumps [`Store::revision`], so callers holding derived
//! data (facets, cached result lists) can tell when to rebuild.

use crate::catalog::{
    sample_catalog, Catalog, CatalogRecord, ContentKind, ContentRecord, PortfolioRecord, Pricing,
    RecordKind, ServiceRecord,
};
use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::parser::parse_catalog;
use crate::search::{Facets, SearchFilters, SearchResult, Searcher};
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::path::Path;

/// Partial update for a content block; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub kind: Option<ContentKind>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Partial update for a portfolio record
#[derive(Debug, Clone, Default)]
pub struct PortfolioPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    pub completed_at: Option<NaiveDate>,
}

/// Partial update for a service record
#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
    pub pricing: Option<Pricing>,
    pub icon: Option<String>,
}

/// The catalog store
#[derive(Debug, Clone, Default)]
pub struct Store {
    catalog: Catalog,
    revision: u64,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over an existing catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Store { catalog, revision: 0 }
    }

    /// Create a store seeded with the built-in site catalog
    pub fn sample() -> Self {
        Self::with_catalog(sample_catalog())
    }

    /// Open a catalog file, or a directory of catalog fragments
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            let mut store = Store::new();
            let stats = Loader::new(&mut store).load_dir(path, &[], &[])?;
            tracing::info!(
                "Loaded {} records from {} ({} files, {} errors)",
                stats.records_loaded,
                path.display(),
                stats.files_loaded,
                stats.errors
            );
            return Ok(store);
        }

        let content = std::fs::read(path)?;
        let catalog = parse_catalog(path, &content)?;
        let mut store = Store::new();
        store.merge(catalog)?;
        Ok(store)
    }

    /// Current catalog snapshot
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutation counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Count records of one kind, or all records
    pub fn count(&self, kind: Option<RecordKind>) -> usize {
        match kind {
            Some(kind) => self.catalog.count(kind),
            None => self.catalog.len(),
        }
    }

    /// Run a search over the current snapshot
    pub fn search(&self, filters: &SearchFilters) -> Vec<SearchResult> {
        Searcher::new(&self.catalog).search(filters)
    }

    /// Facet index over the current snapshot
    pub fn facets(&self) -> Facets {
        Searcher::new(&self.catalog).facets()
    }

    /// Append every record of `other`. Fails without changing anything if
    /// an id would be duplicated within a collection.
    pub fn merge(&mut self, other: Catalog) -> Result<()> {
        check_unique(&self.catalog.content, &other.content)?;
        check_unique(&self.catalog.portfolio, &other.portfolio)?;
        check_unique(&self.catalog.services, &other.services)?;

        self.catalog.content.extend(other.content);
        self.catalog.portfolio.extend(other.portfolio);
        self.catalog.services.extend(other.services);
        self.revision += 1;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Content operations
    // -------------------------------------------------------------------------

    /// Get a content block by id
    pub fn get_content(&self, id: &str) -> Result<&ContentRecord> {
        find(&self.catalog.content, id)
    }

    /// Published content blocks of one type
    pub fn content_by_kind(&self, kind: ContentKind) -> Vec<&ContentRecord> {
        self.catalog
            .content
            .iter()
            .filter(|c| c.kind == kind && c.metadata.published)
            .collect()
    }

    /// Add a content block. An empty id is replaced with a generated one.
    /// Returns the stored id.
    pub fn create_content(&mut self, mut record: ContentRecord) -> Result<String> {
        record.id = assign_id(&self.catalog.content, record.id)?;
        let id = record.id.clone();
        self.catalog.content.push(record);
        self.touch("create", RecordKind::Content, &id);
        Ok(id)
    }

    /// Apply a patch to a content block; always refreshes `updated_at`
    pub fn update_content(&mut self, id: &str, patch: ContentPatch) -> Result<&ContentRecord> {
        let index = position(&self.catalog.content, id)?;
        let record = &mut self.catalog.content[index];

        if let Some(kind) = patch.kind {
            record.kind = kind;
        }
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(body) = patch.body {
            record.body = body;
        }
        if let Some(author) = patch.author {
            record.metadata.author = Some(author);
        }
        if let Some(published) = patch.published {
            record.metadata.published = published;
        }
        if let Some(tags) = patch.tags {
            record.metadata.tags = tags;
        }
        record.metadata.updated_at = Utc::now();

        self.touch("update", RecordKind::Content, id);
        Ok(&self.catalog.content[index])
    }

    /// Remove a content block
    pub fn delete_content(&mut self, id: &str) -> Result<ContentRecord> {
        let index = position(&self.catalog.content, id)?;
        let removed = self.catalog.content.remove(index);
        self.touch("delete", RecordKind::Content, id);
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Portfolio operations
    // -------------------------------------------------------------------------

    /// Get a portfolio record by id
    pub fn get_portfolio(&self, id: &str) -> Result<&PortfolioRecord> {
        find(&self.catalog.portfolio, id)
    }

    /// Portfolio records in one category
    pub fn portfolio_by_category(&self, category: &str) -> Vec<&PortfolioRecord> {
        self.catalog
            .portfolio
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Add a portfolio record; see [`Store::create_content`] for id handling
    pub fn create_portfolio(&mut self, mut record: PortfolioRecord) -> Result<String> {
        record.id = assign_id(&self.catalog.portfolio, record.id)?;
        let id = record.id.clone();
        self.catalog.portfolio.push(record);
        self.touch("create", RecordKind::Portfolio, &id);
        Ok(id)
    }

    /// Apply a patch to a portfolio record
    pub fn update_portfolio(&mut self, id: &str, patch: PortfolioPatch) -> Result<&PortfolioRecord> {
        let index = position(&self.catalog.portfolio, id)?;
        let record = &mut self.catalog.portfolio[index];

        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(technologies) = patch.technologies {
            record.technologies = technologies;
        }
        if let Some(live_url) = patch.live_url {
            record.live_url = Some(live_url);
        }
        if let Some(github_url) = patch.github_url {
            record.github_url = Some(github_url);
        }
        if let Some(featured) = patch.featured {
            record.featured = featured;
        }
        if let Some(completed_at) = patch.completed_at {
            record.completed_at = Some(completed_at);
        }

        self.touch("update", RecordKind::Portfolio, id);
        Ok(&self.catalog.portfolio[index])
    }

    /// Remove a portfolio record
    pub fn delete_portfolio(&mut self, id: &str) -> Result<PortfolioRecord> {
        let index = position(&self.catalog.portfolio, id)?;
        let removed = self.catalog.portfolio.remove(index);
        self.touch("delete", RecordKind::Portfolio, id);
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Service operations
    // -------------------------------------------------------------------------

    /// Get a service by id
    pub fn get_service(&self, id: &str) -> Result<&ServiceRecord> {
        find(&self.catalog.services, id)
    }

    /// Services in one category
    pub fn services_by_category(&self, category: &str) -> Vec<&ServiceRecord> {
        self.catalog
            .services
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Add a service; see [`Store::create_content`] for id handling
    pub fn create_service(&mut self, mut record: ServiceRecord) -> Result<String> {
        record.id = assign_id(&self.catalog.services, record.id)?;
        let id = record.id.clone();
        self.catalog.services.push(record);
        self.touch("create", RecordKind::Service, &id);
        Ok(id)
    }

    /// Apply a patch to a service
    pub fn update_service(&mut self, id: &str, patch: ServicePatch) -> Result<&ServiceRecord> {
        let index = position(&self.catalog.services, id)?;
        let record = &mut self.catalog.services[index];

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(features) = patch.features {
            record.features = features;
        }
        if let Some(pricing) = patch.pricing {
            record.pricing = Some(pricing);
        }
        if let Some(icon) = patch.icon {
            record.icon = icon;
        }

        self.touch("update", RecordKind::Service, id);
        Ok(&self.catalog.services[index])
    }

    /// Remove a service
    pub fn delete_service(&mut self, id: &str) -> Result<ServiceRecord> {
        let index = position(&self.catalog.services, id)?;
        let removed = self.catalog.services.remove(index);
        self.touch("delete", RecordKind::Service, id);
        Ok(removed)
    }

    fn touch(&mut self, action: &str, kind: RecordKind, id: &str) {
        self.revision += 1;
        tracing::debug!(revision = self.revision, "{} {} {}", action, kind, id);
    }
}

fn not_found<R: CatalogRecord>(id: &str) -> Error {
    Error::RecordNotFound {
        kind: R::KIND.to_string(),
        id: id.to_string(),
    }
}

fn position<R: CatalogRecord>(records: &[R], id: &str) -> Result<usize> {
    records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found::<R>(id))
}

fn find<'a, R: CatalogRecord>(records: &'a [R], id: &str) -> Result<&'a R> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| not_found::<R>(id))
}

/// Keep a caller-supplied id if it is free; generate one if it is empty.
/// Generated ids are the current millisecond timestamp, bumped past any
/// id already taken.
fn assign_id<R: CatalogRecord>(records: &[R], requested: String) -> Result<String> {
    if !requested.is_empty() {
        if records.iter().any(|r| r.id() == requested) {
            return Err(Error::DuplicateRecord {
                kind: R::KIND.to_string(),
                id: requested,
            });
        }
        return Ok(requested);
    }

    let mut candidate = Utc::now().timestamp_millis();
    while records.iter().any(|r| r.id() == candidate.to_string()) {
        candidate += 1;
    }
    Ok(candidate.to_string())
}

fn check_unique<R: CatalogRecord>(existing: &[R], incoming: &[R]) -> Result<()> {
    let mut seen: HashSet<&str> = existing.iter().map(|r| r.id()).collect();
    for record in incoming {
        if !seen.insert(record.id()) {
            return Err(Error::DuplicateRecord {
                kind: R::KIND.to_string(),
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}
