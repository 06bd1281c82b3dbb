//! Catalog data model
//!
//! The site keeps three independently maintained collections:
//! - **content**: page blocks (hero, about, contact, ...)
//! - **portfolio**: delivered projects
//! - **services**: service offerings
//!
//! Records are plain data. Shape validation happens when a catalog is
//! parsed (see [`crate::parser`]), so everything reachable from a
//! [`Catalog`] is well-formed.

mod sample;

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use sample::sample_catalog;

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Content,
    Portfolio,
    Service,
}

impl RecordKind {
    /// All kinds in scan order
    pub const ALL: [RecordKind; 3] = [RecordKind::Content, RecordKind::Portfolio, RecordKind::Service];

    /// Type tag carried on search results
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Content => "content",
            RecordKind::Portfolio => "portfolio",
            RecordKind::Service => "service",
        }
    }

    /// Name of the collection holding this kind
    pub fn collection_name(&self) -> &'static str {
        match self {
            RecordKind::Content => "content",
            RecordKind::Portfolio => "portfolio",
            RecordKind::Service => "services",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "content" => Ok(RecordKind::Content),
            "portfolio" => Ok(RecordKind::Portfolio),
            "service" | "services" => Ok(RecordKind::Service),
            _ => Err(Error::InvalidQuery(format!("Unknown record kind: {}", s))),
        }
    }
}

/// Content block type (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Hero,
    Service,
    Portfolio,
    About,
    Contact,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Hero => "hero",
            ContentKind::Service => "service",
            ContentKind::Portfolio => "portfolio",
            ContentKind::About => "about",
            ContentKind::Contact => "contact",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hero" => Ok(ContentKind::Hero),
            "service" => Ok(ContentKind::Service),
            "portfolio" => Ok(ContentKind::Portfolio),
            "about" => Ok(ContentKind::About),
            "contact" => Ok(ContentKind::Contact),
            _ => Err(Error::InvalidQuery(format!("Unknown content type: {}", s))),
        }
    }
}

/// SEO overrides for a content block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Content block metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_published")]
    pub published: bool,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

fn default_published() -> bool {
    true
}

/// Attached media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Media attached to a content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Generic page content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    pub metadata: ContentMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Media>,
}

/// Delivered project shown in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
}

/// Tiered service pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub basic: u64,
    pub premium: u64,
    pub enterprise: u64,
}

/// Service offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub icon: String,
}

/// Common view over the three record types.
///
/// `category` and `tags` are the facet-bearing fields: content blocks use
/// their type tag as category and their metadata tags as tags, portfolio
/// records their technologies, services their features.
pub trait CatalogRecord {
    const KIND: RecordKind;

    fn id(&self) -> &str;
    fn category(&self) -> &str;
    fn tags(&self) -> &[String];
}

impl CatalogRecord for ContentRecord {
    const KIND: RecordKind = RecordKind::Content;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        self.kind.as_str()
    }

    fn tags(&self) -> &[String] {
        &self.metadata.tags
    }
}

impl CatalogRecord for PortfolioRecord {
    const KIND: RecordKind = RecordKind::Portfolio;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.technologies
    }
}

impl CatalogRecord for ServiceRecord {
    const KIND: RecordKind = RecordKind::Service;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.features
    }
}

/// Point-in-time snapshot of all three collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub content: Vec<ContentRecord>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioRecord>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

impl Catalog {
    /// Total number of records across all collections
    pub fn len(&self) -> usize {
        self.content.len() + self.portfolio.len() + self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records of one kind
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Content => self.content.len(),
            RecordKind::Portfolio => self.portfolio.len(),
            RecordKind::Service => self.services.len(),
        }
    }
}
