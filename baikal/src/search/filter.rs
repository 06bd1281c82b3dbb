//! Category and tag predicates
//!
//! One predicate serves all three collections through [`CatalogRecord`]:
//! content blocks are filtered on their type tag and metadata tags,
//! portfolio records on category and technologies, services on category
//! and features. The text query plays no part here.

use super::SearchFilters;
use crate::catalog::CatalogRecord;

/// True when `record` passes both the category and the tag filter.
///
/// - category: exact, case-sensitive match; empty means any
/// - tags: at least one selected tag present; empty means any
pub fn matches_filters<R: CatalogRecord>(record: &R, filters: &SearchFilters) -> bool {
    if !filters.category.is_empty() && record.category() != filters.category {
        return false;
    }

    if !filters.tags.is_empty() {
        let tags = record.tags();
        if !filters.tags.iter().any(|selected| tags.contains(selected)) {
            return false;
        }
    }

    true
}
