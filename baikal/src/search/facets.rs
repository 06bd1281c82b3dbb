//! Facet index: the distinct categories and tags used to populate filters

use crate::catalog::{Catalog, CatalogRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct filter values across every collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

/// Build the facet index. Linear in record count.
pub fn build_facets(catalog: &Catalog) -> Facets {
    let mut facets = Facets::default();
    collect(&catalog.content, &mut facets);
    collect(&catalog.portfolio, &mut facets);
    collect(&catalog.services, &mut facets);
    facets
}

fn collect<R: CatalogRecord>(records: &[R], facets: &mut Facets) {
    for record in records {
        facets.categories.insert(record.category().to_string());
        facets.tags.extend(record.tags().iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    #[test]
    fn test_empty_catalog() {
        let facets = build_facets(&Catalog::default());
        assert!(facets.categories.is_empty());
        assert!(facets.tags.is_empty());
    }

    #[test]
    fn test_union_of_all_collections() {
        let catalog = sample_catalog();
        let facets = build_facets(&catalog);

        // content type tags
        assert!(facets.categories.contains("hero"));
        // portfolio categories
        assert!(facets.categories.contains("Cloud Solutions"));
        // service categories
        assert!(facets.categories.contains("Infrastructure"));

        assert!(facets.tags.contains("featured"));
        assert!(facets.tags.contains("Kubernetes"));
        assert!(facets.tags.contains("24/7 Monitoring"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let catalog = sample_catalog();
        let facets = build_facets(&catalog);

        // Python and React appear in more than one portfolio record
        let python_uses = catalog
            .portfolio
            .iter()
            .filter(|p| p.technologies.iter().any(|t| t == "Python"))
            .count();
        assert!(python_uses > 1);
        assert_eq!(facets.tags.iter().filter(|t| *t == "Python").count(), 1);
    }

    #[test]
    fn test_no_extras() {
        let catalog = sample_catalog();
        let facets = build_facets(&catalog);

        let mut expected_categories = BTreeSet::new();
        let mut expected_tags = BTreeSet::new();
        for c in &catalog.content {
            expected_categories.insert(c.kind.as_str().to_string());
            expected_tags.extend(c.metadata.tags.iter().cloned());
        }
        for p in &catalog.portfolio {
            expected_categories.insert(p.category.clone());
            expected_tags.extend(p.technologies.iter().cloned());
        }
        for s in &catalog.services {
            expected_categories.insert(s.category.clone());
            expected_tags.extend(s.features.iter().cloned());
        }

        assert_eq!(facets.categories, expected_categories);
        assert_eq!(facets.tags, expected_tags);
    }
}
