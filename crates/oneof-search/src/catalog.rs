use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{LooseSearchFilter, SearchFilter};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Read-only list of results. Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct Catalog {
    results: Arc<[SearchResult]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    pub fn new(results: impl IntoIterator<Item = SearchResult>) -> Self {
        Self {
            results: results.into_iter().collect(),
        }
    }

    /// The three demo records.
    pub fn seeded() -> Self {
        Self::new([
            SearchResult::new("1", "Item One", "Electronics"),
            SearchResult::new("2", "Item Two", "Books"),
            SearchResult::new("3", "Item Three", "Electronics"),
        ])
    }

    pub fn all(&self) -> &[SearchResult] {
        &self.results
    }

    /// Every record matching the filter, in catalog order.
    pub fn search(&self, filter: &SearchFilter) -> Vec<SearchResult> {
        let results: Vec<_> = self
            .results
            .iter()
            .filter(|result| filter.matches(result))
            .cloned()
            .collect();

        tracing::debug!(
            field = filter.field_name(),
            matches = results.len(),
            "resolved search filter"
        );

        results
    }

    /// Resolves a filter whose exactly-one rule was never enforced.
    ///
    /// The first present field by precedence wins and the others are ignored.
    /// With no field present every record is returned. Both cases hide a
    /// broken request instead of failing it.
    pub fn search_loose(&self, filter: &LooseSearchFilter) -> Vec<SearchResult> {
        let provided = filter.provided_fields();

        if provided.len() != 1 {
            tracing::warn!(
                fields = ?provided,
                "search filter without exactly one field, applying precedence"
            );
        }

        match filter.by_precedence() {
            Some(filter) => self.search(&filter),
            None => self.results.to_vec(),
        }
    }
}
