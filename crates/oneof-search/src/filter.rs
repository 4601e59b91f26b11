use serde::{Deserialize, Serialize};

use crate::{FilterError, SearchResult};

/// A search criterion. Exactly one is active, by construction.
///
/// Serializes to the one-of wire shape: a single-key object such as
/// `{"byCategory": "Electronics"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchFilter {
    /// Case-insensitive substring of the result name.
    ByName(String),
    /// Exact identifier.
    ById(String),
    /// Exact category label.
    ByCategory(String),
}

impl SearchFilter {
    /// The input field this criterion is sent as.
    pub fn field_name(&self) -> &'static str {
        match self {
            SearchFilter::ByName(_) => "byName",
            SearchFilter::ById(_) => "byId",
            SearchFilter::ByCategory(_) => "byCategory",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SearchFilter::ByName(value) | SearchFilter::ById(value) | SearchFilter::ByCategory(value) => value,
        }
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        match self {
            SearchFilter::ByName(name) => result.name.to_lowercase().contains(&name.to_lowercase()),
            SearchFilter::ById(id) => result.id == *id,
            SearchFilter::ByCategory(category) => result.category == *category,
        }
    }
}

/// The filter as a plain input object: every field optional, none required.
///
/// This is the shape a client generates once the one-of constraint has been
/// lost, and the argument type of the lenient server schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LooseSearchFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_category: Option<String>,
}

impl LooseSearchFilter {
    /// Names of the fields that carry a value, in declaration order.
    pub fn provided_fields(&self) -> Vec<&'static str> {
        [
            ("byName", self.by_name.is_some()),
            ("byId", self.by_id.is_some()),
            ("byCategory", self.by_category.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Picks a criterion by field precedence: `byName`
    /// wins over `byId`, which wins over `byCategory`. Returns `None` when no
    /// field is set, in which case the caller falls through to every record.
    pub fn by_precedence(&self) -> Option<SearchFilter> {
        if let Some(name) = &self.by_name {
            Some(SearchFilter::ByName(name.clone()))
        } else if let Some(id) = &self.by_id {
            Some(SearchFilter::ById(id.clone()))
        } else {
            self.by_category.clone().map(SearchFilter::ByCategory)
        }
    }
}

impl From<SearchFilter> for LooseSearchFilter {
    fn from(filter: SearchFilter) -> Self {
        match filter {
            SearchFilter::ByName(name) => LooseSearchFilter {
                by_name: Some(name),
                ..Default::default()
            },
            SearchFilter::ById(id) => LooseSearchFilter {
                by_id: Some(id),
                ..Default::default()
            },
            SearchFilter::ByCategory(category) => LooseSearchFilter {
                by_category: Some(category),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<LooseSearchFilter> for SearchFilter {
    type Error = FilterError;

    fn try_from(filter: LooseSearchFilter) -> Result<Self, Self::Error> {
        let provided = filter.provided_fields();

        match provided.len() {
            0 => Err(FilterError::NoFieldProvided),
            1 => Ok(filter.by_precedence().ok_or(FilterError::NoFieldProvided)?),
            _ => Err(FilterError::MultipleFieldsProvided(provided)),
        }
    }
}
