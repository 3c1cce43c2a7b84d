//! Filter contexts for list fetches

use serde::{Deserialize, Serialize};

/// Scope of one fetched list.
///
/// One cache instance serves exactly one context at a time; changing context
/// resets the cache. Division-tier contexts are paginated, the others are
/// loaded in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchContext {
    /// Top-level region list, no filter
    Regions,
    /// Sub-offices of one region
    Subregions { region_id: i64 },
    /// Division candidates scoped to a region and optionally a subregion
    Divisions {
        region_id: i64,
        subregion_id: Option<i64>,
    },
    /// Partner unit list, no filter
    Partners,
    /// Free-text search within a division scope
    Search {
        region_id: i64,
        subregion_id: Option<i64>,
        keyword: String,
    },
}

impl FetchContext {
    /// Derive the search context for this scope, if it supports keyword
    /// search. Only division-tier scopes do.
    pub fn with_keyword(&self, keyword: &str) -> Option<FetchContext> {
        match self {
            FetchContext::Divisions {
                region_id,
                subregion_id,
            } => Some(FetchContext::Search {
                region_id: *region_id,
                subregion_id: *subregion_id,
                keyword: keyword.to_string(),
            }),
            FetchContext::Search {
                region_id,
                subregion_id,
                ..
            } => Some(FetchContext::Search {
                region_id: *region_id,
                subregion_id: *subregion_id,
                keyword: keyword.to_string(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchContext::Regions => write!(f, "regions"),
            FetchContext::Subregions { region_id } => {
                write!(f, "subregions of region {}", region_id)
            }
            FetchContext::Divisions {
                region_id,
                subregion_id,
            } => match subregion_id {
                Some(sub) => write!(f, "divisions of region {} / subregion {}", region_id, sub),
                None => write!(f, "divisions of region {}", region_id),
            },
            FetchContext::Partners => write!(f, "partners"),
            FetchContext::Search { keyword, .. } => write!(f, "search \"{}\"", keyword),
        }
    }
}
