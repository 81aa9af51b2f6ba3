//! Query matching over the accumulated pokemon list
//!
//! Pure functions backing the filtered view and the local-match check that
//! decides whether a remote lookup is needed.

use serde::{Deserialize, Serialize};

use crate::pokemon::PokemonListItem;

/// How a query is compared against local entries before a remote lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Only an entry whose name equals the query counts as found
    #[default]
    Exact,
    /// Any entry whose name contains the query counts as found
    Substring,
}

/// Case-insensitive substring test
pub fn matches_query(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Case-insensitive equality test
pub fn matches_exactly(name: &str, query: &str) -> bool {
    name.to_lowercase() == query.to_lowercase()
}

/// Items whose name contains the query, in list order
///
/// An empty query yields the whole list.
pub fn filter_items(items: &[PokemonListItem], query: &str) -> Vec<PokemonListItem> {
    if query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| matches_query(&item.name, query))
        .cloned()
        .collect()
}

/// True when a search is active and nothing matches it
pub fn is_empty_result(query: &str, filtered: &[PokemonListItem]) -> bool {
    !query.is_empty() && filtered.is_empty()
}

/// Whether the list already holds an entry for the query
pub fn has_local_match(items: &[PokemonListItem], query: &str, mode: MatchMode) -> bool {
    items.iter().any(|item| match mode {
        MatchMode::Exact => matches_exactly(&item.name, query),
        MatchMode::Substring => matches_query(&item.name, query),
    })
}

/// Append entries not already present by name, preserving incoming order
///
/// Returns how many entries were appended.
pub fn append_unique(items: &mut Vec<PokemonListItem>, incoming: Vec<PokemonListItem>) -> usize {
    let before = items.len();
    for entry in incoming {
        if !items.iter().any(|existing| existing.name == entry.name) {
            items.push(entry);
        }
    }
    items.len() - before
}
