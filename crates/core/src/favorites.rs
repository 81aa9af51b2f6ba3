//! Favorite pokemon identifiers
//!
//! An insertion-ordered set of names. The shell wraps this in a store that
//! persists every change; the set itself does no I/O.

use serde::{Deserialize, Serialize};

/// Document written to durable storage
///
/// Reading a document goes through [`FavoriteSet::from_ids`], so a stored
/// list with repeated names still loads as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredFavorites")]
pub struct FavoriteSet {
    favorites: Vec<String>,
}

#[derive(Deserialize)]
struct StoredFavorites {
    #[serde(default)]
    favorites: Vec<String>,
}

impl From<StoredFavorites> for FavoriteSet {
    fn from(stored: StoredFavorites) -> Self {
        Self::from_ids(stored.favorites)
    }
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stored identifiers, dropping duplicates
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            set.add(id.into());
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Insert `id` if absent. Returns whether the set changed.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.favorites.push(id);
        true
    }

    /// Remove `id` if present. Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.favorites.iter().position(|f| f == id) {
            Some(index) => {
                self.favorites.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove if present, add otherwise. Returns true when `id` is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id);
            true
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}
