use std::fs;
use std::path::{Path, PathBuf};

use pokedex_core::favorites::FavoriteSet;

use crate::error::StorageError;

/// Durable slot holding the favorites document
pub trait FavoritesStorage {
    /// Last saved document, or `None` if nothing was ever written
    fn load(&self) -> Result<Option<FavoriteSet>, StorageError>;

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StorageError>;
}

/// Favorites stored as a JSON file
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<FavoriteSet>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, serde_json::to_string_pretty(favorites)?)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// Persisted set of favorite pokemon names
///
/// Every change is written through to storage. Storage failures are logged and
/// never reach the caller: the in-memory set stays authoritative for the
/// session.
pub struct FavoritesStore<S: FavoritesStorage = JsonFileStorage> {
    storage: S,
    set: FavoriteSet,
}

impl<S: FavoritesStorage> FavoritesStore<S> {
    /// Rehydrate from storage, starting empty when there is nothing usable
    pub fn open(storage: S) -> Self {
        let set = match storage.load() {
            Ok(Some(set)) => set,
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable favorites: {}", e);
                FavoriteSet::new()
            }
        };

        log::debug!("Loaded {} favorites", set.len());
        Self { storage, set }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn add_favorite(&mut self, id: &str) {
        if self.set.add(id) {
            self.persist();
        }
    }

    pub fn remove_favorite(&mut self, id: &str) {
        if self.set.remove(id) {
            self.persist();
        }
    }

    /// Flip membership of `id`. Returns true when it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let added = self.set.toggle(id);
        self.persist();
        added
    }

    pub fn favorites(&self) -> &[String] {
        self.set.ids()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.set) {
            log::warn!("Failed to save favorites: {}", e);
        }
    }
}
