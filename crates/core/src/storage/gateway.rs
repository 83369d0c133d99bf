use crate::domain::saved::SavedItinerary;
use crate::error::PlanError;
use crate::storage::blob::BlobStore;
use crate::storage::record::{decode_all, encode_all};

pub const DEFAULT_STORAGE_KEY: &str = "savedItineraries";

/// Reads and replaces the saved-itinerary collection as a single JSON array
/// under one key of a [`BlobStore`].
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Absent or malformed blobs read as an empty collection. Only a failing
    /// backend is an error.
    pub fn load_all(&self) -> Result<Vec<SavedItinerary>, PlanError> {
        let Some(text) = self
            .store
            .get(&self.key)
            .map_err(|err| PlanError::persistence(&err))?
        else {
            return Ok(Vec::new());
        };

        match decode_all(&text) {
            Ok(saved) => {
                tracing::debug!(key = %self.key, len = saved.len(), "loaded saved itineraries");
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "ignoring malformed saved itineraries");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored collection with `saved`.
    pub fn save_all(&self, saved: &[SavedItinerary]) -> Result<(), PlanError> {
        let text = encode_all(saved).map_err(|err| PlanError::persistence(&err))?;
        self.store
            .put(&self.key, &text)
            .map_err(|err| PlanError::persistence(&err))?;
        tracing::info!(key = %self.key, len = saved.len(), "saved itineraries written");
        Ok(())
    }

    /// Load, append, write back.
    pub fn insert(&self, entry: SavedItinerary) -> Result<Vec<SavedItinerary>, PlanError> {
        let id = entry.id.clone();
        let next = save(&self.load_all()?, entry)?;
        self.save_all(&next)?;
        tracing::info!(%id, "saved itinerary");
        Ok(next)
    }

    /// Load, filter, write back. Returns whether an entry was removed; the
    /// write is skipped when nothing matched.
    pub fn delete(&self, id: &str) -> Result<bool, PlanError> {
        let existing = self.load_all()?;
        let next = remove(&existing, id);
        if next.len() == existing.len() {
            return Ok(false);
        }
        self.save_all(&next)?;
        tracing::info!(%id, "deleted saved itinerary");
        Ok(true)
    }
}

/// Appends `entry`; its id must not already be present.
pub fn save(
    existing: &[SavedItinerary],
    entry: SavedItinerary,
) -> Result<Vec<SavedItinerary>, PlanError> {
    if existing.iter().any(|s| s.id == entry.id) {
        return Err(PlanError::DuplicateId(entry.id));
    }
    let mut out = existing.to_vec();
    out.push(entry);
    Ok(out)
}

/// Drops the entry with `id`; returns an equal collection when absent.
pub fn remove(existing: &[SavedItinerary], id: &str) -> Vec<SavedItinerary> {
    existing.iter().filter(|s| s.id != id).cloned().collect()
}

pub fn find<'a>(existing: &'a [SavedItinerary], id: &str) -> Option<&'a SavedItinerary> {
    existing.iter().find(|s| s.id == id)
}
