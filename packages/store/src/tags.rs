//! Tag catalog store (emotions and confirmations share the implementation;
//! [`TagKind`] picks the collection).

use std::sync::Mutex;

use api::models::{NewTag, Tag};
use api::ApiError;

use crate::backend::{Backend, TagKind};

pub struct TagStore<B> {
    kind: TagKind,
    backend: B,
    tags: Mutex<Vec<Tag>>,
}

impl<B: Backend> TagStore<B> {
    pub fn new(kind: TagKind, backend: B) -> Self {
        Self {
            kind,
            backend,
            tags: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the full catalog, replacing the cache.
    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let tags = self.backend.list_tags(self.kind).await?;
        *self.tags.lock().unwrap() = tags.clone();
        tracing::debug!(kind = self.kind.as_str(), count = tags.len(), "tags refreshed");
        Ok(tags)
    }

    pub fn cached(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().clone()
    }

    /// Bare names, for pickers and chips.
    pub fn names(&self) -> Vec<String> {
        self.tags
            .lock()
            .unwrap()
            .iter()
            .map(|tag| tag.name.clone())
            .collect()
    }

    pub async fn add(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let created = self.backend.create_tag(self.kind, tag).await?;
        self.list().await?;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.backend.delete_tag(self.kind, id).await?;
        self.list().await?;
        Ok(())
    }

    /// Create a tag by name unless the cached catalog already has it.
    /// Uniqueness is best-effort only: this is a read-then-write against the
    /// remote list with no version check, so two racing writers can still end
    /// up with duplicates.
    pub async fn add_name(&self, name: &str) -> Result<Option<Tag>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if self.cached().iter().any(|tag| tag.name == name) {
            return Ok(None);
        }
        self.add(&NewTag::named(name)).await.map(Some)
    }

    /// Delete the first cached tag with this name. Returns whether anything
    /// was deleted. Same read-then-write caveat as [`add_name`](Self::add_name).
    pub async fn remove_name(&self, name: &str) -> Result<bool, ApiError> {
        let id = self
            .cached()
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.id.clone());
        match id {
            Some(id) => {
                self.delete(&id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn cache_matches_fresh_list_after_add_and_delete() {
        let backend = MemoryBackend::new();
        let store = TagStore::new(TagKind::Emotions, backend.clone());

        let created = store.add(&NewTag::named("Calma")).await.unwrap();
        store.add(&NewTag::named("Ansiedad")).await.unwrap();
        assert_eq!(store.cached(), backend.list_tags(TagKind::Emotions).await.unwrap());

        store.delete(&created.id).await.unwrap();
        assert_eq!(store.cached(), backend.list_tags(TagKind::Emotions).await.unwrap());
        assert_eq!(store.names(), vec!["Ansiedad"]);
    }

    #[tokio::test]
    async fn catalogs_are_independent() {
        let backend = MemoryBackend::new();
        let emotions = TagStore::new(TagKind::Emotions, backend.clone());
        let confirmations = TagStore::new(TagKind::Confirmations, backend.clone());

        emotions.add(&NewTag::named("Miedo")).await.unwrap();
        confirmations.add(&NewTag::named("FVG")).await.unwrap();

        assert_eq!(emotions.names(), vec!["Miedo"]);
        assert_eq!(confirmations.names(), vec!["FVG"]);
    }

    #[tokio::test]
    async fn add_name_skips_existing_and_blank_names() {
        let backend = MemoryBackend::new();
        let store = TagStore::new(TagKind::Confirmations, backend);

        assert!(store.add_name("  ").await.unwrap().is_none());

        let first = store.add_name("CISD").await.unwrap();
        assert!(first.is_some());
        let second = store.add_name("CISD").await.unwrap();
        assert!(second.is_none());
        assert_eq!(store.names(), vec!["CISD"]);
    }

    #[tokio::test]
    async fn remove_name_deletes_by_name() {
        let backend = MemoryBackend::new();
        let store = TagStore::new(TagKind::Emotions, backend);

        store.add_name("Avaricia").await.unwrap();
        assert!(store.remove_name("Avaricia").await.unwrap());
        assert!(!store.remove_name("Avaricia").await.unwrap());
        assert!(store.names().is_empty());
    }
}
