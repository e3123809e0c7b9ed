//! Day-journal store: one entry per trading day, plus a date-range query for
//! calendar views.

use std::sync::Mutex;

use api::models::{DayJournal, DayJournalUpdate, NewDayJournal};
use api::ApiError;
use chrono::NaiveDate;

use crate::backend::Backend;

pub struct JournalStore<B> {
    backend: B,
    entries: Mutex<Vec<DayJournal>>,
}

impl<B: Backend> JournalStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Fetch all entries, replacing the cache.
    pub async fn list(&self) -> Result<Vec<DayJournal>, ApiError> {
        let entries = self.backend.list_journal().await?;
        *self.entries.lock().unwrap() = entries.clone();
        Ok(entries)
    }

    pub fn cached(&self) -> Vec<DayJournal> {
        self.entries.lock().unwrap().clone()
    }

    /// Entries within `start..=end`. A plain query; the cache of the full
    /// collection is left untouched.
    pub async fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayJournal>, ApiError> {
        self.backend.journal_range(start, end).await
    }

    pub async fn create(&self, entry: &NewDayJournal) -> Result<DayJournal, ApiError> {
        let created = self.backend.create_journal(entry).await?;
        self.list().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &DayJournalUpdate) -> Result<DayJournal, ApiError> {
        let updated = self.backend.update_journal(id, update).await?;
        self.list().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.backend.delete_journal(id).await?;
        self.list().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn entry(date: &str, notes: &str) -> NewDayJournal {
        NewDayJournal {
            date: date.parse().unwrap(),
            break_trading_plan: false,
            notes: Some(notes.to_string()),
        }
    }

    #[tokio::test]
    async fn cache_matches_fresh_list_after_mutations() {
        let backend = MemoryBackend::new();
        let store = JournalStore::new(backend.clone());

        let created = store.create(&entry("2024-10-01", "clean session")).await.unwrap();
        store.create(&entry("2024-10-02", "overtraded")).await.unwrap();
        assert_eq!(store.cached(), backend.list_journal().await.unwrap());

        let update = DayJournalUpdate {
            break_trading_plan: Some(true),
            notes: None,
        };
        store.update(&created.id, &update).await.unwrap();
        assert_eq!(store.cached(), backend.list_journal().await.unwrap());
        assert!(store.cached()[0].break_trading_plan);

        store.delete(&created.id).await.unwrap();
        assert_eq!(store.cached(), backend.list_journal().await.unwrap());
        assert_eq!(store.cached().len(), 1);
    }

    #[tokio::test]
    async fn range_query_does_not_replace_the_cache() {
        let backend = MemoryBackend::new();
        let store = JournalStore::new(backend);

        store.create(&entry("2024-09-30", "prev month")).await.unwrap();
        store.create(&entry("2024-10-15", "mid month")).await.unwrap();

        let october = store
            .range("2024-10-01".parse().unwrap(), "2024-10-31".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(october.len(), 1);
        assert_eq!(store.cached().len(), 2);
    }
}
