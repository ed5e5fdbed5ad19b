use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tinylink_core::{check_save_input, Operation, Result, StorageError, UrlRecord, UrlStore};

/// In-memory implementation of the store contract using DashMap.
///
/// Saving goes through the map's entry API, which holds the shard lock across
/// the existence check and the insert, so racing saves of one alias still
/// produce a single winner. Ids come from a counter and are never handed out
/// twice, even after a delete.
#[derive(Debug)]
pub struct InMemoryStore {
    records: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    /// Creates an empty store. The first saved record gets id `1`.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn save(&self, url: &str, alias: &str) -> Result<i64> {
        check_save_input(url, alias)?;

        match self.records.entry(alias.to_owned()) {
            Entry::Occupied(_) => Err(StorageError::AliasExists {
                op: Operation::Save,
                alias: alias.to_string(),
            }),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(UrlRecord {
                    id,
                    alias: alias.to_owned(),
                    url: url.to_owned(),
                });
                Ok(id)
            }
        }
    }

    async fn get(&self, alias: &str) -> Result<String> {
        self.records
            .get(alias)
            .map(|record| record.url.clone())
            .ok_or_else(|| StorageError::NotFound {
                op: Operation::Get,
                alias: alias.to_string(),
            })
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        self.records
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound {
                op: Operation::Delete,
                alias: alias.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryStore::new();

        let id = store.save("https://example.com", "abc123").await.unwrap();
        assert_eq!(id, 1);

        let url = store.get("abc123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();

        let err = store.get("nope").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { op: Operation::Get, .. }));
    }

    #[tokio::test]
    async fn save_conflict_keeps_first_record() {
        let store = InMemoryStore::new();

        store.save("https://example.com", "abc123").await.unwrap();
        let err = store.save("https://other.com", "abc123").await.unwrap_err();

        assert!(matches!(err, StorageError::AliasExists { op: Operation::Save, .. }));
        assert_eq!(store.get("abc123").await.unwrap(), "https://example.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_existing() {
        let store = InMemoryStore::new();

        store.save("https://example.com", "abc123").await.unwrap();
        store.delete("abc123").await.unwrap();

        let err = store.get("abc123").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let store = InMemoryStore::new();

        let err = store.delete("nope").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { op: Operation::Delete, .. }));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryStore::new();

        assert_eq!(store.save("https://a.example", "a").await.unwrap(), 1);
        store.delete("a").await.unwrap();
        assert_eq!(store.save("https://a.example", "a").await.unwrap(), 2);
        assert_eq!(store.save("https://b.example", "b").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let store = InMemoryStore::new();

        let err = store.save("", "abc123").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput { .. }));

        let err = store.save("https://example.com", "").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn concurrent_saves_of_one_alias_have_one_winner() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save(&format!("https://example{}.com", i), "shared")
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(err) => assert!(err.is_alias_exists()),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
