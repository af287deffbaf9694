//! # Pass Repository
//!
//! Storage seam for created passes, keyed by serial number. The service
//! ships an in-memory implementation; a database-backed one slots in behind
//! the same trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use wpc_core::{ImageSet, PassData, PassType};

use crate::state::Store;

/// A created pass as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPass {
    pub pass_id: Uuid,
    pub serial_number: String,
    pub pass_type: PassType,
    pub pass_data: PassData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageSet>,
    pub created_at: DateTime<Utc>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of records across all pages.
    pub total: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("pass with serial number {0} already exists")]
    AlreadyExists(String),
}

/// Storage for created passes.
pub trait PassRepository: Send + Sync {
    fn get(&self, serial_number: &str) -> Option<StoredPass>;

    /// Insert or replace. Returns the replaced record.
    fn put(&self, serial_number: &str, pass: StoredPass) -> Option<StoredPass>;

    /// Insert, refusing a serial number that is already stored.
    fn insert_new(&self, serial_number: &str, pass: StoredPass) -> Result<(), RepositoryError>;

    /// `page` is 1-based; `0` is treated as `1`. Ordered by creation time.
    fn list(&self, page: usize, limit: usize) -> Page<StoredPass>;

    fn delete(&self, serial_number: &str) -> Option<StoredPass>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`PassRepository`] over an in-memory [`Store`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPassRepository {
    store: Store<StoredPass>,
}

impl InMemoryPassRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassRepository for InMemoryPassRepository {
    fn get(&self, serial_number: &str) -> Option<StoredPass> {
        self.store.get(serial_number)
    }

    fn put(&self, serial_number: &str, pass: StoredPass) -> Option<StoredPass> {
        self.store.insert(serial_number, pass)
    }

    fn insert_new(&self, serial_number: &str, pass: StoredPass) -> Result<(), RepositoryError> {
        if self.store.insert_if_absent(serial_number, pass) {
            Ok(())
        } else {
            Err(RepositoryError::AlreadyExists(serial_number.to_string()))
        }
    }

    fn list(&self, page: usize, limit: usize) -> Page<StoredPass> {
        let mut all = self.store.list();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.serial_number.cmp(&b.serial_number))
        });
        let total = all.len();
        let skip = page.max(1).saturating_sub(1).saturating_mul(limit);
        let items = all.into_iter().skip(skip).take(limit).collect();
        Page { items, total }
    }

    fn delete(&self, serial_number: &str) -> Option<StoredPass> {
        self.store.remove(serial_number)
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stored(serial: &str, offset_secs: i64) -> StoredPass {
        StoredPass {
            pass_id: Uuid::new_v4(),
            serial_number: serial.to_string(),
            pass_type: PassType::Generic,
            pass_data: PassData {
                serial_number: Some(serial.to_string()),
                ..PassData::default()
            },
            images: None,
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn insert_new_refuses_duplicates() {
        let repo = InMemoryPassRepository::new();
        repo.insert_new("A", stored("A", 0)).unwrap();
        assert_eq!(
            repo.insert_new("A", stored("A", 1)),
            Err(RepositoryError::AlreadyExists("A".into()))
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn put_replaces() {
        let repo = InMemoryPassRepository::new();
        let first = stored("A", 0);
        assert!(repo.put("A", first.clone()).is_none());
        assert_eq!(repo.put("A", stored("A", 5)), Some(first));
    }

    #[test]
    fn list_is_ordered_by_creation_and_paginated() {
        let repo = InMemoryPassRepository::new();
        repo.put("C", stored("C", 3));
        repo.put("A", stored("A", 1));
        repo.put("B", stored("B", 2));

        let page = repo.list(1, 2);
        let serials: Vec<_> = page.items.iter().map(|p| p.serial_number.as_str()).collect();
        assert_eq!(serials, ["A", "B"]);
        assert_eq!(page.total, 3);

        let page = repo.list(2, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].serial_number, "C");

        assert!(repo.list(3, 2).items.is_empty());
        assert_eq!(repo.list(0, 2).items.len(), 2);
    }

    #[test]
    fn delete_removes() {
        let repo = InMemoryPassRepository::new();
        repo.put("A", stored("A", 0));
        assert!(repo.delete("A").is_some());
        assert!(repo.delete("A").is_none());
        assert!(repo.get("A").is_none());
    }
}
