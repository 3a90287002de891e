use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::errors::{RepositoryError, RepositoryResult};
use super::CakeRepository;
use crate::models::{Cake, CakeFilter};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Cake>,
}

/// A [`CakeRepository`] kept in process memory.
///
/// Follows the same contract as [`super::PgCakeRepository`]: identical
/// sentinels, case-insensitive "contains" filters and title/rating ordering.
/// Backs the router tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCakeRepository {
    table: Arc<Mutex<Table>>,
}

impl InMemoryCakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        // A panic while holding the lock cannot leave a half-written row behind.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_filter(cake: &Cake, filter: &CakeFilter) -> bool {
    (!filter.has_title() || contains_ignore_case(&cake.title, &filter.title))
        && (!filter.has_description() || contains_ignore_case(&cake.description, &filter.description))
}

#[async_trait]
impl CakeRepository for InMemoryCakeRepository {
    async fn find(&self, id: i64) -> RepositoryResult<Cake> {
        if id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }
        self.table()
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::RecordNotFound)
    }

    async fn find_all(&self, filter: Option<CakeFilter>) -> RepositoryResult<Vec<Cake>> {
        let filter = filter.ok_or(RepositoryError::FilterNil)?;

        let mut cakes: Vec<Cake> = self
            .table()
            .rows
            .values()
            .filter(|cake| matches_filter(cake, &filter))
            .cloned()
            .collect();

        if cakes.is_empty() {
            return Err(RepositoryError::RecordNotFound);
        }
        cakes.sort_by(|a, b| {
            a.title
                .cmp(&b.title)
                .then_with(|| a.rating.total_cmp(&b.rating))
        });
        Ok(cakes)
    }

    async fn insert(&self, record: Option<Cake>) -> RepositoryResult<Cake> {
        let mut record = record.ok_or(RepositoryError::RecordNil)?;

        let mut table = self.table();
        table.next_id += 1;
        record.id = table.next_id;
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: Option<Cake>) -> RepositoryResult<()> {
        let record = record.ok_or(RepositoryError::RecordNil)?;
        if record.id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        if let Some(stored) = self.table().rows.get_mut(&record.id) {
            stored.title = record.title;
            stored.description = record.description;
            stored.rating = record.rating;
            stored.image = record.image;
            stored.updated_at = record.updated_at;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        if id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }
        self.table().rows.remove(&id);
        Ok(())
    }
}
