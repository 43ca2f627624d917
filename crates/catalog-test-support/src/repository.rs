//! Recording in-memory repository double.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};
use catalog_core::repository::{
    ExistsResult, Repository, SearchParams, SearchResult, SearchableEntity, SortDirection,
};

/// In-memory [`Repository`] implementation that also records how it was
/// called, so tests can assert on batching and call counts without a
/// database.
#[derive(Debug)]
pub struct InMemoryRepository<A> {
    items: Mutex<Vec<A>>,
    insert_calls: Mutex<usize>,
    exists_calls: Mutex<usize>,
}

impl<A> InMemoryRepository<A> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            insert_calls: Mutex::new(0),
            exists_calls: Mutex::new(0),
        }
    }

    /// How many times `insert` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn insert_call_count(&self) -> usize {
        *self.insert_calls.lock().unwrap()
    }

    /// How many times `exists_by_id` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn exists_by_id_call_count(&self) -> usize {
        *self.exists_calls.lock().unwrap()
    }
}

impl<A> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A> Repository<A> for InMemoryRepository<A>
where
    A: SearchableEntity + Clone,
{
    async fn insert(&self, entity: A) -> Result<(), DomainError> {
        *self.insert_calls.lock().unwrap() += 1;
        self.items.lock().unwrap().push(entity);
        Ok(())
    }

    async fn bulk_insert(&self, entities: Vec<A>) -> Result<(), DomainError> {
        self.items.lock().unwrap().extend(entities);
        Ok(())
    }

    async fn update(&self, entity: A) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        let position = items
            .iter()
            .position(|stored| stored.entity_id() == entity.entity_id())
            .ok_or_else(|| {
                NotFoundError::new(entity.entity_id().to_string(), A::entity_name())
            })?;
        items[position] = entity;
        Ok(())
    }

    async fn delete(&self, id: &A::Id) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        let position = items
            .iter()
            .position(|stored| stored.entity_id() == id)
            .ok_or_else(|| NotFoundError::new(id.to_string(), A::entity_name()))?;
        items.remove(position);
        Ok(())
    }

    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.entity_id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<A>, DomainError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_ids(&self, ids: &[A::Id]) -> Result<Vec<A>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|stored| ids.contains(stored.entity_id()))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, ids: &[A::Id]) -> Result<ExistsResult<A::Id>, DomainError> {
        *self.exists_calls.lock().unwrap() += 1;
        let items = self.items.lock().unwrap();
        let mut exists = Vec::new();
        let mut not_exists = Vec::new();
        for id in ids {
            if items.iter().any(|stored| stored.entity_id() == id) {
                exists.push(id.clone());
            } else {
                not_exists.push(id.clone());
            }
        }
        Ok(ExistsResult { exists, not_exists })
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<A>, DomainError> {
        let items = self.items.lock().unwrap().clone();
        let mut matched: Vec<A> = match &params.filter {
            Some(term) => items
                .into_iter()
                .filter(|item| item.matches_filter(term))
                .collect(),
            None => items,
        };

        if let Some(sort) = &params.sort {
            matched.sort_by(|a, b| {
                let ordering = a.compare_by(b, sort).unwrap_or(Ordering::Equal);
                match params.sort_dir {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        } else {
            // Newest first when no sort is requested.
            matched.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }

        let total = matched.len() as u64;
        let page = params.page.max(1);
        let start = (page - 1) as usize * params.per_page as usize;
        let page_items: Vec<A> = matched
            .into_iter()
            .skip(start)
            .take(params.per_page as usize)
            .collect();

        Ok(SearchResult::new(page_items, total, page, params.per_page))
    }
}
