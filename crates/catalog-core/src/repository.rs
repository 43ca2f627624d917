//! Repository and search contracts.

use async_trait::async_trait;

use crate::aggregate::Entity;
use crate::error::DomainError;

/// Partition of a batched existence check. Both sides preserve the order
/// the ids were asked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsResult<Id> {
    /// Ids present in the store.
    pub exists: Vec<Id>,
    /// Ids not present in the store.
    pub not_exists: Vec<Id>,
}

/// Sort direction for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Paged search request.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchParams {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Sortable field name; `None` falls back to newest-first.
    pub sort: Option<String>,
    /// Direction applied to `sort`.
    pub sort_dir: SortDirection,
    /// Free-text filter term.
    pub filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 15,
            sort: None,
            sort_dir: SortDirection::Asc,
            filter: None,
        }
    }
}

/// Paged search response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// The requested page of items.
    pub items: Vec<A>,
    /// Total matches across all pages.
    pub total: u64,
    /// 1-based page this result holds.
    pub current_page: u32,
    /// Page size used.
    pub per_page: u32,
    /// Last page number for this total.
    pub last_page: u32,
}

impl<A> SearchResult<A> {
    /// Assembles a page, deriving `last_page` from total and page size.
    #[must_use]
    pub fn new(items: Vec<A>, total: u64, current_page: u32, per_page: u32) -> Self {
        let last_page = if per_page == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page,
        }
    }
}

/// Per-aggregate persistence contract. Transactional implementations must
/// bind their statements to the transaction exposed by the request's unit
/// of work.
#[async_trait]
pub trait Repository<A: Entity>: Send + Sync {
    /// Stores a new entity.
    async fn insert(&self, entity: A) -> Result<(), DomainError>;

    /// Stores a batch of new entities.
    async fn bulk_insert(&self, entities: Vec<A>) -> Result<(), DomainError>;

    /// Replaces the stored entity with the same id.
    ///
    /// # Errors
    ///
    /// [`crate::error::NotFoundError`] when the id is absent.
    async fn update(&self, entity: A) -> Result<(), DomainError>;

    /// Removes the entity with `id`.
    ///
    /// # Errors
    ///
    /// [`crate::error::NotFoundError`] when the id is absent.
    async fn delete(&self, id: &A::Id) -> Result<(), DomainError>;

    /// Looks one entity up by id.
    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>, DomainError>;

    /// Returns every stored entity.
    async fn find_all(&self) -> Result<Vec<A>, DomainError>;

    /// Returns the stored entities whose ids appear in `ids`.
    async fn find_by_ids(&self, ids: &[A::Id]) -> Result<Vec<A>, DomainError>;

    /// Batched existence check partitioning `ids` into present and
    /// missing, preserving input order. One round-trip regardless of the
    /// batch size.
    async fn exists_by_id(&self, ids: &[A::Id]) -> Result<ExistsResult<A::Id>, DomainError>;

    /// Paged, filtered, sorted listing.
    async fn search(&self, params: SearchParams) -> Result<SearchResult<A>, DomainError>;
}

/// Filtering and sorting hooks used by in-memory search.
pub trait SearchableEntity: Entity {
    /// Case-insensitive match against the free-text filter term.
    fn matches_filter(&self, term: &str) -> bool;

    /// Compares by a named sortable field; `None` when the field is not
    /// sortable for this entity type.
    fn compare_by(&self, other: &Self, field: &str) -> Option<std::cmp::Ordering>;
}
