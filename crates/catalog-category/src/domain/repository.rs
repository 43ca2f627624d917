//! Category persistence contract.

use catalog_core::repository::Repository;

use super::category::Category;

/// The generic repository contract specialized to categories, so
/// collaborators can hold `Arc<dyn CategoryRepository>`.
pub trait CategoryRepository: Repository<Category> {}

impl<T> CategoryRepository for T where T: Repository<Category> {}
