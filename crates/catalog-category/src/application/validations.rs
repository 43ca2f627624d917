//! Cross-aggregate reference validation for category ids.

use std::str::FromStr;
use std::sync::Arc;

use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};

use crate::domain::category::{Category, CategoryId};
use crate::domain::repository::CategoryRepository;

/// Batch-checks that every referenced category id exists.
pub struct CategoriesIdExistsValidator {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoriesIdExistsValidator {
    /// Creates the validator over the category repository.
    #[must_use]
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Parses `ids` and checks them against the repository in a single
    /// batched round-trip.
    ///
    /// The inner result is all-or-nothing: either every id exists and the
    /// parsed list comes back in input order, or one [`NotFoundError`] per
    /// missing id comes back and no id is accepted.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] as soon as any raw string is not a
    /// uuid; repository failures propagate unchanged.
    pub async fn validate(
        &self,
        ids: &[String],
    ) -> Result<Result<Vec<CategoryId>, Vec<NotFoundError>>, DomainError> {
        let parsed = ids
            .iter()
            .map(|raw| CategoryId::from_str(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let partition = self.repository.exists_by_id(&parsed).await?;
        if partition.not_exists.is_empty() {
            Ok(Ok(parsed))
        } else {
            Ok(Err(partition
                .not_exists
                .iter()
                .map(|id| NotFoundError::new(id.to_string(), Category::entity_name()))
                .collect()))
        }
    }
}
