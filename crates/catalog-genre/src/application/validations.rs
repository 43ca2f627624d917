//! Cross-aggregate reference validation for genre ids.

use std::str::FromStr;
use std::sync::Arc;

use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};

use crate::domain::genre::{Genre, GenreId};
use crate::domain::repository::GenreRepository;

/// Batch-checks that every referenced genre id exists.
pub struct GenresIdExistsValidator {
    repository: Arc<dyn GenreRepository>,
}

impl GenresIdExistsValidator {
    /// Creates the validator over the genre repository.
    #[must_use]
    pub fn new(repository: Arc<dyn GenreRepository>) -> Self {
        Self { repository }
    }

    /// Parses `ids` and checks them against the repository in a single
    /// batched round-trip; all-or-nothing on the soft branch.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] as soon as any raw string is not a
    /// uuid; repository failures propagate unchanged.
    pub async fn validate(
        &self,
        ids: &[String],
    ) -> Result<Result<Vec<GenreId>, Vec<NotFoundError>>, DomainError> {
        let parsed = ids
            .iter()
            .map(|raw| GenreId::from_str(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let partition = self.repository.exists_by_id(&parsed).await?;
        if partition.not_exists.is_empty() {
            Ok(Ok(parsed))
        } else {
            Ok(Err(partition
                .not_exists
                .iter()
                .map(|id| NotFoundError::new(id.to_string(), Genre::entity_name()))
                .collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::repository::Repository;
    use catalog_test_support::{FixedClock, InMemoryRepository};

    use super::*;

    #[tokio::test]
    async fn test_missing_genre_is_reported_with_its_id() {
        // Arrange
        let repo = Arc::new(InMemoryRepository::<Genre>::new());
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let genre = Genre::create("Drama", true, &clock);
        let inserted = *genre.entity_id();
        repo.insert(genre).await.unwrap();
        let missing = GenreId::new();
        let validator = GenresIdExistsValidator::new(Arc::clone(&repo) as Arc<dyn GenreRepository>);

        // Act
        let outcome = validator
            .validate(&[inserted.to_string(), missing.to_string()])
            .await
            .unwrap();

        // Assert
        assert_eq!(
            outcome.unwrap_err(),
            vec![NotFoundError::new(missing.to_string(), "Genre")]
        );
        assert_eq!(repo.exists_by_id_call_count(), 1);
    }

    #[tokio::test]
    async fn test_all_found_returns_parsed_ids() {
        // Arrange
        let repo = Arc::new(InMemoryRepository::<Genre>::new());
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let genre = Genre::create("Drama", true, &clock);
        let inserted = *genre.entity_id();
        repo.insert(genre).await.unwrap();
        let validator = GenresIdExistsValidator::new(Arc::clone(&repo) as Arc<dyn GenreRepository>);

        // Act
        let outcome = validator.validate(&[inserted.to_string()]).await.unwrap();

        // Assert
        assert_eq!(outcome.unwrap(), vec![inserted]);
    }
}
