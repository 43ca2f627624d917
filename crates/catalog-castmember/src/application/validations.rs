//! Cross-aggregate reference validation for cast member ids.

use std::str::FromStr;
use std::sync::Arc;

use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};

use crate::domain::cast_member::{CastMember, CastMemberId};
use crate::domain::repository::CastMemberRepository;

/// Batch-checks that every referenced cast member id exists.
pub struct CastMembersIdExistsValidator {
    repository: Arc<dyn CastMemberRepository>,
}

impl CastMembersIdExistsValidator {
    /// Creates the validator over the cast member repository.
    #[must_use]
    pub fn new(repository: Arc<dyn CastMemberRepository>) -> Self {
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
    ) -> Result<Result<Vec<CastMemberId>, Vec<NotFoundError>>, DomainError> {
        let parsed = ids
            .iter()
            .map(|raw| CastMemberId::from_str(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let partition = self.repository.exists_by_id(&parsed).await?;
        if partition.not_exists.is_empty() {
            Ok(Ok(parsed))
        } else {
            Ok(Err(partition
                .not_exists
                .iter()
                .map(|id| NotFoundError::new(id.to_string(), CastMember::entity_name()))
                .collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::repository::Repository;
    use catalog_test_support::{FixedClock, InMemoryRepository};

    use super::*;
    use crate::domain::cast_member::CastMemberType;

    #[tokio::test]
    async fn test_missing_member_is_reported_with_its_id() {
        // Arrange
        let repo = Arc::new(InMemoryRepository::<CastMember>::new());
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let member = CastMember::create("Ana", CastMemberType::Actor, &clock);
        let inserted = *member.entity_id();
        repo.insert(member).await.unwrap();
        let missing = CastMemberId::new();
        let validator =
            CastMembersIdExistsValidator::new(Arc::clone(&repo) as Arc<dyn CastMemberRepository>);

        // Act
        let outcome = validator
            .validate(&[inserted.to_string(), missing.to_string()])
            .await
            .unwrap();

        // Assert
        assert_eq!(
            outcome.unwrap_err(),
            vec![NotFoundError::new(missing.to_string(), "CastMember")]
        );
        assert_eq!(repo.exists_by_id_call_count(), 1);
    }

    #[tokio::test]
    async fn test_all_found_returns_parsed_ids() {
        // Arrange
        let repo = Arc::new(InMemoryRepository::<CastMember>::new());
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let member = CastMember::create("Ana", CastMemberType::Actor, &clock);
        let inserted = *member.entity_id();
        repo.insert(member).await.unwrap();
        let validator =
            CastMembersIdExistsValidator::new(Arc::clone(&repo) as Arc<dyn CastMemberRepository>);

        // Act
        let outcome = validator.validate(&[inserted.to_string()]).await.unwrap();

        // Assert
        assert_eq!(outcome.unwrap(), vec![inserted]);
    }
}
