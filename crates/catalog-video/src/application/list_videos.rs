//! List-videos use case.

use std::sync::Arc;

use catalog_core::error::DomainError;
use catalog_core::repository::SearchParams;
use serde::Serialize;

use super::output::VideoOutput;
use crate::domain::repository::VideoRepository;

/// One page of video read views plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListVideosOutput {
    /// The requested page.
    pub items: Vec<VideoOutput>,
    /// Total matches across all pages.
    pub total: u64,
    /// 1-based page number.
    pub current_page: u32,
    /// Page size used.
    pub per_page: u32,
    /// Last page number for this total.
    pub last_page: u32,
}

/// Lists videos through the repository's search contract.
pub struct ListVideosUseCase {
    video_repository: Arc<dyn VideoRepository>,
}

impl ListVideosUseCase {
    /// Wires the use case over the video repository.
    #[must_use]
    pub fn new(video_repository: Arc<dyn VideoRepository>) -> Self {
        Self { video_repository }
    }

    /// Runs the search and maps the page to read views.
    ///
    /// # Errors
    ///
    /// Repository failures propagate unchanged.
    pub async fn execute(&self, params: SearchParams) -> Result<ListVideosOutput, DomainError> {
        let result = self.video_repository.search(params).await?;
        Ok(ListVideosOutput {
            items: result.items.iter().map(VideoOutput::from).collect(),
            total: result.total,
            current_page: result.current_page,
            per_page: result.per_page,
            last_page: result.last_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use catalog_core::clock::Clock;
    use catalog_core::repository::Repository;
    use catalog_test_support::{FixedClock, InMemoryRepository};

    use super::*;
    use crate::domain::rating::Rating;
    use crate::domain::video::{Video, VideoProps};

    fn video(title: &str, clock: &dyn Clock) -> Video {
        Video::create(
            VideoProps {
                title: title.to_owned(),
                description: "Synopsis.".to_owned(),
                year_launched: 2020,
                duration: 90,
                rating: Rating::RL,
                is_opened: true,
                categories_id: HashSet::new(),
                genres_id: HashSet::new(),
                cast_members_id: HashSet::new(),
            },
            clock,
        )
    }

    #[tokio::test]
    async fn test_filtered_sorted_page_is_mapped_with_metadata() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        for title in ["Alien", "Aliens", "Arrival"] {
            repo.insert(video(title, &clock)).await.unwrap();
        }
        let use_case = ListVideosUseCase::new(Arc::clone(&repo) as Arc<dyn VideoRepository>);

        // Act
        let output = use_case
            .execute(SearchParams {
                page: 1,
                per_page: 1,
                sort: Some("title".to_owned()),
                filter: Some("alien".to_owned()),
                ..SearchParams::default()
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(output.total, 2);
        assert_eq!(output.last_page, 2);
        assert_eq!(output.items.len(), 1);
        assert_eq!(output.items[0].title, "Alien");
    }
}
