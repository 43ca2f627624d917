//! Video persistence contract.

use catalog_core::repository::Repository;

use super::video::Video;

/// The generic repository contract specialized to videos.
pub trait VideoRepository: Repository<Video> {}

impl<T> VideoRepository for T where T: Repository<Video> {}
