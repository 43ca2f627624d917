//! Genre persistence contract.

use catalog_core::repository::Repository;

use super::genre::Genre;

/// The generic repository contract specialized to genres.
pub trait GenreRepository: Repository<Genre> {}

impl<T> GenreRepository for T where T: Repository<Genre> {}
