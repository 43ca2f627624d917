//! Video catalog admin — Category bounded context.
//!
//! Categories classify videos; other aggregates reference them by id and
//! validate those references through this crate's existence validator.

pub mod application;
pub mod domain;
