//! Video catalog admin — Genre bounded context.

pub mod application;
pub mod domain;
