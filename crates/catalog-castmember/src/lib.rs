//! Video catalog admin — Cast Member bounded context.

pub mod application;
pub mod domain;
