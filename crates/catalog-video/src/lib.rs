//! Video catalog admin — Video bounded context.
//!
//! The Video aggregate is the multi-entity write path of the catalog: it
//! references categories, genres and cast members by id, owns uploaded
//! media placeholders, and records the domain events that drive
//! asynchronous media encoding.

pub mod application;
pub mod domain;
